use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use tokio::sync::RwLock;

use super::{BlogStore, RefreshTokenStore, UserStore};
use crate::{
    errors::StoreError,
    models::{blog::BlogDoc, refresh_token::RefreshTokenDoc, user::UserDoc},
};

#[derive(Default)]
pub struct MemoryRefreshTokenStore {
    entries: RwLock<HashMap<String, RefreshTokenDoc>>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn insert(&self, entry: RefreshTokenDoc) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(entry.token_hash.clone(), entry);
        Ok(())
    }

    async fn contains(&self, token_hash: &str) -> Result<bool, StoreError> {
        Ok(self.entries.read().await.contains_key(token_hash))
    }

    async fn remove(&self, token_hash: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(token_hash);
        Ok(())
    }

    async fn remove_expired(&self, now: BsonDateTime) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.expires_at >= now);
        Ok((before - entries.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserDoc>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: UserDoc) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!("email {}", user.email)));
        }
        users.push(user);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserDoc>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<UserDoc>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<UserDoc>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryBlogStore {
    blogs: RwLock<Vec<BlogDoc>>,
}

impl MemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for MemoryBlogStore {
    async fn insert(&self, blog: BlogDoc) -> Result<(), StoreError> {
        self.blogs.write().await.push(blog);
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogDoc>, StoreError> {
        let blogs = self.blogs.read().await;
        Ok(blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<BlogDoc>, StoreError> {
        Ok(self.blogs.read().await.clone())
    }

    async fn replace(&self, blog: &BlogDoc) -> Result<(), StoreError> {
        let mut blogs = self.blogs.write().await;
        if let Some(slot) = blogs.iter_mut().find(|b| b.id == blog.id) {
            *slot = blog.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let mut blogs = self.blogs.write().await;
        let before = blogs.len();
        blogs.retain(|b| b.id != id);
        Ok(blogs.len() != before)
    }
}
