use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime},
    options::{ClientOptions, IndexOptions},
    Client, Collection, IndexModel,
};

use super::{BlogStore, RefreshTokenStore, UserStore};
use crate::{
    errors::StoreError,
    models::{blog::BlogDoc, refresh_token::RefreshTokenDoc, user::UserDoc},
};

pub struct MongoUserStore(Collection<UserDoc>);
pub struct MongoBlogStore(Collection<BlogDoc>);
pub struct MongoRefreshTokenStore(Collection<RefreshTokenDoc>);

/// The three collections backing the application.
pub struct MongoStores {
    pub users: MongoUserStore,
    pub blogs: MongoBlogStore,
    pub refresh_tokens: MongoRefreshTokenStore,
}

impl MongoStores {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some("inkwell".to_string());
        let client = Client::with_options(opts)?;
        let db = client.database(db_name);

        let users: Collection<UserDoc> = db.collection("users");
        let blogs: Collection<BlogDoc> = db.collection("blogs");
        let refresh_tokens: Collection<RefreshTokenDoc> = db.collection("refresh_tokens");

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        users.create_index(email_index).await?;

        let hash_index = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        refresh_tokens.create_index(hash_index).await?;

        let author_index = IndexModel::builder().keys(doc! { "author_id": 1 }).build();
        blogs.create_index(author_index).await?;

        Ok(Self {
            users: MongoUserStore(users),
            blogs: MongoBlogStore(blogs),
            refresh_tokens: MongoRefreshTokenStore(refresh_tokens),
        })
    }
}

#[async_trait]
impl RefreshTokenStore for MongoRefreshTokenStore {
    async fn insert(&self, entry: RefreshTokenDoc) -> Result<(), StoreError> {
        self.0.insert_one(entry).await?;
        Ok(())
    }

    async fn contains(&self, token_hash: &str) -> Result<bool, StoreError> {
        let found = self.0.find_one(doc! { "token_hash": token_hash }).await?;
        Ok(found.is_some())
    }

    async fn remove(&self, token_hash: &str) -> Result<(), StoreError> {
        self.0.delete_one(doc! { "token_hash": token_hash }).await?;
        Ok(())
    }

    async fn remove_expired(&self, now: BsonDateTime) -> Result<u64, StoreError> {
        let res = self
            .0
            .delete_many(doc! { "expires_at": { "$lt": now } })
            .await?;
        Ok(res.deleted_count)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: UserDoc) -> Result<(), StoreError> {
        self.0.insert_one(user).await?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserDoc>, StoreError> {
        Ok(self.0.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<UserDoc>, StoreError> {
        Ok(self.0.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<UserDoc>, StoreError> {
        let cursor = self.0.find(doc! { "_id": { "$in": ids.to_vec() } }).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl BlogStore for MongoBlogStore {
    async fn insert(&self, blog: BlogDoc) -> Result<(), StoreError> {
        self.0.insert_one(blog).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogDoc>, StoreError> {
        Ok(self.0.find_one(doc! { "_id": id }).await?)
    }

    async fn list(&self) -> Result<Vec<BlogDoc>, StoreError> {
        let cursor = self.0.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn replace(&self, blog: &BlogDoc) -> Result<(), StoreError> {
        self.0.replace_one(doc! { "_id": blog.id }, blog).await?;
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let res = self.0.delete_one(doc! { "_id": id }).await?;
        Ok(res.deleted_count > 0)
    }
}
