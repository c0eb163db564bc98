//! Storage seams. The token issuer and the services only see these traits;
//! `memory` and `mongo` provide the two backends.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

use crate::{
    errors::StoreError,
    models::{blog::BlogDoc, refresh_token::RefreshTokenDoc, user::UserDoc},
};

pub use memory::{MemoryBlogStore, MemoryRefreshTokenStore, MemoryUserStore};
pub use mongo::MongoStores;

/// The valid-refresh-token set, keyed by token digest.
///
/// Each operation is atomic on its own. There are no cross-operation
/// transactions: a concurrent `remove` and `contains` on the same key may
/// observe either order.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn insert(&self, entry: RefreshTokenDoc) -> Result<(), StoreError>;

    async fn contains(&self, token_hash: &str) -> Result<bool, StoreError>;

    /// Removing an absent key is not an error.
    async fn remove(&self, token_hash: &str) -> Result<(), StoreError>;

    /// Drops entries whose `expires_at` is before `now`, returning how many.
    async fn remove_expired(&self, now: BsonDateTime) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Duplicate`] when the email is taken.
    async fn insert(&self, user: UserDoc) -> Result<(), StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserDoc>, StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<UserDoc>, StoreError>;

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<UserDoc>, StoreError>;
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn insert(&self, blog: BlogDoc) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogDoc>, StoreError>;

    /// All blogs in creation order.
    async fn list(&self) -> Result<Vec<BlogDoc>, StoreError>;

    async fn replace(&self, blog: &BlogDoc) -> Result<(), StoreError>;

    /// Returns whether a blog was deleted.
    async fn delete(&self, id: ObjectId) -> Result<bool, StoreError>;
}
