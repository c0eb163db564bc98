use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::{bson_to_rfc3339, user::AuthorPublic};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,

    pub author_id: ObjectId,

    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

/// A blog with its author populated. `author` is `None` when the
/// author account no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPublic {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author: Option<AuthorPublic>,
    pub created_at: String,
    pub updated_at: String,
}

impl BlogPublic {
    pub fn new(blog: BlogDoc, author: Option<AuthorPublic>) -> Self {
        Self {
            id: blog.id.to_hex(),
            title: blog.title,
            content: blog.content,
            tags: blog.tags,
            author,
            created_at: bson_to_rfc3339(blog.created_at),
            updated_at: bson_to_rfc3339(blog.updated_at),
        }
    }
}
