use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// One entry of the valid-refresh-token set. Only the digest of the
/// token is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,
    pub jti: String,

    pub token_hash: String,

    pub created_at: BsonDateTime,
    pub expires_at: BsonDateTime,
}
