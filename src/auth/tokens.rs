use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use tracing::{debug, warn};

use crate::{
    auth::jwt::{decode_token, make_token, new_claims, sha256_hex, Keys, ACCESS_TYP, REFRESH_TYP},
    config::TokenSettings,
    errors::AuthError,
    models::refresh_token::RefreshTokenDoc,
    store::RefreshTokenStore,
};

#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Mints, validates and revokes the access/refresh token pair.
///
/// Access tokens are stateless. Refresh tokens are honored only while their
/// digest is present in the injected [`RefreshTokenStore`].
pub struct TokenIssuer {
    access_keys: Keys,
    refresh_keys: Keys,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    issuer: String,
    store: Arc<dyn RefreshTokenStore>,
}

impl TokenIssuer {
    pub fn new(settings: &TokenSettings, store: Arc<dyn RefreshTokenStore>) -> Self {
        Self {
            access_keys: Keys::from_secret(&settings.access_secret),
            refresh_keys: Keys::from_secret(&settings.refresh_secret),
            access_ttl_seconds: settings.access_ttl_seconds,
            refresh_ttl_seconds: settings.refresh_ttl_seconds,
            issuer: settings.issuer.clone(),
            store,
        }
    }

    pub async fn issue(&self, user_id: ObjectId) -> Result<IssuedTokens, AuthError> {
        let access_token = self.mint_access(&user_id.to_hex())?;

        let refresh_claims = new_claims(
            user_id.to_hex(),
            REFRESH_TYP,
            &self.issuer,
            self.refresh_ttl_seconds,
        )?;
        let refresh_token = make_token(&refresh_claims, &self.refresh_keys)?;

        let expires_at_millis = (refresh_claims.exp as i64).saturating_mul(1000);

        self.store
            .insert(RefreshTokenDoc {
                id: ObjectId::new(),
                user_id,
                jti: refresh_claims.jti,
                token_hash: sha256_hex(&refresh_token),
                created_at: BsonDateTime::now(),
                expires_at: BsonDateTime::from_millis(expires_at_millis),
            })
            .await?;

        debug!(user_id = %user_id, "issued token pair");
        Ok(IssuedTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        })
    }

    /// Returns the identity an access token was issued for.
    pub fn validate_access(&self, token: &str) -> Result<ObjectId, AuthError> {
        let claims = decode_token(token, &self.access_keys, &self.issuer, ACCESS_TYP)?;
        ObjectId::parse_str(&claims.sub).map_err(|_| AuthError::InvalidCredential)
    }

    /// Exchanges a refresh token for a new access token. The refresh token
    /// itself is not rotated.
    ///
    /// Set membership is checked before the signature: anything `issue` never
    /// returned, or that was revoked, is `UnknownCredential` whatever its
    /// shape. Only a recorded token is then verified, so one that is still in
    /// the set but past its expiry reports `ExpiredCredential`.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<String, AuthError> {
        let token = refresh_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredential)?;

        if !self.store.contains(&sha256_hex(token)).await? {
            warn!("refresh token not in valid set");
            return Err(AuthError::UnknownCredential);
        }

        let claims = decode_token(token, &self.refresh_keys, &self.issuer, REFRESH_TYP)?;
        self.mint_access(&claims.sub)
    }

    /// Idempotent: revoking an unknown token is a no-op.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.store.remove(&sha256_hex(refresh_token.trim())).await?;
        Ok(())
    }

    pub async fn sweep_expired(&self) -> Result<u64, AuthError> {
        Ok(self.store.remove_expired(BsonDateTime::now()).await?)
    }

    fn mint_access(&self, sub: &str) -> Result<String, AuthError> {
        let claims = new_claims(
            sub.to_string(),
            ACCESS_TYP,
            &self.issuer,
            self.access_ttl_seconds,
        )?;
        make_token(&claims, &self.access_keys)
    }
}
