use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::AuthError;

pub const ACCESS_TYP: &str = "access";
pub const REFRESH_TYP: &str = "refresh";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,

    pub typ: String, // "access" | "refresh"
    pub jti: String,
}

/// An HMAC key pair for one token kind.
#[derive(Clone)]
pub struct Keys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl Keys {
    pub fn from_secret(secret: &str) -> Self {
        let secret = secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

pub fn sha256_hex(s: &str) -> String {
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    hex::encode(h.finalize())
}

/// Fails with [`AuthError::Signing`] when `ttl_seconds` cannot be added to
/// the current time.
pub fn new_claims(
    sub: String,
    typ: &str,
    issuer: &str,
    ttl_seconds: i64,
) -> Result<Claims, AuthError> {
    let now = Utc::now();
    let exp = Duration::try_seconds(ttl_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AuthError::Signing(format!("token lifetime out of range: {ttl_seconds}s"))
        })?;

    Ok(Claims {
        sub,
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
        iss: issuer.to_string(),
        typ: typ.into(),
        jti: Uuid::new_v4().to_string(),
    })
}

pub fn make_token(claims: &Claims, keys: &Keys) -> Result<String, AuthError> {
    encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)
        .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Verifies signature, expiry, issuer and token kind.
pub fn decode_token(
    token: &str,
    keys: &Keys,
    issuer: &str,
    typ: &str,
) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[issuer]);
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);

    let data = decode::<Claims>(token, &keys.decoding, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
            _ => AuthError::InvalidCredential,
        }
    })?;

    if data.claims.typ != typ {
        return Err(AuthError::InvalidCredential);
    }
    Ok(data.claims)
}
