use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejectionReason,
    TypedHeader,
};
use mongodb::bson::oid::ObjectId;
use tracing::debug;

use crate::{
    errors::{AppError, AuthError},
    state::AppState,
};

/// The identity behind a valid `Authorization: Bearer <access token>` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub ObjectId);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|rejection| match rejection.reason() {
                TypedHeaderRejectionReason::Missing => AuthError::MissingCredential,
                _ => AuthError::InvalidCredential,
            })?;

        let user_id = state.issuer.validate_access(bearer.token()).map_err(|e| {
            debug!(error = %e, "access token rejected");
            e
        })?;

        Ok(Self(user_id))
    }
}
