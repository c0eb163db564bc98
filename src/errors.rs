use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failures of the token lifecycle. Each kind is reported to the caller as-is.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no credential supplied")]
    MissingCredential,

    #[error("credential expired")]
    ExpiredCredential,

    #[error("credential is not valid")]
    InvalidCredential,

    #[error("credential is not recognized")]
    UnknownCredential,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("store backend: {0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        match e.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(w)) if w.code == 11000 => {
                StoreError::Duplicate(w.message.clone())
            }
            _ => StoreError::Backend(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Db(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => AppError::BadRequest("already exists".into()),
            StoreError::Backend(s) => AppError::Db(s),
        }
    }
}

/// Unreadable, mistyped or non-JSON bodies are client errors like any other.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Maps token failures on access-token protected routes.
impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredential => {
                AppError::Unauthorized("No token, authorization denied".into())
            }
            AuthError::ExpiredCredential => AppError::Unauthorized("Access token expired".into()),
            AuthError::InvalidCredential => AppError::Unauthorized("Token is not valid".into()),
            AuthError::UnknownCredential => {
                AppError::Forbidden("Refresh token is not recognized".into())
            }
            AuthError::Signing(s) => AppError::Internal(s),
            AuthError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AppError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors })))
                    .into_response();
            }
            AppError::BadRequest(s) => (StatusCode::BAD_REQUEST, s.as_str()),
            AppError::Unauthorized(s) => (StatusCode::UNAUTHORIZED, s.as_str()),
            AppError::Forbidden(s) => (StatusCode::FORBIDDEN, s.as_str()),
            AppError::NotFound(s) => (StatusCode::NOT_FOUND, s.as_str()),
            AppError::Db(_) | AppError::Internal(_) => {
                error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        (status, Json(json!({ "message": msg }))).into_response()
    }
}
