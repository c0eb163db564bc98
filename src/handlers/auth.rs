use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::{
    auth::AuthUser,
    dto::auth::{
        AuthResponse, LoginRequest, MessageResponse, RefreshRequest, RefreshResponse,
        RegisterRequest,
    },
    errors::AppError,
    models::user::UserPublic,
    services::auth_service::{self, AuthOutput},
    state::AppState,
};

fn auth_response(out: AuthOutput, message: &str) -> AuthResponse {
    AuthResponse {
        access_token: out.tokens.access_token,
        refresh_token: out.tokens.refresh_token,
        token_type: out.tokens.token_type,
        message: message.to_string(),
        user: out.user,
    }
}

/// An unreadable body carries no token.
fn refresh_token_of(payload: Result<Json<RefreshRequest>, JsonRejection>) -> Option<String> {
    match payload {
        Ok(Json(req)) => req.refresh_token,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable refresh body");
            None
        }
    }
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let Json(req) = payload?;
    let out = auth_service::register(&state, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(auth_response(out, "User registered successfully")),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(req) = payload?;
    let out = auth_service::login(&state, req).await?;
    Ok(Json(auth_response(out, "Login successful")))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>, AppError> {
    let token = refresh_token_of(payload);
    let access_token = auth_service::refresh(&state, token.as_deref()).await?;
    Ok(Json(RefreshResponse { access_token }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let token = refresh_token_of(payload);
    auth_service::logout(&state, token.as_deref()).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserPublic>, AppError> {
    Ok(Json(auth_service::me(&state, user_id).await?))
}
