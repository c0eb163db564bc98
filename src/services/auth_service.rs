use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use tracing::{info, warn};

use crate::{
    auth::IssuedTokens,
    dto::auth::{LoginRequest, RegisterRequest},
    errors::{AppError, AuthError, StoreError},
    models::user::{UserDoc, UserPublic},
    password::{hash_password, verify_password},
    state::AppState,
};

#[derive(Debug)]
pub struct AuthOutput {
    pub user: UserPublic,
    pub tokens: IssuedTokens,
}

pub async fn register(state: &AppState, req: RegisterRequest) -> Result<AuthOutput, AppError> {
    req.validate()?;

    let email = req.email.trim().to_lowercase();
    let name = req.name.trim().to_string();

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let password_hash = hash_password(req.password).await?;

    let user = UserDoc {
        id: ObjectId::new(),
        email,
        name,
        password_hash,
        created_at: BsonDateTime::now(),
    };

    // a concurrent registration can still win the race on the unique index
    state.users.insert(user.clone()).await.map_err(|e| match e {
        StoreError::Duplicate(_) => AppError::BadRequest("User already exists".into()),
        other => other.into(),
    })?;

    let tokens = state.issuer.issue(user.id).await?;
    info!(user_id = %user.id, "user registered");

    Ok(AuthOutput {
        user: user.into(),
        tokens,
    })
}

pub async fn login(state: &AppState, req: LoginRequest) -> Result<AuthOutput, AppError> {
    req.validate()?;

    let email = req.email.trim().to_lowercase();
    let invalid = || AppError::BadRequest("Invalid credentials".into());

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!("login for unknown email");
        return Err(invalid());
    };

    if !verify_password(req.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(invalid());
    }

    let tokens = state.issuer.issue(user.id).await?;
    info!(user_id = %user.id, "user logged in");

    Ok(AuthOutput {
        user: user.into(),
        tokens,
    })
}

pub async fn me(state: &AppState, user_id: ObjectId) -> Result<UserPublic, AppError> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(user.into())
}

/// Refresh-path mapping: only a missing token is 401, every other
/// rejection is 403.
pub async fn refresh(state: &AppState, refresh_token: Option<&str>) -> Result<String, AppError> {
    state
        .issuer
        .refresh(refresh_token)
        .await
        .map_err(|e| match e {
            AuthError::MissingCredential => {
                AppError::Unauthorized("Refresh token is required".into())
            }
            AuthError::UnknownCredential => {
                AppError::Forbidden("Refresh token is not recognized".into())
            }
            AuthError::ExpiredCredential | AuthError::InvalidCredential => {
                AppError::Forbidden("Invalid or expired refresh token".into())
            }
            other => other.into(),
        })
}

pub async fn logout(state: &AppState, refresh_token: Option<&str>) -> Result<(), AppError> {
    if let Some(token) = refresh_token.filter(|t| !t.trim().is_empty()) {
        state.issuer.revoke(token).await?;
    }
    info!("user logged out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn state() -> AppState {
        AppState::in_memory(&Config::default())
    }

    fn register_req(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "A".into(),
            email: email.into(),
            password: "pass1".into(),
        }
    }

    #[tokio::test]
    async fn register_normalizes_email_and_issues_tokens() {
        let state = state();
        let out = register(&state, register_req(" A@X.com ")).await.unwrap();

        assert_eq!(out.user.email, "a@x.com");
        let id = state.issuer.validate_access(&out.tokens.access_token).unwrap();
        assert_eq!(id.to_hex(), out.user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_bad_request() {
        let state = state();
        register(&state, register_req("a@x.com")).await.unwrap();

        let err = register(&state, register_req("A@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn login_issues_a_new_pair() {
        let state = state();
        let reg = register(&state, register_req("a@x.com")).await.unwrap();

        let out = login(
            &state,
            LoginRequest {
                email: "a@x.com".into(),
                password: "pass1".into(),
            },
        )
        .await
        .unwrap();

        assert_ne!(out.tokens.access_token, reg.tokens.access_token);
        assert_ne!(out.tokens.refresh_token, reg.tokens.refresh_token);
        assert_eq!(out.user.id, reg.user.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let state = state();
        register(&state, register_req("a@x.com")).await.unwrap();

        let wrong = login(
            &state,
            LoginRequest {
                email: "a@x.com".into(),
                password: "nope1".into(),
            },
        )
        .await
        .unwrap_err();
        let unknown = login(
            &state,
            LoginRequest {
                email: "b@x.com".into(),
                password: "pass1".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn refresh_rejections_map_to_forbidden() {
        let state = state();
        assert!(matches!(
            refresh(&state, None).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            refresh(&state, Some("garbage")).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn logout_revokes_and_tolerates_repeats() {
        let state = state();
        let reg = register(&state, register_req("a@x.com")).await.unwrap();
        let token = reg.tokens.refresh_token.as_str();

        logout(&state, Some(token)).await.unwrap();
        logout(&state, Some(token)).await.unwrap();
        logout(&state, None).await.unwrap();

        assert!(matches!(
            refresh(&state, Some(token)).await,
            Err(AppError::Forbidden(_))
        ));
    }
}
