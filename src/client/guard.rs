use std::sync::Arc;

use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Client, Request, Response, StatusCode,
};
use tracing::{debug, warn};

use super::{error::api_error, ClientError, SessionStorage};
use crate::dto::auth::{RefreshRequest, RefreshResponse};

/// Whether a response came from the first dispatch or from the single replay
/// after a token refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    Retried,
}

#[derive(Debug)]
pub struct GuardedResponse {
    pub response: Response,
    pub attempt: Attempt,
}

impl GuardedResponse {
    fn new(response: Response, attempt: Attempt) -> Self {
        Self { response, attempt }
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn was_retried(&self) -> bool {
        self.attempt == Attempt::Retried
    }
}

/// Sends requests with the stored access token and recovers once from an
/// expired or rejected one.
///
/// Per request: `First` dispatch; on `401` with a stored refresh token the
/// guard calls `/auth/refresh`, stores the new access token and dispatches
/// the same request again as `Retried`. Whatever the `Retried` dispatch
/// returns is final. Concurrent requests may each refresh independently.
#[derive(Clone)]
pub struct SessionGuard {
    http: Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
}

impl SessionGuard {
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn SessionStorage>) -> Self {
        Self::with_client(Client::new(), base_url, storage)
    }

    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage,
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn send(&self, request: Request) -> Result<GuardedResponse, ClientError> {
        let replay = request.try_clone();
        let response = self.dispatch(request).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(GuardedResponse::new(response, Attempt::First));
        }

        let Some(mut replay) = replay else {
            debug!(url = %response.url(), "streaming body cannot be replayed");
            return Ok(GuardedResponse::new(response, Attempt::First));
        };

        let refresh_token = self
            .storage
            .load()
            .await?
            .and_then(|s| s.refresh_token);
        let Some(refresh_token) = refresh_token else {
            debug!(url = %response.url(), "401 without a refresh token");
            return Ok(GuardedResponse::new(response, Attempt::First));
        };

        warn!(url = %response.url(), status = 401, "access token rejected, refreshing");
        let access_token = self.refresh_access_token(&refresh_token).await?;

        // storage may have been cleared while refreshing
        replay
            .headers_mut()
            .insert(AUTHORIZATION, bearer(&access_token)?);
        let response = self.http.execute(replay).await?;
        debug!(status = %response.status(), "replayed request after refresh");
        Ok(GuardedResponse::new(response, Attempt::Retried))
    }

    /// Exchanges `refresh_token` for a new access token and stores it. A
    /// `403` means the refresh token can never succeed again, so the local
    /// session is discarded.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&RefreshRequest {
                refresh_token: Some(refresh_token.to_string()),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::FORBIDDEN {
                warn!("refresh token rejected, clearing session");
                self.storage.clear().await?;
            }
            return Err(api_error(response).await);
        }

        let RefreshResponse { access_token } = response.json().await?;
        if let Some(mut session) = self.storage.load().await? {
            session.access_token = access_token.clone();
            self.storage.save(&session).await?;
        }
        Ok(access_token)
    }

    async fn dispatch(&self, mut request: Request) -> Result<Response, ClientError> {
        if let Some(session) = self.storage.load().await? {
            request
                .headers_mut()
                .insert(AUTHORIZATION, bearer(&session.access_token)?);
        }
        Ok(self.http.execute(request).await?)
    }
}

fn bearer(access_token: &str) -> Result<HeaderValue, ClientError> {
    Ok(HeaderValue::from_str(&format!("Bearer {access_token}"))?)
}
