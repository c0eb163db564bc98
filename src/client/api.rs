use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

use super::{error::api_error, ClientError, GuardedResponse, Session, SessionGuard, SessionStorage};
use crate::{
    dto::{
        auth::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest},
        blog::{BlogMessageResponse, CreateBlogRequest, UpdateBlogRequest},
    },
    models::{blog::BlogPublic, user::UserPublic},
};

/// Typed access to the inkwell API. Protected calls go through the
/// [`SessionGuard`]; login and registration replace the stored session.
#[derive(Clone)]
pub struct BlogClient {
    guard: SessionGuard,
}

impl BlogClient {
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            guard: SessionGuard::new(base_url, storage),
        }
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    pub async fn session(&self) -> Result<Option<Session>, ClientError> {
        self.guard.storage().load().await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserPublic, ClientError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.start_session("/auth/register", &body).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserPublic, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.start_session("/auth/login", &body).await
    }

    /// Clears the local session even when the server cannot be reached.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let session = self.guard.storage().load().await?;
        self.guard.storage().clear().await?;

        let Some(refresh_token) = session.and_then(|s| s.refresh_token) else {
            return Ok(());
        };
        let response = self
            .guard
            .http()
            .post(self.guard.url("/auth/logout"))
            .json(&RefreshRequest {
                refresh_token: Some(refresh_token),
            })
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "logout request failed"))?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        info!("logged out");
        Ok(())
    }

    pub async fn me(&self) -> Result<UserPublic, ClientError> {
        self.require_session().await?;
        let request = self.request(Method::GET, "/auth/me");
        self.guarded_json(request).await
    }

    pub async fn list_blogs(&self, search: Option<&str>) -> Result<Vec<BlogPublic>, ClientError> {
        let mut request = self.request(Method::GET, "/blogs");
        if let Some(term) = search {
            request = request.query(&[("search", term)]);
        }
        self.guarded_json(request).await
    }

    pub async fn get_blog(&self, id: &str) -> Result<BlogPublic, ClientError> {
        let request = self.request(Method::GET, &format!("/blogs/{id}"));
        self.guarded_json(request).await
    }

    pub async fn create_blog(&self, blog: &CreateBlogRequest) -> Result<BlogPublic, ClientError> {
        self.require_session().await?;
        let request = self.request(Method::POST, "/blogs").json(blog);
        let created: BlogMessageResponse = self.guarded_json(request).await?;
        Ok(created.blog)
    }

    pub async fn update_blog(
        &self,
        id: &str,
        changes: &UpdateBlogRequest,
    ) -> Result<BlogPublic, ClientError> {
        self.require_session().await?;
        let request = self
            .request(Method::PUT, &format!("/blogs/{id}"))
            .json(changes);
        let updated: BlogMessageResponse = self.guarded_json(request).await?;
        Ok(updated.blog)
    }

    pub async fn delete_blog(&self, id: &str) -> Result<(), ClientError> {
        self.require_session().await?;
        let request = self.request(Method::DELETE, &format!("/blogs/{id}"));
        let _: serde_json::Value = self.guarded_json(request).await?;
        Ok(())
    }

    /// Protected calls fail locally when nothing is stored.
    async fn require_session(&self) -> Result<(), ClientError> {
        match self.guard.storage().load().await? {
            Some(_) => Ok(()),
            None => Err(ClientError::NotAuthenticated),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.guard.http().request(method, self.guard.url(path))
    }

    async fn guarded_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let GuardedResponse { response, .. } = self.guard.send(request.build()?).await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn start_session<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<UserPublic, ClientError> {
        let response = self
            .guard
            .http()
            .post(self.guard.url(path))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let auth: AuthResponse = response.json().await?;
        self.guard
            .storage()
            .save(&Session {
                access_token: auth.access_token,
                refresh_token: Some(auth.refresh_token),
                user: Some(auth.user.clone()),
            })
            .await?;
        info!(user_id = %auth.user.id, "session started");
        Ok(auth.user)
    }
}
