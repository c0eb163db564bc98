#![allow(dead_code)]

use std::sync::Arc;

use inkwell::{config::Config, routes::app_router, state::AppState};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub struct TestApp {
    pub base_url: String,
    pub state: Arc<AppState>,
    pub http: reqwest::Client,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Config::default()).await
}

pub async fn spawn_app_with(cfg: Config) -> TestApp {
    let state = Arc::new(AppState::in_memory(&cfg));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = app_router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{addr}"),
        state,
        http: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post(&self, path: &str, body: Value) -> (reqwest::StatusCode, Value) {
        let res = self.http.post(self.url(path)).json(&body).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    /// Registers a user and returns the response body.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let (status, body) = self
            .post(
                "/auth/register",
                json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, 201, "register failed: {body}");
        body
    }
}
