mod common;

use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn register_returns_both_tokens() {
    let app = spawn_app().await;

    let body = app.register("A", "a@x.com", "pass1").await;

    assert!(body["accessToken"].as_str().is_some());
    assert!(body["refreshToken"].as_str().is_some());
    assert!(body["message"].as_str().is_some());
    assert_eq!(body["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn register_rejects_invalid_fields() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "name": "", "email": "nope", "password": "123" }),
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn register_rejects_missing_fields_as_validation() {
    let app = spawn_app().await;

    let (status, body) = app.post("/auth/register", json!({})).await;

    assert_eq!(status, 400);
    assert!(body["errors"].is_array());
}

#[tokio::test]
async fn mistyped_register_body_is_json_bad_request() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "name": 1, "email": "a@x.com", "password": "pass1" }),
        )
        .await;

    assert_eq!(status, 400);
    assert!(body["message"]
        .as_str()
        .is_some_and(|m| m.starts_with("Invalid request body")));
}

#[tokio::test]
async fn unparseable_register_body_is_json_bad_request() {
    let app = spawn_app().await;

    let res = app
        .http
        .post(app.url("/auth/register"))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn login_without_content_type_is_json_bad_request() {
    let app = spawn_app().await;

    let res = app
        .http
        .post(app.url("/auth/login"))
        .body(r#"{"email":"a@x.com","password":"pass1"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn duplicate_registration_is_bad_request() {
    let app = spawn_app().await;
    app.register("A", "a@x.com", "pass1").await;

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "name": "B", "email": "a@x.com", "password": "pass2" }),
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn login_issues_a_different_pair() {
    let app = spawn_app().await;
    let registered = app.register("A", "a@x.com", "pass1").await;

    let (status, body) = app
        .post(
            "/auth/login",
            json!({ "email": "a@x.com", "password": "pass1" }),
        )
        .await;

    assert_eq!(status, 200);
    assert_ne!(body["accessToken"], registered["accessToken"]);
    assert_ne!(body["refreshToken"], registered["refreshToken"]);
}

#[tokio::test]
async fn login_with_bad_credentials_is_bad_request() {
    let app = spawn_app().await;
    app.register("A", "a@x.com", "pass1").await;

    let (status, _) = app
        .post(
            "/auth/login",
            json!({ "email": "a@x.com", "password": "wrong" }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = app
        .post(
            "/auth/login",
            json!({ "email": "b@x.com", "password": "pass1" }),
        )
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn refresh_status_codes() {
    let app = spawn_app().await;
    let registered = app.register("A", "a@x.com", "pass1").await;

    let (status, body) = app
        .post(
            "/auth/refresh",
            json!({ "refreshToken": registered["refreshToken"] }),
        )
        .await;
    assert_eq!(status, 200);
    assert!(body["accessToken"].as_str().is_some());
    assert!(body.get("refreshToken").is_none());

    let (status, _) = app.post("/auth/refresh", json!({})).await;
    assert_eq!(status, 401);

    let (status, _) = app
        .post("/auth/refresh", json!({ "refreshToken": "garbage" }))
        .await;
    assert_eq!(status, 403);

    // well-formed access token in the refresh slot
    let (status, _) = app
        .post(
            "/auth/refresh",
            json!({ "refreshToken": registered["accessToken"] }),
        )
        .await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn logout_is_idempotent_and_revokes() {
    let app = spawn_app().await;
    let registered = app.register("A", "a@x.com", "pass1").await;
    let token = json!({ "refreshToken": registered["refreshToken"] });

    let (status, body) = app.post("/auth/logout", token.clone()).await;
    assert_eq!(status, 200);
    assert!(body["message"].as_str().is_some());

    let (status, _) = app.post("/auth/logout", token.clone()).await;
    assert_eq!(status, 200);

    let (status, _) = app.post("/auth/logout", json!({})).await;
    assert_eq!(status, 200);

    let (status, _) = app.post("/auth/refresh", token).await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn protected_route_distinguishes_failures() {
    let app = spawn_app().await;
    let registered = app.register("A", "a@x.com", "pass1").await;
    let access = registered["accessToken"].as_str().unwrap();

    let res = app
        .http
        .get(app.url("/auth/me"))
        .bearer_auth(access)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let me: serde_json::Value = res.json().await.unwrap();
    assert_eq!(me["name"], "A");

    let res = app.http.get(app.url("/auth/me")).send().await.unwrap();
    assert_eq!(res.status(), 401);
    let missing: serde_json::Value = res.json().await.unwrap();

    let res = app
        .http
        .get(app.url("/auth/me"))
        .bearer_auth("tampered")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    let invalid: serde_json::Value = res.json().await.unwrap();

    assert_ne!(missing["message"], invalid["message"]);
}
