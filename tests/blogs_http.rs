mod common;

use common::{spawn_app, TestApp};
use serde_json::{json, Value};

async fn post_blog(app: &TestApp, token: &str, body: Value) -> (u16, Value) {
    let res = app
        .http
        .post(app.url("/blogs"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .unwrap();
    (res.status().as_u16(), res.json().await.unwrap())
}

fn token_of(registered: &Value) -> String {
    registered["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_requires_authentication() {
    let app = spawn_app().await;

    let res = app
        .http
        .post(app.url("/blogs"))
        .json(&json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
}

#[tokio::test]
async fn mistyped_blog_body_is_json_bad_request() {
    let app = spawn_app().await;
    let token = token_of(&app.register("Ada", "ada@x.com", "pass1").await);

    let (status, body) = post_blog(
        &app,
        &token,
        json!({ "title": "t", "content": "c", "tags": "rust" }),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn crud_round_trip_with_author_checks() {
    let app = spawn_app().await;
    let ada = token_of(&app.register("Ada", "ada@x.com", "pass1").await);
    let bob = token_of(&app.register("Bob", "bob@x.com", "pass1").await);

    let (status, body) = post_blog(
        &app,
        &ada,
        json!({ "title": "Hello", "content": "World", "tags": ["intro"] }),
    )
    .await;
    assert_eq!(status, 201);
    let id = body["blog"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["blog"]["author"]["name"], "Ada");

    let res = app.http.get(app.url(&format!("/blogs/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let res = app
        .http
        .put(app.url(&format!("/blogs/{id}")))
        .bearer_auth(&bob)
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);

    let res = app
        .http
        .put(app.url(&format!("/blogs/{id}")))
        .bearer_auth(&ada)
        .json(&json!({ "title": "Hello again" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["blog"]["title"], "Hello again");
    assert_eq!(updated["blog"]["content"], "World");

    let res = app
        .http
        .delete(app.url(&format!("/blogs/{id}")))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);

    let res = app
        .http
        .delete(app.url(&format!("/blogs/{id}")))
        .bearer_auth(&ada)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = app.http.get(app.url(&format!("/blogs/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let app = spawn_app().await;

    for id in ["65f000000000000000000000", "not-an-id"] {
        let res = app.http.get(app.url(&format!("/blogs/{id}"))).send().await.unwrap();
        assert_eq!(res.status(), 404);
    }
}

#[tokio::test]
async fn search_merges_text_tag_and_author_matches() {
    let app = spawn_app().await;
    let ada = token_of(&app.register("Ada", "ada@x.com", "pass1").await);
    let bob = token_of(&app.register("Bob", "bob@x.com", "pass1").await);

    post_blog(&app, &bob, json!({ "title": "Rust tips", "content": "c", "tags": ["rust"] })).await;
    post_blog(&app, &bob, json!({ "title": "Pasta", "content": "c", "tags": ["Rust"] })).await;
    post_blog(&app, &ada, json!({ "title": "Garden", "content": "c" })).await;

    let all: Vec<Value> = app.http.get(app.url("/blogs")).send().await.unwrap().json().await.unwrap();
    assert_eq!(all.len(), 3);

    let found: Vec<Value> = app
        .http
        .get(app.url("/blogs"))
        .query(&[("search", "rust")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<_> = found.iter().map(|b| b["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Rust tips", "Pasta"]);

    let found: Vec<Value> = app
        .http
        .get(app.url("/blogs"))
        .query(&[("search", "ada")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Garden");
}
