use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{
    handlers::{self, auth as auth_handlers, blog as blog_handlers},
    state::AppState,
};

pub fn app_router(state: Arc<AppState>) -> Router {
    let auth = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/refresh", post(auth_handlers::refresh))
        .route("/logout", post(auth_handlers::logout))
        .route("/me", get(auth_handlers::me));

    let blogs = Router::new()
        .route("/", get(blog_handlers::list).post(blog_handlers::create))
        .route(
            "/{id}",
            get(blog_handlers::get)
                .put(blog_handlers::update)
                .delete(blog_handlers::delete),
        );

    Router::new()
        .route("/", get(handlers::health))
        .nest("/auth", auth)
        .nest("/blogs", blogs)
        .with_state(state)
}
