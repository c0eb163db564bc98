use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::AuthUser,
    dto::{
        auth::MessageResponse,
        blog::{BlogMessageResponse, BlogQuery, CreateBlogRequest, UpdateBlogRequest},
    },
    errors::AppError,
    models::blog::BlogPublic,
    services::blog_service::{self, parse_blog_id},
    state::AppState,
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BlogQuery>,
) -> Result<Json<Vec<BlogPublic>>, AppError> {
    Ok(Json(
        blog_service::list(&state, query.search.as_deref()).await?,
    ))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BlogPublic>, AppError> {
    let id = parse_blog_id(&id)?;
    Ok(Json(blog_service::get(&state, id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BlogMessageResponse>), AppError> {
    let Json(req) = payload?;
    let blog = blog_service::create(&state, user_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(BlogMessageResponse {
            message: "Blog created".into(),
            blog,
        }),
    ))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBlogRequest>, JsonRejection>,
) -> Result<Json<BlogMessageResponse>, AppError> {
    let id = parse_blog_id(&id)?;
    let Json(req) = payload?;
    let blog = blog_service::update(&state, id, user_id, req).await?;
    Ok(Json(BlogMessageResponse {
        message: "Blog updated".into(),
        blog,
    }))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_blog_id(&id)?;
    blog_service::delete(&state, id, user_id).await?;
    Ok(Json(MessageResponse::new("Blog deleted successfully")))
}
