use std::collections::{HashMap, HashSet};

use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use tracing::info;

use crate::{
    dto::blog::{CreateBlogRequest, UpdateBlogRequest},
    errors::AppError,
    models::{
        blog::{BlogDoc, BlogPublic},
        user::{AuthorPublic, UserDoc},
    },
    state::AppState,
};

type Authors = HashMap<ObjectId, UserDoc>;

fn not_found() -> AppError {
    AppError::NotFound("Blog not found".into())
}

/// Malformed ids cannot name a blog, so they are reported as not found.
pub fn parse_blog_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| not_found())
}

async fn load_authors(state: &AppState, blogs: &[BlogDoc]) -> Result<Authors, AppError> {
    let ids: Vec<ObjectId> = blogs
        .iter()
        .map(|b| b.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    if ids.is_empty() {
        return Ok(Authors::new());
    }
    let users = state.users.find_by_ids(&ids).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

fn populate(blog: BlogDoc, authors: &Authors) -> BlogPublic {
    let author = authors.get(&blog.author_id).map(AuthorPublic::from);
    BlogPublic::new(blog, author)
}

async fn populate_one(state: &AppState, blog: BlogDoc) -> Result<BlogPublic, AppError> {
    let author = state.users.find_by_id(blog.author_id).await?;
    let author = author.as_ref().map(AuthorPublic::from);
    Ok(BlogPublic::new(blog, author))
}

/// Union of title/content matches, tag matches and author-name matches, in
/// that order, without duplicates. Matching is case-insensitive substring.
pub fn search_blogs(blogs: Vec<BlogDoc>, authors: &Authors, term: &str) -> Vec<BlogDoc> {
    let needle = term.trim().to_lowercase();
    let hit = |s: &str| s.to_lowercase().contains(&needle);

    let by_text = blogs.iter().filter(|b| hit(&b.title) || hit(&b.content));
    let by_tag = blogs.iter().filter(|b| b.tags.iter().any(|t| hit(t)));
    let by_author = blogs
        .iter()
        .filter(|b| authors.get(&b.author_id).is_some_and(|a| hit(&a.name)));

    let mut seen = HashSet::new();
    by_text
        .chain(by_tag)
        .chain(by_author)
        .filter(|b| seen.insert(b.id))
        .cloned()
        .collect()
}

pub async fn list(state: &AppState, search: Option<&str>) -> Result<Vec<BlogPublic>, AppError> {
    let blogs = state.blogs.list().await?;
    let authors = load_authors(state, &blogs).await?;

    let blogs = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => search_blogs(blogs, &authors, term),
        None => blogs,
    };

    Ok(blogs.into_iter().map(|b| populate(b, &authors)).collect())
}

pub async fn get(state: &AppState, id: ObjectId) -> Result<BlogPublic, AppError> {
    let blog = state.blogs.find_by_id(id).await?.ok_or_else(not_found)?;
    populate_one(state, blog).await
}

pub async fn create(
    state: &AppState,
    author_id: ObjectId,
    req: CreateBlogRequest,
) -> Result<BlogPublic, AppError> {
    req.validate()?;

    let now = BsonDateTime::now();
    let blog = BlogDoc {
        id: ObjectId::new(),
        title: req.title.trim().to_string(),
        content: req.content,
        tags: clean_tags(req.tags),
        author_id,
        created_at: now,
        updated_at: now,
    };
    state.blogs.insert(blog.clone()).await?;
    info!(blog_id = %blog.id, author_id = %author_id, "blog created");

    populate_one(state, blog).await
}

async fn load_owned(
    state: &AppState,
    id: ObjectId,
    user_id: ObjectId,
    action: &str,
) -> Result<BlogDoc, AppError> {
    let blog = state.blogs.find_by_id(id).await?.ok_or_else(not_found)?;
    if blog.author_id != user_id {
        return Err(AppError::Forbidden(format!(
            "You are not authorized to {action} this blog"
        )));
    }
    Ok(blog)
}

pub async fn update(
    state: &AppState,
    id: ObjectId,
    user_id: ObjectId,
    req: UpdateBlogRequest,
) -> Result<BlogPublic, AppError> {
    let mut blog = load_owned(state, id, user_id, "update").await?;

    if let Some(title) = req.title.filter(|t| !t.trim().is_empty()) {
        blog.title = title.trim().to_string();
    }
    if let Some(content) = req.content.filter(|c| !c.trim().is_empty()) {
        blog.content = content;
    }
    if let Some(tags) = req.tags {
        blog.tags = clean_tags(tags);
    }
    blog.updated_at = BsonDateTime::now();

    state.blogs.replace(&blog).await?;
    info!(blog_id = %blog.id, "blog updated");

    populate_one(state, blog).await
}

pub async fn delete(state: &AppState, id: ObjectId, user_id: ObjectId) -> Result<(), AppError> {
    let blog = load_owned(state, id, user_id, "delete").await?;
    if !state.blogs.delete(blog.id).await? {
        return Err(not_found());
    }
    info!(blog_id = %blog.id, "blog deleted");
    Ok(())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
