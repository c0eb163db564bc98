use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, FieldError},
    models::blog::BlogPublic,
};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl CreateBlogRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError {
                field: "title",
                message: "title is required",
            });
        }
        if self.content.trim().is_empty() {
            errors.push(FieldError {
                field: "content",
                message: "content is required",
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Absent or empty `title`/`content` keep the stored value; `tags` is
/// replaced whenever it is present.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UpdateBlogRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlogMessageResponse {
    pub message: String,
    pub blog: BlogPublic,
}
