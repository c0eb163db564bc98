use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, FieldError},
    models::user::UserPublic,
};

pub const MIN_PASSWORD_LEN: usize = 5;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: "name",
                message: "name is required",
            });
        }
        if !looks_like_email(&self.email) {
            errors.push(FieldError {
                field: "email",
                message: "please enter a valid email",
            });
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError {
                field: "password",
                message: "password must be at least 5 characters",
            });
        }
        into_result(errors)
    }
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if !looks_like_email(&self.email) {
            errors.push(FieldError {
                field: "email",
                message: "please include a valid email",
            });
        }
        if self.password.is_empty() {
            errors.push(FieldError {
                field: "password",
                message: "password is required",
            });
        }
        into_result(errors)
    }
}

/// Body of both `/auth/refresh` and `/auth/logout`.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub message: String,
    pub user: UserPublic,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn into_result(errors: Vec<FieldError>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Shape check only: one `@`, a non-empty local part and a dotted domain.
pub fn looks_like_email(s: &str) -> bool {
    let s = s.trim();
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_minimal_registration() {
        let req = RegisterRequest {
            name: "A".into(),
            email: "a@x.com".into(),
            password: "pass1".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn reports_every_bad_field() {
        let req = RegisterRequest {
            name: " ".into(),
            email: "nope".into(),
            password: "1234".into(),
        };
        assert_eq!(fields(req.validate().unwrap_err()), ["name", "email", "password"]);
    }

    #[test]
    fn login_requires_password() {
        let req = LoginRequest {
            email: "a@x.com".into(),
            password: String::new(),
        };
        assert_eq!(fields(req.validate().unwrap_err()), ["password"]);
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@x.com"));
        assert!(looks_like_email(" a.b@mail.example.org "));
        assert!(!looks_like_email("a@x"));
        assert!(!looks_like_email("@x.com"));
        assert!(!looks_like_email("a@@x.com"));
        assert!(!looks_like_email("a b@x.com"));
        assert!(!looks_like_email("a@x.com."));
    }

    #[test]
    fn refresh_request_uses_camel_case() {
        let req: RefreshRequest = serde_json::from_str(r#"{"refreshToken":"t"}"#).unwrap();
        assert_eq!(req.refresh_token.as_deref(), Some("t"));
        let empty: RefreshRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.refresh_token.is_none());
    }
}
