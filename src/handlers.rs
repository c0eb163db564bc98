pub mod auth;
pub mod blog;

pub async fn health() -> &'static str {
    "inkwell is running"
}
