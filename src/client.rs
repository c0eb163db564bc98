//! HTTP client for the inkwell API.
//!
//! [`SessionGuard`] attaches the stored access token to every request and,
//! on a single `401`, exchanges the refresh token for a new access token and
//! replays the request once. [`BlogClient`] is the typed API on top of it.

pub mod api;
pub mod error;
pub mod guard;
pub mod session;

pub use api::BlogClient;
pub use error::ClientError;
pub use guard::{Attempt, GuardedResponse, SessionGuard};
pub use session::{FileSessionStorage, MemorySessionStorage, Session, SessionStorage};
