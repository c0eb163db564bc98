pub mod extractor;
pub mod jwt;
pub mod sweeper;
pub mod tokens;

pub use extractor::AuthUser;
pub use tokens::{IssuedTokens, TokenIssuer};
