//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, path IDs and uploads.

mod auth;
mod path;
mod upload;
mod validated;

pub use auth::{bearer_or_cookie_token, AdminUser, AuthUser};
pub use path::IdPath;
pub use upload::PostUpload;
pub use validated::{JsonBody, JsonOrDefault, ValidatedJson, ValidatedQuery};
