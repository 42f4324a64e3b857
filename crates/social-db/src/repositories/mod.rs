//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.

mod comment;
mod error;
mod file;
mod hashtag;
mod post;
mod user;

pub use comment::PgCommentRepository;
pub use file::PgFileRepository;
pub use hashtag::PgHashtagRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;
