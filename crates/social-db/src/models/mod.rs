//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod hashtag;
mod post;
mod upload;
mod user;

pub use comment::CommentModel;
pub use hashtag::HashtagModel;
pub use post::PostModel;
pub use upload::UploadModel;
pub use user::UserModel;
