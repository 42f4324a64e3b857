//! Domain entities - core business objects

mod comment;
mod hashtag;
mod post;
mod stored_file;
mod user;

pub use comment::{Comment, MAX_COMMENT_LENGTH};
pub use hashtag::Hashtag;
pub use post::{Post, VoteAction, MAX_CAPTION_LENGTH};
pub use stored_file::StoredFile;
pub use user::{FollowAction, Role, User, MAX_BIO_LENGTH};
