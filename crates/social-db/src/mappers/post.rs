//! Post model -> entity mapper

use social_core::entities::Post;
use social_core::value_objects::Snowflake;

use super::to_snowflakes;
use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            caption: model.caption,
            images: model.images,
            created_by: Snowflake::new(model.created_by),
            tags: model.tags,
            votes: to_snowflakes(model.votes),
            is_blacklisted: model.is_blacklisted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
