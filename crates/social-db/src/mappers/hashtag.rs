//! Hashtag model -> entity mapper

use social_core::entities::Hashtag;

use super::to_snowflakes;
use crate::models::HashtagModel;

impl From<HashtagModel> for Hashtag {
    fn from(model: HashtagModel) -> Self {
        Hashtag {
            name: model.name,
            posts: to_snowflakes(model.posts),
        }
    }
}
