//! User model -> entity mapper

use social_core::entities::User;
use social_core::value_objects::Snowflake;

use super::to_snowflakes;
use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            firstname: model.firstname,
            lastname: model.lastname,
            avatar: model.avatar,
            bio: model.bio,
            // the column is CHECK-constrained to known roles
            role: model.role.parse().unwrap_or_default(),
            followers: to_snowflakes(model.followers),
            following: to_snowflakes(model.following),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
