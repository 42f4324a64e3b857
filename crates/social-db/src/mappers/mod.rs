//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects; the
//! helpers below convert ID arrays in both directions.

mod comment;
mod hashtag;
mod post;
mod upload;
mod user;

use social_core::Snowflake;

/// `BIGINT[]` column values to IDs
pub fn to_snowflakes(ids: Vec<i64>) -> Vec<Snowflake> {
    ids.into_iter().map(Snowflake::new).collect()
}

/// IDs to a bindable `BIGINT[]` value
pub fn to_i64s(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}
