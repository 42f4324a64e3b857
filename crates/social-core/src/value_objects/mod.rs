//! Value objects - immutable types that represent domain concepts

mod hashtag;
mod snowflake;

pub use hashtag::{extract_hashtags, normalize_tag};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
