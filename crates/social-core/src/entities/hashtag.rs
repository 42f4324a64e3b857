//! Hashtag entity - index entry from a tag to the posts that use it

use crate::value_objects::Snowflake;

/// Hashtag index entry. `name` is lowercase and carries no `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hashtag {
    pub name: String,
    pub posts: Vec<Snowflake>,
}

impl Hashtag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            posts: Vec::new(),
        }
    }

    /// Record a post under this tag. Returns false if it was already there.
    pub fn attach(&mut self, post_id: Snowflake) -> bool {
        if self.posts.contains(&post_id) {
            return false;
        }
        self.posts.push(post_id);
        true
    }

    pub fn detach(&mut self, post_id: Snowflake) {
        self.posts.retain(|id| *id != post_id);
    }
}
