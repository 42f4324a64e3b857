//! Post entity - a captioned set of images

use chrono::{DateTime, Utc};

use crate::entities::User;
use crate::error::DomainError;
use crate::value_objects::{extract_hashtags, Snowflake};

/// Maximum caption length in characters
pub const MAX_CAPTION_LENGTH: usize = 2200;

/// What toggling a vote does for a given user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Add,
    Remove,
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub caption: String,
    pub images: Vec<String>,
    pub created_by: Snowflake,
    pub tags: Vec<String>,
    pub votes: Vec<Snowflake>,
    pub is_blacklisted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post; tags are derived from the caption.
    pub fn new(
        id: Snowflake,
        created_by: Snowflake,
        caption: String,
        images: Vec<String>,
    ) -> Result<Self, DomainError> {
        let caption = validate_caption(caption)?;
        let now = Utc::now();
        Ok(Self {
            id,
            tags: extract_hashtags(&caption),
            caption,
            images,
            created_by,
            votes: Vec::new(),
            is_blacklisted: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the caption and re-derive tags.
    ///
    /// Returns `(added, removed)` tags so the hashtag index can follow.
    pub fn set_caption(
        &mut self,
        caption: String,
    ) -> Result<(Vec<String>, Vec<String>), DomainError> {
        let caption = validate_caption(caption)?;
        let tags = extract_hashtags(&caption);

        let added = tags
            .iter()
            .filter(|t| !self.tags.contains(t))
            .cloned()
            .collect();
        let removed = self
            .tags
            .iter()
            .filter(|t| !tags.contains(t))
            .cloned()
            .collect();

        self.caption = caption;
        self.tags = tags;
        self.updated_at = Utc::now();
        Ok((added, removed))
    }

    #[inline]
    pub fn has_voted(&self, user_id: Snowflake) -> bool {
        self.votes.contains(&user_id)
    }

    /// What a vote toggle by `user_id` would do
    pub fn vote_action(&self, user_id: Snowflake) -> VoteAction {
        if self.has_voted(user_id) {
            VoteAction::Remove
        } else {
            VoteAction::Add
        }
    }

    /// Toggle `user_id` in the votes set
    pub fn toggle_vote(&mut self, user_id: Snowflake) -> VoteAction {
        let action = self.vote_action(user_id);
        match action {
            VoteAction::Add => self.votes.push(user_id),
            VoteAction::Remove => self.votes.retain(|id| *id != user_id),
        }
        action
    }

    #[inline]
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Only the creator may edit a post
    #[inline]
    pub fn can_be_modified_by(&self, user: &User) -> bool {
        self.created_by == user.id
    }

    /// The creator or an admin may delete a post
    #[inline]
    pub fn can_be_deleted_by(&self, user: &User) -> bool {
        self.created_by == user.id || user.is_admin()
    }
}

fn validate_caption(caption: String) -> Result<String, DomainError> {
    let caption = caption.trim().to_string();
    if caption.is_empty() {
        return Err(DomainError::ValidationError(
            "caption is required".to_string(),
        ));
    }
    if caption.chars().count() > MAX_CAPTION_LENGTH {
        return Err(DomainError::ContentTooLong {
            field: "caption",
            max: MAX_CAPTION_LENGTH,
        });
    }
    Ok(caption)
}
