//! User entity - an account with its follow graph

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum bio length in characters
pub const MAX_BIO_LENGTH: usize = 200;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::ValidationError(format!("unknown role '{other}'"))),
        }
    }
}

/// Outcome of a follow toggle between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Follow,
    Unfollow,
}

impl FollowAction {
    /// `1` for a new follow, `-1` for an unfollow
    pub fn delta(self) -> i8 {
        match self {
            Self::Follow => 1,
            Self::Unfollow => -1,
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub role: Role,
    pub followers: Vec<Snowflake>,
    pub following: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, email: String, firstname: String, lastname: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            firstname,
            lastname,
            avatar: None,
            bio: None,
            role: Role::User,
            followers: Vec::new(),
            following: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// "Firstname Lastname"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[inline]
    pub fn is_following(&self, other: Snowflake) -> bool {
        self.following.contains(&other)
    }

    #[inline]
    pub fn is_followed_by(&self, other: Snowflake) -> bool {
        self.followers.contains(&other)
    }

    /// Replace the bio. An empty or whitespace-only bio clears it.
    pub fn set_bio(&mut self, bio: Option<String>) -> Result<(), DomainError> {
        let bio = bio
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());
        if let Some(b) = &bio {
            if b.chars().count() > MAX_BIO_LENGTH {
                return Err(DomainError::ContentTooLong {
                    field: "bio",
                    max: MAX_BIO_LENGTH,
                });
            }
        }
        self.bio = bio;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Decide what toggling the follow relation from `self` to `target` does.
    ///
    /// Both sides must agree: `self.following` containing `target` and
    /// `target.followers` containing `self` are either both true or both false.
    /// Any disagreement is reported instead of repaired.
    pub fn follow_action(&self, target: &User) -> Result<FollowAction, DomainError> {
        if self.id == target.id {
            return Err(DomainError::CannotFollowSelf);
        }

        match (self.is_following(target.id), target.is_followed_by(self.id)) {
            (false, false) => Ok(FollowAction::Follow),
            (true, true) => Ok(FollowAction::Unfollow),
            _ => Err(DomainError::FollowInconsistency {
                follower: self.id,
                followee: target.id,
            }),
        }
    }

    /// Apply a follow action to both in-memory sides
    pub fn apply_follow(&mut self, target: &mut User, action: FollowAction) {
        match action {
            FollowAction::Follow => {
                if !self.is_following(target.id) {
                    self.following.push(target.id);
                }
                if !target.is_followed_by(self.id) {
                    target.followers.push(self.id);
                }
            }
            FollowAction::Unfollow => {
                self.following.retain(|id| *id != target.id);
                target.followers.retain(|id| *id != self.id);
            }
        }
        let now = Utc::now();
        self.updated_at = now;
        target.updated_at = now;
    }
}
