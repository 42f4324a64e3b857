//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod comments;
pub mod files;
pub mod health;
pub mod posts;
pub mod users;
pub mod votes;
