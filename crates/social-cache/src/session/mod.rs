//! Session state module.
//!
//! Provides Redis-backed storage for revoked access tokens.

mod token_denylist;

pub use token_denylist::TokenDenylist;
