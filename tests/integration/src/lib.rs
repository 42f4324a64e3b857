//! Integration test utilities for the social server
//!
//! Spawns the REST API in-process against the databases named in the
//! environment and provides request helpers and fixtures.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
