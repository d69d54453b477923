//! Configuration module for the sprite pipeline
//!
//! Provides types and parsing for `sprites.toml` manifests.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
