//! Sprites - sprite sheet definitions for a build-time asset pipeline
//!
//! This library provides functionality to:
//! - Declare named sprites and resolve their output image and stylesheet paths
//! - Register pieces and lay them out along the sprite's orientation
//! - Render and write stylesheets mapping each piece to a background offset
//! - Load sprite manifests from `sprites.toml`

pub mod cli;
pub mod config;
pub mod context;
pub mod output;
pub mod pieces;
pub mod sprite;
pub mod stylesheet;
