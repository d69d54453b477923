//! Show command implementation

use serde_json::json;
use std::path::Path;
use std::process::ExitCode;

use crate::context::BuildContext;
use crate::sprite::{build_definitions, SpriteDefinition, SpriteError};
use crate::stylesheet::Stylesheet;

use super::{load_context, unknown_sprite, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the show command - print resolved paths for each sprite
pub fn run_show(config_path: Option<&Path>, sprites: Vec<String>, json: bool) -> ExitCode {
    let ctx = match load_context(config_path, sprites) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if let Some(name) = unknown_sprite(&ctx) {
        eprintln!("Error: No sprite named '{}' in sprites.toml", name);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut definitions = match build_definitions(&ctx) {
        Ok(definitions) => definitions,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut entries = Vec::with_capacity(definitions.len());
    for sprite in &mut definitions {
        match describe(&ctx, sprite) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                eprintln!("Error: sprite '{}': {}", sprite.name(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for entry in &entries {
            println!("{}", entry["name"].as_str().unwrap_or_default());
            println!("  image:       {}", entry["image"].as_str().unwrap_or_default());
            println!("  url:         {}", entry["url"].as_str().unwrap_or_default());
            println!("  stylesheet:  {}", entry["stylesheet"].as_str().unwrap_or_default());
            println!("  orientation: {}", entry["orientation"].as_str().unwrap_or_default());
            println!("  pieces:      {}", entry["pieces"]);
            println!("  size:        {}x{}", entry["size"][0], entry["size"][1]);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Resolved facts about one sprite.
fn describe(
    ctx: &BuildContext,
    sprite: &mut SpriteDefinition,
) -> Result<serde_json::Value, SpriteError> {
    let resolution = sprite.configure_if_needed()?.clone();
    let layout = sprite.pieces().layout(sprite.orientation())?;

    Ok(json!({
        "name": sprite.name(),
        "image": resolution.full_path(ctx).display().to_string(),
        "url": resolution.css_reference(ctx),
        "stylesheet": Stylesheet::full_path(ctx, resolution.stylesheet()).display().to_string(),
        "orientation": sprite.orientation().as_str(),
        "pieces": sprite.pieces().len(),
        "size": layout.size,
    }))
}
