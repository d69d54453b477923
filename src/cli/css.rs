//! Css command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::sprite::build_definitions;

use super::{load_context, unknown_sprite, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the css command - write one stylesheet per sprite
pub fn run_css(config_path: Option<&Path>, sprites: Vec<String>) -> ExitCode {
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

    if definitions.is_empty() {
        eprintln!("Warning: No sprites defined");
        return ExitCode::from(EXIT_SUCCESS);
    }

    for sprite in &mut definitions {
        match sprite.write_stylesheet(&ctx) {
            Ok(path) => println!("Wrote {}", path.display()),
            Err(e) => {
                eprintln!("Error: sprite '{}': {}", sprite.name(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
