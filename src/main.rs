//! Sprites - command-line tool for resolving sprite sheets and writing their stylesheets

use std::process::ExitCode;

use sprites::cli;

fn main() -> ExitCode {
    cli::run()
}
