//! File output for generated assets

use std::fs;
use std::io;
use std::path::Path;

/// Write `contents` to `path`, replacing any existing file.
///
/// Missing parent directories are created first.
pub fn write_output(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, contents)
}
