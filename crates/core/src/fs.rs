//! Filesystem utilities

use std::fs::File;
use std::path::Path;

use log::error;

/// Check if a path is a regular file
pub fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Check that a path is a regular file this process can open for reading
///
/// Logs the reason when the file exists but cannot be opened.
pub fn is_readable_file(path: &str) -> bool {
    if !is_file(path) {
        return false;
    }

    match File::open(path) {
        Ok(_) => true,
        Err(e) => {
            error!("Failed to open {}: {}", path, e);
            false
        }
    }
}
