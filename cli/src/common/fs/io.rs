//! # roledoc Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!

//! ## Overview
//!
//! This module centralizes the filesystem operations of a documentation run:
//! creating destination directories, reading template sources and writing
//! rendered documents.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory and any missing parents (`fs::create_dir_all`). On a dry run it only logs the directory it would create. An existing path that is not a directory is an error.
//! - **`read_utf8_file`**: Reads a file and decodes it as UTF-8. Undecodable content is reported as an encoding error rather than an I/O error.
//! - **`write_bytes_to_file`**: Writes a whole file in one call, replacing any previous content.
//!
//! All I/O errors carry the offending path through `anyhow::Context`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(Path::new("docs/roles"), run.dry_run)?;
//! let source = io::read_utf8_file(Path::new("templates/README.md.j2"))?;
//! io::write_bytes_to_file(Path::new("docs/roles/README.md"), rendered.as_bytes())?;
//! ```
//!
use crate::core::error::{Result, RoledocError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist it is created together with any missing parent
/// directories, unless `dry_run` is set, in which case the intended creation
/// is only logged.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path, dry_run: bool) -> Result<()> {
    if path.is_dir() {
        debug!("Directory already exists: {}", path.display());
        return Ok(());
    }
    if path.exists() {
        anyhow::bail!(RoledocError::FileSystem(format!(
            "Path exists but is not a directory: {}",
            path.display()
        )));
    }
    if dry_run {
        info!("Creating dir: {}", path.display());
        return Ok(());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory {}", path.display()))?;
    debug!("Created directory: {}", path.display());
    Ok(())
}

/// Reads the entire content of a file as UTF-8 text.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be read, or a `RoledocError::Encoding`
/// if its content is not valid UTF-8.
pub fn read_utf8_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))?;
    String::from_utf8(bytes).map_err(|e| {
        anyhow::anyhow!(RoledocError::Encoding(format!(
            "File '{}' is not valid UTF-8: {}",
            path.display(),
            e.utf8_error()
        )))
    })
}

/// Writes `content` to `path`, replacing the file if it exists.
///
/// The parent directory must already exist.
pub fn write_bytes_to_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write to file {}", path.display()))
}
