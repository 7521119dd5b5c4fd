//! # Overwrite Confirmation
//!
//! File: cli/src/core/templating/overwrite.rs
//!
//! Before any document is written, the planned output paths that already exist
//! are collected and, unless the run is forced or a dry run, the user confirms
//! once for the whole batch. Input and output are injected so the prompt can
//! be driven without a terminal.
//!
use crate::common::ui::prompts;
use crate::core::error::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Outcome of the overwrite check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Abort,
}

/// Planned output paths that already exist as files, in planning order.
pub fn find_existing(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().filter(|path| path.is_file()).cloned().collect()
}

/// Asks once whether existing documents may be overwritten.
///
/// Proceeds without asking when nothing would be overwritten, when `force` is
/// set, or on a dry run. Otherwise prints the affected paths to `output` and
/// reads the answer from `input`; anything but an affirmative answer aborts.
pub fn check_overwrites<R: BufRead, W: Write>(
    paths: &[PathBuf],
    force: bool,
    dry_run: bool,
    input: &mut R,
    output: &mut W,
) -> Result<Decision> {
    let existing = find_existing(paths);
    if existing.is_empty() {
        return Ok(Decision::Proceed);
    }
    if force || dry_run {
        debug!(
            "{} existing file(s) will be overwritten without confirmation (force: {}, dry run: {})",
            existing.len(),
            force,
            dry_run
        );
        return Ok(Decision::Proceed);
    }

    warn!("These files will be overwritten:");
    for path in &existing {
        writeln!(output, "{}", path.display())?;
    }

    if prompts::confirm("Do you want to continue?", input, output)? {
        Ok(Decision::Proceed)
    } else {
        Ok(Decision::Abort)
    }
}
