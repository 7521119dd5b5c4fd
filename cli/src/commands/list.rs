//! # roledoc List Command
//!
//! File: cli/src/commands/list.rs
//!
//! ## Overview
//!
//! This module implements `roledoc list`, which shows the documents a
//! template directory would produce without rendering anything. Private
//! templates (leading `_`) are not listed since they never produce output.
//!
//! Example output:
//!
//! ```
//! Templates in 'templates':
//!
//! README.md.j2      -> ./README.md (exists)
//! docs/vars.md.j2   -> ./docs/vars.md
//!
//! Found 2 template(s), 1 existing document(s) would be overwritten.
//! ```
//!
use super::LocationArgs;
use crate::core::error::Result;
use crate::core::templating::locator::{self, TemplateDescriptor};
use crate::core::templating::overwrite;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// # List Arguments (`ListArgs`)
#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

/// # Handle List Command (`handle_list`)
///
/// Locates the templates of the configured directory and prints each one with
/// its planned output path, marking outputs that already exist.
pub fn handle_list(args: ListArgs) -> Result<()> {
    info!("Handling list command...");
    let run = args.location.resolve(false, true)?;

    let descriptors = locator::locate(&run.template_dir, &run.output_dir)?;
    let planned: Vec<PathBuf> = descriptors.iter().map(|d| d.output_path.clone()).collect();
    let existing = overwrite::find_existing(&planned);

    println!("Templates in '{}':\n", run.template_dir.display());
    if descriptors.is_empty() {
        println!("  (none)");
    }
    for line in format_listing(&descriptors, &existing) {
        println!("{}", line);
    }
    println!(
        "\nFound {} template(s), {} existing document(s) would be overwritten.",
        descriptors.len(),
        existing.len()
    );
    Ok(())
}

/// One aligned line per template.
fn format_listing(descriptors: &[TemplateDescriptor], existing: &[PathBuf]) -> Vec<String> {
    let width = descriptors
        .iter()
        .map(|d| d.relative_path.len())
        .max()
        .unwrap_or(0);
    descriptors
        .iter()
        .map(|d| {
            let marker = if existing.contains(&d.output_path) {
                " (exists)"
            } else {
                ""
            };
            format!(
                "{:<width$} -> {}{}",
                d.relative_path,
                d.output_path.display(),
                marker,
                width = width
            )
        })
        .collect()
}
