//! # roledoc Render Command
//!
//! File: cli/src/commands/render.rs
//!
//! ## Overview
//!
//! This module implements `roledoc render`, which renders every public `.j2`
//! template of the template directory against a role data file and writes the
//! results below the output directory.
//!
//! ## Examples
//!
//! ```bash
//! roledoc render --data role.yml --template-dir templates/readme --output-dir .
//! roledoc -v render --data role.yml -t templates --dry-run
//! ```
//!
//! Existing documents trigger a single confirmation prompt on stdin unless
//! `--force` or `--dry-run` is given.
//!
use super::LocationArgs;
use crate::core::data::YamlDataFile;
use crate::core::error::Result;
use crate::core::templating;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;

/// # Render Arguments (`RenderArgs`)
///
/// Arguments accepted by `roledoc render`.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// YAML file holding the role data exposed to templates.
    #[arg(long, short = 'd')]
    pub data: PathBuf,

    #[command(flatten)]
    pub location: LocationArgs,

    /// Overwrite existing documents without asking.
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Log what would be created or written without touching the filesystem.
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

/// # Handle Render Command (`handle_render`)
///
/// Resolves the run configuration, then hands the role data file and the
/// process's stdin/stdout to [`templating::generate_docs`].
///
/// ## Returns
///
/// * `Ok(())` once every document was written (or logged, on a dry run).
/// * `Err` on configuration problems, unreadable data, template errors or
///   when the user declines the overwrite prompt.
pub fn handle_render(args: RenderArgs) -> Result<()> {
    info!("Handling render command...");
    let run = args.location.resolve(args.force, args.dry_run)?;

    let data = YamlDataFile::new(&args.data);
    info!("Reading role data from: {}", data.path().display());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let written = templating::generate_docs(&run, &data, &mut input, &mut output)?;

    if run.dry_run {
        println!("Dry run: {} document(s) would be written.", written);
    } else {
        println!(
            "Rendered {} document(s) into '{}'.",
            written,
            run.output_dir.display()
        );
    }
    Ok(())
}
