//! # roledoc Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the roledoc CLI and the
//! arguments they share.
//!
//! ## Commands
//!
//! - `render`: Render role documentation from templates
//! - `list`: Show which documents a template directory would produce
//!
//! Each command defines its own arguments structure and a handler function.
//!
use crate::core::config::{self, Config, Overrides, RunConfig};
use crate::core::error::Result;
use clap::Args;
use std::path::PathBuf;

/// Command to list templates and their planned outputs.
pub mod list;
/// Command to render role documentation.
pub mod render;

/// # Template Location Arguments (`LocationArgs`)
///
/// Arguments shared by every command that works on a template directory.
/// Values given here take precedence over `.roledoc.toml`.
#[derive(Args, Debug)]
pub struct LocationArgs {
    /// Directory containing the `.j2` templates.
    #[arg(long, short = 't', env = "ROLEDOC_TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,

    /// Directory the documents are written to. Defaults to the current directory.
    #[arg(long, short = 'o', env = "ROLEDOC_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file to use instead of searching for `.roledoc.toml`.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

impl LocationArgs {
    /// Loads configuration and resolves it with these arguments and the given flags.
    pub fn resolve(&self, force_overwrite: bool, dry_run: bool) -> Result<RunConfig> {
        let loaded: Config = config::load_config(self.config.as_deref())?;
        RunConfig::resolve(
            &loaded,
            Overrides {
                template_dir: self.template_dir.clone(),
                output_dir: self.output_dir.clone(),
                force_overwrite,
                dry_run,
            },
        )
    }
}
