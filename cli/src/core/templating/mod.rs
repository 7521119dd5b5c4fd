//! # roledoc Template System
//!
//! File: cli/src/core/templating/mod.rs
//!
//! ## Overview
//!
//! This module turns role data and a directory of `.j2` templates into
//! documentation files. It handles template discovery, output path planning,
//! the one-time overwrite confirmation, directory creation and rendering.
//!
//! ## Architecture
//!
//! A run follows these steps:
//! 1. Locate the templates below the template root and plan their output paths (`locator`)
//! 2. Load the role data and parse the whole template tree (`renderer`)
//! 3. Confirm overwriting existing documents once for the batch (`overwrite`)
//! 4. For each template:
//!    - ensure the destination directory exists
//!    - render it with the role data bound as both top-level keys and `role`
//!    - write the result as UTF-8, or only log it on a dry run
//!
//! Any failure aborts the run. Documents written before the failure stay in
//! place.
//!
//! ## Examples
//!
//! ```rust
//! let run = RunConfig::resolve(&config, overrides)?;
//! let data = YamlDataFile::new("role.yml");
//! let stdin = std::io::stdin();
//! let written = templating::generate_docs(&run, &data, &mut stdin.lock(), &mut std::io::stdout())?;
//! ```
//!
pub mod filters;
pub mod locator;
pub mod overwrite;
pub mod renderer;

use crate::common::fs::io;
use crate::core::config::RunConfig;
use crate::core::data::DataSource;
use crate::core::error::{Result, RoledocError};
use locator::TemplateDescriptor;
use overwrite::Decision;
use renderer::{RenderContext, TemplateRenderer};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Renders every template of `run` and returns how many documents were
/// written (or, on a dry run, would have been written).
pub fn generate_docs<R: BufRead, W: Write>(
    run: &RunConfig,
    data_source: &dyn DataSource,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    info!("Using template dir: {}", run.template_dir.display());
    info!("Using output dir: {}", run.output_dir.display());
    debug!("Exclude patterns for role file discovery: {:?}", run.exclude_files);

    let descriptors = locator::locate(&run.template_dir, &run.output_dir)?;
    let context = RenderContext::new(&data_source.get_data()?);
    let mut renderer = TemplateRenderer::new(&run.template_dir)?;

    let planned: Vec<PathBuf> = descriptors
        .iter()
        .map(|descriptor| descriptor.output_path.clone())
        .collect();
    let decision = overwrite::check_overwrites(
        &planned,
        run.force_overwrite,
        run.dry_run,
        input,
        output,
    )?;
    if decision == Decision::Abort {
        anyhow::bail!(RoledocError::UserAbort);
    }

    let mut written = 0;
    for descriptor in &descriptors {
        if write_one(&mut renderer, descriptor, &context, run)? {
            written += 1;
        }
    }
    info!("Documentation generated: {} file(s).", written);
    Ok(written)
}

/// Renders a single template to its planned output path.
///
/// Returns `false` when the template source no longer exists, which is not an error.
pub fn write_one(
    renderer: &mut TemplateRenderer,
    descriptor: &TemplateDescriptor,
    context: &RenderContext,
    run: &RunConfig,
) -> Result<bool> {
    let source_path = renderer::source_path(&run.template_dir, &descriptor.relative_path);
    debug!(
        "Writing doc output to: {} from: {}",
        descriptor.output_path.display(),
        source_path.display()
    );

    if let Some(parent) = descriptor.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            io::ensure_dir_exists(parent, run.dry_run)?;
        }
    }

    if !source_path.is_file() {
        debug!(
            "Template source disappeared, skipping: {}",
            source_path.display()
        );
        return Ok(false);
    }

    let source = io::read_utf8_file(&source_path)?;
    let rendered = renderer.render(&descriptor.relative_path, &source, context)?;

    if !run.dry_run {
        io::write_bytes_to_file(&descriptor.output_path, rendered.as_bytes())?;
    }
    info!("Writing to: {}", descriptor.output_path.display());
    Ok(true)
}
