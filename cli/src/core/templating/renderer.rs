//! # Template Renderer
//!
//! File: cli/src/core/templating/renderer.rs
//!
//! ## Overview
//!
//! Wraps a minijinja environment configured for documentation templates:
//!
//! - every `.j2` file below the template root is registered under its relative
//!   path, so `{% include "_partial.j2" %}`, `{% import %}` and `{% extends %}`
//!   resolve against the template tree;
//! - `trim_blocks` and `lstrip_blocks` are on, so control-flow lines leave no
//!   blank lines or indentation behind; one trailing newline is dropped;
//! - autoescaping is disabled, output is plain text;
//! - the `to_nice_yaml` and `deep_get` filters are registered;
//! - undefined values are strict: printing, iterating or testing the truth of
//!   a missing key is an error, only `is defined` may test for one.
//!
//! minijinja failures are translated into `RoledocError` variants naming the
//! template that caused them.
//!
use super::{filters, locator};
use crate::common::fs::io;
use crate::core::error::{Result, RoledocError};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior, Value as TemplateValue};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only role data bound into every render.
///
/// Templates see each top-level key directly and the whole mapping again as
/// `role`, so `{{ name }}` and `{{ role.name }}` refer to the same value.
#[derive(Debug, Clone)]
pub struct RenderContext {
    context: TemplateValue,
}

impl RenderContext {
    /// Name under which the complete role data is bound.
    pub const ROLE_ALIAS: &'static str = "role";

    pub fn new(data: &Map<String, Value>) -> Self {
        let mut bindings = data.clone();
        bindings.insert(Self::ROLE_ALIAS.to_string(), Value::Object(data.clone()));
        Self {
            context: TemplateValue::from_serialize(&bindings),
        }
    }

    fn as_value(&self) -> &TemplateValue {
        &self.context
    }
}

/// Template environment holding the whole template tree.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Loads and parses every template below `template_root`.
    pub fn new(template_root: &Path) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(false);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_debug(true);
        env.add_filter("to_nice_yaml", filters::to_nice_yaml);
        env.add_filter("deep_get", filters::deep_get);

        for name in locator::template_sources(template_root)? {
            let source = read_template_source(template_root, &name)?;
            env.add_template_owned(name.clone(), source)
                .map_err(|e| syntax_error(&name, &e))?;
            debug!("Loaded template: {}", name);
        }

        Ok(Self { env })
    }

    /// Renders `source`, registered as template `name`, against `context`.
    ///
    /// The source is re-parsed on every call, so edits made after
    /// construction are picked up.
    pub fn render(&mut self, name: &str, source: &str, context: &RenderContext) -> Result<String> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
            .map_err(|e| syntax_error(name, &e))?;
        let template = self
            .env
            .get_template(name)
            .map_err(|e| render_error(name, &e))?;
        template
            .render(context.as_value())
            .map_err(|e| render_error(name, &e))
    }
}

/// Absolute path of a template given its `/`-separated relative name.
pub fn source_path(template_root: &Path, name: &str) -> PathBuf {
    name.split('/')
        .fold(template_root.to_path_buf(), |path, segment| path.join(segment))
}

/// Reads a template file, which must be valid UTF-8.
pub fn read_template_source(template_root: &Path, name: &str) -> Result<String> {
    io::read_utf8_file(&source_path(template_root, name))
}

fn syntax_error(file: &str, err: &minijinja::Error) -> anyhow::Error {
    RoledocError::TemplateSyntax {
        file: file.to_string(),
        message: describe(err),
    }
    .into()
}

fn render_error(file: &str, err: &minijinja::Error) -> anyhow::Error {
    let message = describe(err);
    let error = match err.kind() {
        ErrorKind::UndefinedError => RoledocError::UndefinedReference {
            file: file.to_string(),
            message,
        },
        ErrorKind::SyntaxError => RoledocError::TemplateSyntax {
            file: file.to_string(),
            message,
        },
        _ => RoledocError::TemplateRender {
            file: file.to_string(),
            message,
        },
    };
    error.into()
}

/// The error, its causes and the template excerpt minijinja points at.
fn describe(err: &minijinja::Error) -> String {
    let mut lines = vec![err.to_string()];
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        lines.push(cause.to_string());
        source = cause.source();
    }
    let excerpt = err.display_debug_info().to_string();
    if !excerpt.trim().is_empty() {
        lines.push(excerpt);
    }
    lines.join("\n")
}
