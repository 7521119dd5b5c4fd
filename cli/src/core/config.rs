//! # roledoc Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates roledoc configuration, and resolves
//! it together with command-line flags into the `RunConfig` that every pipeline
//! component receives by reference.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`--template-dir`, `--output-dir`, `--force`, `--dry-run`)
//! 2. An explicit `--config <FILE>`, or else a project-specific `.roledoc.toml`
//!    in the current directory or its ancestors (the search stops at `.git`)
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Paths are expanded (`~` to the home directory) before validation.
//!
//! ## Examples
//!
//! ```toml
//! # .roledoc.toml
//! template_dir = "~/roledoc/templates/readme"
//! output_dir = "docs"
//! force_overwrite = false
//! exclude_files = ["molecule/", "*.bak"]
//! ```
//!
//! ```rust
//! let cfg = config::load_config(args.config.as_deref())?;
//! let run = RunConfig::resolve(&cfg, overrides)?;
//! ```
//!
use crate::core::error::{Result, RoledocError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Configuration as read from a TOML file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root directory of the `.j2` templates (can use ~).
    pub template_dir: Option<String>,
    /// Directory the rendered documents are written to (can use ~).
    pub output_dir: Option<String>,
    /// Overwrite existing documents without asking.
    #[serde(default)]
    pub force_overwrite: bool,
    /// Report intended changes without touching the filesystem.
    #[serde(default)]
    pub dry_run: bool,
    /// gitignore-style patterns for role files that should not be scanned.
    #[serde(default)]
    pub exclude_files: Vec<String>,
}

/// Settings given on the command line; `None`/`false` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub template_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub force_overwrite: bool,
    pub dry_run: bool,
}

/// The resolved, read-only settings of a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub force_overwrite: bool,
    pub dry_run: bool,
    pub exclude_files: Vec<String>,
}

impl RunConfig {
    /// Combines the loaded configuration with command-line overrides.
    ///
    /// Fails when no template directory is configured anywhere. The output
    /// directory defaults to the current working directory.
    pub fn resolve(config: &Config, overrides: Overrides) -> Result<Self> {
        let template_dir = overrides
            .template_dir
            .or_else(|| config.template_dir.as_ref().map(PathBuf::from))
            .ok_or_else(|| {
                anyhow!(RoledocError::Config(
                    "No template directory configured. Use --template-dir or set \
                     'template_dir' in .roledoc.toml."
                        .to_string()
                ))
            })?;
        let output_dir = overrides
            .output_dir
            .or_else(|| config.output_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(RunConfig {
            template_dir,
            output_dir,
            force_overwrite: overrides.force_overwrite || config.force_overwrite,
            dry_run: overrides.dry_run || config.dry_run,
            exclude_files: config.exclude_files.clone(),
        })
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".roledoc.toml";

/// Loads user and project configuration, merges, expands and validates it.
///
/// When `explicit` is given it replaces the project configuration lookup and
/// must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => load_project_config()?,
    };
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("org", "roledoc", "roledoc") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(path) = find_project_config_path(&current_dir) {
        info!("Loading project configuration from: {}", path.display());
        load_config_from_path(&path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
        Ok(None)
    }
}

/// Searches `start` and its ancestors for `.roledoc.toml`, stopping at the
/// first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        template_dir: project.template_dir.or(user.template_dir),
        output_dir: project.output_dir.or(user.output_dir),
        force_overwrite: project.force_overwrite || user.force_overwrite,
        dry_run: project.dry_run || user.dry_run,
        exclude_files: if project.exclude_files.is_empty() {
            user.exclude_files
        } else {
            project.exclude_files
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    for dir in [&mut config.template_dir, &mut config.output_dir]
        .into_iter()
        .flatten()
    {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded configured path: {}", dir);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(template_dir) = &config.template_dir {
        let path = Path::new(template_dir);
        if path.exists() && !path.is_dir() {
            return Err(anyhow!(RoledocError::Config(format!(
                "Configured template path '{}' exists but is not a directory.",
                path.display()
            ))));
        }
    }
    if let Some(output_dir) = &config.output_dir {
        let path = Path::new(output_dir);
        if path.exists() && !path.is_dir() {
            return Err(anyhow!(RoledocError::Config(format!(
                "Configured output path '{}' exists but is not a directory.",
                path.display()
            ))));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            template_dir = "~/templates/readme"
            output_dir = "docs"
            force_overwrite = true
            exclude_files = ["molecule/"]
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.template_dir.as_deref(), Some("~/templates/readme")); // Not yet expanded
        assert_eq!(config.output_dir.as_deref(), Some("docs"));
        assert!(config.force_overwrite);
        assert!(!config.dry_run); // Default
        assert_eq!(config.exclude_files, vec!["molecule/"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("templates = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_prefers_project_values() {
        let user = Config {
            template_dir: Some("/user/templates".into()),
            output_dir: Some("/user/out".into()),
            exclude_files: vec!["user/".into()],
            ..Default::default()
        };
        let project = Config {
            output_dir: Some("docs".into()),
            ..Default::default()
        };

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.template_dir.as_deref(), Some("/user/templates"));
        assert_eq!(merged.output_dir.as_deref(), Some("docs"));
        assert_eq!(merged.exclude_files, vec!["user/"]);
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            template_dir: Some("~/tpl".into()),
            output_dir: Some("/absolute/out".into()),
            ..Default::default()
        };
        expand_config_paths(&mut config);

        let expected = shellexpand::tilde("~/tpl").into_owned();
        assert_eq!(config.template_dir.as_deref(), Some(expected.as_str()));
        assert_eq!(config.output_dir.as_deref(), Some("/absolute/out")); // Absolute path unchanged
    }

    #[test]
    fn test_validate_template_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let config = Config {
            template_dir: Some(file_path.to_string_lossy().to_string()),
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }

    #[test]
    fn test_find_project_config_in_ancestor() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("roles/web/tasks");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("roles").join(PROJECT_CONFIG_FILENAME), "").unwrap();

        let found = find_project_config_path(&nested);
        assert_eq!(
            found,
            Some(temp_dir.path().join("roles").join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert_eq!(find_project_config_path(&repo), None);
    }

    #[test]
    fn test_resolve_overrides_win() -> Result<()> {
        let config = Config {
            template_dir: Some("/cfg/templates".into()),
            output_dir: Some("/cfg/out".into()),
            exclude_files: vec!["*.bak".into()],
            ..Default::default()
        };
        let run = RunConfig::resolve(
            &config,
            Overrides {
                template_dir: Some(PathBuf::from("/cli/templates")),
                dry_run: true,
                ..Default::default()
            },
        )?;

        assert_eq!(run.template_dir, PathBuf::from("/cli/templates"));
        assert_eq!(run.output_dir, PathBuf::from("/cfg/out"));
        assert!(run.dry_run);
        assert!(!run.force_overwrite);
        assert_eq!(run.exclude_files, vec!["*.bak"]);
        Ok(())
    }

    #[test]
    fn test_resolve_requires_template_dir() {
        let result = RunConfig::resolve(&Config::default(), Overrides::default());
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RoledocError>(),
            Some(RoledocError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_output_defaults_to_current_dir() -> Result<()> {
        let config = Config {
            template_dir: Some("/t".into()),
            ..Default::default()
        };
        let run = RunConfig::resolve(&config, Overrides::default())?;
        assert_eq!(run.output_dir, PathBuf::from("."));
        Ok(())
    }
}
