//! # Template Discovery and Output Planning
//!
//! File: cli/src/core/templating/locator.rs
//!
//! ## Overview
//!
//! Finds the `.j2` templates below a template root and maps each one to the
//! document it produces under the output root:
//!
//! ```text
//! templates/README.md.j2        ->  <output>/README.md
//! templates/docs/vars.md.j2     ->  <output>/docs/vars.md
//! templates/_macros.j2          ->  (fragment, no output)
//! ```
//!
//! Files whose name starts with `_` are private fragments: they can be
//! included or imported by other templates but never produce a document of
//! their own. Hidden files and directories are not visited; symlinked
//! templates and directories are followed.
//!
use crate::core::error::{Result, RoledocError};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// File name suffix that marks a template.
pub const TEMPLATE_EXTENSION: &str = ".j2";
/// Leading character of private template fragments.
pub const PRIVATE_MARKER: char = '_';

/// A template that produces a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Path relative to the template root, `/`-separated.
    pub relative_path: String,
    /// Destination of the rendered document.
    pub output_path: PathBuf,
}

/// Returns every non-private template below `root`, with its planned output path.
///
/// Entries are walked in file-name order so repeated runs see the same sequence.
pub fn locate(root: &Path, output_root: &Path) -> Result<Vec<TemplateDescriptor>> {
    let mut descriptors = Vec::new();
    for relative_path in template_sources(root)? {
        if is_private(&relative_path) {
            debug!("Ignoring template file: {}", relative_path);
            continue;
        }
        debug!("Found template file: {}", relative_path);
        let output_path = plan_output_path(&relative_path, output_root);
        descriptors.push(TemplateDescriptor {
            relative_path,
            output_path,
        });
    }
    Ok(descriptors)
}

/// Returns the relative paths of all templates below `root`, private fragments included.
pub fn template_sources(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        anyhow::bail!(RoledocError::FileSystem(format!(
            "Template directory not found or not a directory: {}",
            root.display()
        )));
    }

    let mut sources = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
    for entry_result in walker {
        let entry = entry_result.with_context(|| {
            format!("Failed to read template directory '{}'", root.display())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !file_name.ends_with(TEMPLATE_EXTENSION) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).with_context(|| {
            format!(
                "Could not determine relative path for '{}'",
                entry.path().display()
            )
        })?;
        sources.push(to_posix(relative));
    }
    Ok(sources)
}

/// Maps a template's relative path to its document path under `output_root`.
///
/// Exactly one `.j2` suffix is removed: `a.conf.j2` becomes `a.conf`.
pub fn plan_output_path(relative_path: &str, output_root: &Path) -> PathBuf {
    let stripped = relative_path
        .strip_suffix(TEMPLATE_EXTENSION)
        .unwrap_or(relative_path);
    stripped
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(output_root.to_path_buf(), |path, segment| path.join(segment))
}

fn is_private(relative_path: &str) -> bool {
    let base_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    base_name.starts_with(PRIVATE_MARKER)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn to_posix(relative: &Path) -> String {
    relative
        .components()
        .map(|comp| comp.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_plan_strips_one_extension() {
        let out = Path::new("/out");
        assert_eq!(plan_output_path("readme.j2", out), PathBuf::from("/out/readme"));
        assert_eq!(
            plan_output_path("a.conf.j2", out),
            PathBuf::from("/out/a.conf")
        );
        assert_eq!(
            plan_output_path("x.j2.j2", out),
            PathBuf::from("/out/x.j2")
        );
        assert_eq!(
            plan_output_path("docs/sub/vars.md.j2", out),
            PathBuf::from("/out/docs/sub/vars.md")
        );
    }

    #[test]
    fn test_plan_is_deterministic() {
        let out = Path::new("build/docs");
        assert_eq!(
            plan_output_path("README.md.j2", out),
            plan_output_path("README.md.j2", out)
        );
        assert!(plan_output_path("README.md.j2", out).starts_with(out));
    }

    #[test]
    fn test_locate_skips_private_and_non_templates() -> Result<()> {
        let root = tempdir()?;
        create_file(&root.path().join("README.md.j2"), "{{ role.name }}");
        create_file(&root.path().join("_partial.j2"), "partial");
        create_file(&root.path().join("docs/vars.md.j2"), "vars");
        create_file(&root.path().join("docs/_macros.j2"), "macros");
        create_file(&root.path().join("notes.txt"), "not a template");

        let descriptors = locate(root.path(), Path::new("/out"))?;
        let names: Vec<&str> = descriptors
            .iter()
            .map(|d| d.relative_path.as_str())
            .collect();
        assert_eq!(names, vec!["README.md.j2", "docs/vars.md.j2"]);
        assert!(descriptors
            .iter()
            .all(|d| !d.relative_path.rsplit('/').next().unwrap().starts_with('_')));
        assert_eq!(
            descriptors[1].output_path,
            PathBuf::from("/out/docs/vars.md")
        );
        Ok(())
    }

    #[test]
    fn test_private_directory_name_does_not_hide_templates() -> Result<()> {
        let root = tempdir()?;
        create_file(&root.path().join("_shared/index.md.j2"), "x");

        let descriptors = locate(root.path(), Path::new("out"))?;
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].relative_path, "_shared/index.md.j2");
        Ok(())
    }

    #[test]
    fn test_template_sources_include_fragments_but_not_hidden() -> Result<()> {
        let root = tempdir()?;
        create_file(&root.path().join("readme.j2"), "r");
        create_file(&root.path().join("_partial.j2"), "p");
        create_file(&root.path().join(".git/HEAD.j2"), "hidden");
        create_file(&root.path().join(".draft.j2"), "hidden");

        let sources = template_sources(root.path())?;
        assert_eq!(sources, vec!["_partial.j2", "readme.j2"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_follows_symlinked_templates() -> Result<()> {
        let shared = tempdir()?;
        let root = tempdir()?;
        fs::write(shared.path().join("readme.j2"), "x")?;
        fs::create_dir(shared.path().join("docs"))?;
        fs::write(shared.path().join("docs/vars.md.j2"), "y")?;
        std::os::unix::fs::symlink(shared.path().join("readme.j2"), root.path().join("readme.j2"))?;
        std::os::unix::fs::symlink(shared.path().join("docs"), root.path().join("docs"))?;

        let found: Vec<String> = locate(root.path(), Path::new("out"))?
            .into_iter()
            .map(|d| d.relative_path)
            .collect();
        assert_eq!(found, vec!["docs/vars.md.j2", "readme.j2"]);
        Ok(())
    }

    #[test]
    fn test_locate_missing_root_fails() {
        let root = tempdir().unwrap();
        let missing = root.path().join("missing");
        let err = locate(&missing, Path::new("out")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RoledocError>(),
            Some(RoledocError::FileSystem(_))
        ));
    }

    #[test]
    fn test_locate_empty_root() -> Result<()> {
        let root = tempdir()?;
        assert!(locate(root.path(), Path::new("out"))?.is_empty());
        Ok(())
    }
}
