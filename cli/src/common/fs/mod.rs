//! # roledoc Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!

//! ## Overview
//!
//! Filesystem helpers shared by the rendering pipeline. Functionality lives in
//! the `io` submodule and is imported from there
//! (e.g. `crate::common::fs::io::ensure_dir_exists`).
//!

/// Directory creation, UTF-8 reads and whole-file writes.
pub mod io;
