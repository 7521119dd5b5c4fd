//! # roledoc Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!

//! ## Overview
//!
//! Shared utility modules used by the core pipeline and the command handlers:
//!
//! - **`fs`**: Directory creation, UTF-8 file reads and whole-file writes, each with dry-run awareness where it mutates the filesystem.
//! - **`ui`**: Terminal prompts, injectable with any reader/writer so they can be driven from tests.
//!

/// Utilities for filesystem operations.
pub mod fs;
/// Utilities for terminal user interaction (prompts).
pub mod ui;
