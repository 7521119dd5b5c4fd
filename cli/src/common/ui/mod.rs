//! # roledoc UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!

//! ## Overview
//!
//! Terminal interaction helpers. Currently this is the yes/no confirmation used
//! before existing documents are overwritten.
//!

/// Interactive confirmation prompts.
pub mod prompts;
