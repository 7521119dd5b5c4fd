//! # roledoc Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core components of roledoc:
//! - `config`: Configuration loading, merging, validation and resolution into a `RunConfig`
//! - `data`: The `DataSource` seam through which role data reaches the renderer
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Template discovery, overwrite confirmation and rendering
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config::{self, RunConfig};
//! use crate::core::data::YamlDataFile;
//! use crate::core::error::{Result, RoledocError};
//! use crate::core::templating;
//! ```
//!
pub mod config;
pub mod data;
pub mod error;
pub mod templating;
