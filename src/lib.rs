//! # Treegen - Project Outlines That Respect Your Ignore Rules
//!
//! Treegen walks a project directory and writes an indented outline of its
//! folders and files into the project's docs directory, honoring layered
//! ignore rules: `.gitignore`, a tool-specific exclude file, and a
//! tool-specific include file that can override exclusions.
//!
//! ## Features
//!
//! - **Deterministic output**: directories before files, byte-order sorted,
//!   identical trees always render identically
//! - **Layered rules**: gitignore-dialect patterns from `.gitignore` and
//!   `.treegen_ignore`, overridable via `.treegen_include`
//! - **Resilient walking**: unreadable directories and entries are logged
//!   and skipped, never fatal to the whole render
//! - **Zero-config**: sensible defaults, optional `treegen.yml` overrides
//!
//! ## Quick Start
//!
//! ```bash
//! # Scaffold the docs layout and default rule files
//! treegen init
//!
//! # Render docs/project_structure.txt
//! treegen generate
//! ```

pub mod cli;
pub mod config;
pub mod logging;
pub mod rules;
pub mod tree;
pub mod workspace;

pub use cli::{Cli, Output};
pub use config::TreegenConfig;

/// Result type alias for treegen operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
