//! scaffo converts an existing project into a reusable, parameterized template
//! and generates new projects from that template (or directly from the source)
//! by substituting variable values into file contents, file names and
//! directory names.

/// Build pipeline: source tree to template tree plus metadata
pub mod build;

/// Command-line interface module for the scaffo application
pub mod cli;

/// `init` and `analyze` commands
pub mod commands;

/// Configuration model, defaults, and JSON/YAML loading
pub mod config;

/// Built-in pattern tables, reserved file names and defaults
pub mod constants;

/// Error types and handling for the scaffo application
pub mod error;

/// Generate pipelines: template to project, and source to project (`run`)
pub mod generate;

/// Ignore, static and include classification
/// Processes .scaffoldignore files to exclude specific paths
pub mod ignore;

/// Template metadata written next to a built template
pub mod metadata;

/// File walking, binary detection and permission-preserving writes
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Whole-segment path renaming
pub mod rename;

/// Token substitution and literal replacements
pub mod renderer;

/// Variable resolution with overrides, prompts, dependencies and transforms
pub mod resolver;

/// Naming-convention variations between project names
pub mod variations;
