//! Error handling for scaffo.
//! Defines the error type and result alias used by every pipeline stage.

use std::io;
use thiserror::Error;

/// Custom error types for scaffo operations.
///
/// Every variant is fatal to the current command. Best-effort steps (copying
/// the configuration file into a generated project) log a warning instead of
/// producing one of these.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised while walking a source or template tree
    #[error("Failed to traverse directory: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Failed to parse JSON: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// Represents errors that occur during configuration loading or validation
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The template metadata file is missing or unreadable
    #[error("Template metadata in '{template_dir}' is missing or invalid: {reason}. Ensure you ran build-template before generate.")]
    MetadataError { template_dir: String, reason: String },

    /// A required variable has no override, input, dependency value or default
    #[error("Missing value for variable '{name}'.")]
    MissingValueError { name: String },

    /// A variable declares `from` pointing to a variable that does not exist
    #[error("Variable '{name}' depends on unknown variable '{from}'.")]
    UnknownSourceVariableError { name: String, from: String },

    /// The generated project would overwrite an existing path
    #[error("Output path '{output_dir}' already exists.")]
    OutputDirectoryExistsError { output_dir: String },

    /// Represents failures of the interactive prompt backend
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// A path could not be represented as UTF-8 or made relative to its root
    #[error("Invalid path: {0}.")]
    InvalidPathError(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
