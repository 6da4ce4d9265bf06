//! Command-line interface implementation for scaffo.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for scaffo.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "scaffo: turn a project into a template and generate new projects from it",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Args {
    /// Path to the configuration file (JSON, or YAML for .yaml/.yml)
    #[arg(short, long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a project and write a starter configuration
    Init {
        /// Source project root
        #[arg(long, value_name = "DIR")]
        from: Option<PathBuf>,
    },

    /// Summarize the configuration and count the files a build would include
    Analyze,

    /// Convert the source project into a reusable template
    BuildTemplate {
        /// Source project root, overriding the configuration
        #[arg(long, value_name = "DIR")]
        from: Option<PathBuf>,

        /// Template output directory, overriding the configuration
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Generate a new project from a built template
    Generate {
        /// Template directory
        #[arg(long, value_name = "DIR")]
        template: Option<PathBuf>,

        /// Output directory of the new project
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        #[command(flatten)]
        values: ValueArgs,
    },

    /// Generate a new project straight from the source project
    Run {
        /// Source project root, overriding the configuration
        #[arg(long, value_name = "DIR")]
        from: Option<PathBuf>,

        /// Output directory of the new project
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        #[command(flatten)]
        values: ValueArgs,
    },

    /// Build the template, then generate a project from it
    All {
        /// Template directory, overriding the configuration
        #[arg(long, value_name = "DIR")]
        template: Option<PathBuf>,

        /// Output directory of the new project
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        #[command(flatten)]
        values: ValueArgs,
    },
}

/// Options shared by the commands that generate a project.
#[derive(clap::Args, Debug, Default)]
pub struct ValueArgs {
    /// Copy the configuration file into the generated project
    #[arg(long)]
    pub copy_config: bool,

    /// Set a variable without prompting. May be repeated.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With help text when no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    Args::parse()
}
