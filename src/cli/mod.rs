//! CLI argument parsing for docvet.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Docvet: policy-based structural validator for documentation build configurations.
///
/// A `.docs.yml` file describes documentation projects: the target
/// repository, documentation sources, code sections, and locales. Docvet
/// checks such a file against the built-in policy before any build work
/// begins, reporting structural errors (fatal) and warnings (advisory).
#[derive(Parser, Debug)]
#[command(name = "docvet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse arguments from the process command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for docvet.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the `.docs.yml` of a directory against the built-in policy.
    ///
    /// Prints warnings to stderr and exits non-zero on the first fatal
    /// validation error.
    Check(CheckArgs),
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Directory containing the `.docs.yml` file to check.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Emit diagnostics as JSON, one object per line, instead of text.
    #[arg(long)]
    pub json: bool,
}
