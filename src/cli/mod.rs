//! CLI argument definitions for vxc.

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::NotebookType;

/// vxc - Inspect vxcore configuration and session state.
///
/// Start with `vxc paths` to see where files are read from.
#[derive(Parser, Debug)]
#[command(name = "vxc")]
#[command(author, version, about = "Inspect vxcore configuration and session state", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Use a throwaway sandbox instead of the real data directories.
    /// Packaged defaults are still read from next to the executable.
    #[arg(
        long = "test-mode",
        global = true,
        env = "VXCORE_TEST_MODE",
        value_parser = BoolishValueParser::new()
    )]
    pub test_mode: bool,

    /// Log filter directive (e.g. `debug`, `vxcore=trace`).
    /// Takes precedence over the VXCORE_LOG environment variable.
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show resolved directories and config file locations
    Paths,

    /// Show the effective configuration (packaged defaults merged with user overrides)
    Config,

    /// Session state commands
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// List open notebooks
    List,

    /// Add a notebook to the session and save it
    Add {
        /// Root folder of the notebook (must exist)
        root: PathBuf,

        /// Notebook layout: bundled or raw
        #[arg(long = "type", default_value = "bundled", value_parser = parse_notebook_type)]
        notebook_type: NotebookType,
    },

    /// Remove a notebook from the session and save it
    Remove {
        /// Notebook ID (e.g., nb-3f2a9c01b7de)
        id: String,
    },
}

fn parse_notebook_type(s: &str) -> Result<NotebookType, String> {
    NotebookType::parse(s).ok_or_else(|| format!("unknown notebook type '{}' (expected bundled or raw)", s))
}
