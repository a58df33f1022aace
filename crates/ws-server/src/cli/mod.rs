use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `wsreg` binary.
#[derive(Debug, Parser)]
#[command(name = "wsreg", version, about = "Workshop registration service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Extra TOML config file, layered over wsreg.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,

        /// Keep spreadsheets in memory instead of Google Sheets
        #[arg(long)]
        in_memory: bool,
    },

    /// Check a registrant against a workshop's member roster
    Check {
        /// Workshop slug
        #[arg(short, long)]
        workshop: String,

        #[arg(short, long)]
        email: String,

        /// Full name as typed in the form
        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, default_value = "")]
        phone: String,
    },

    /// List active workshops
    Workshops,

    /// Print a workshop's settings sheet
    Settings {
        /// Workshop slug
        #[arg(short, long)]
        workshop: String,
    },
}
