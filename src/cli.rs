//! CLI definitions for Extensa.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Extensa CLI.
#[derive(Parser)]
#[command(name = "extensa")]
#[command(about = "Resolve named extensions declared in configuration")]
#[command(version)]
pub(crate) struct Cli {
    /// Kernel configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Greet through the default user service
    Default {
        /// Message passed to the service
        #[arg(default_value = "1")]
        message: String,
    },

    /// Greet through a named user service
    Get {
        /// Extension name, or "default"
        name: String,

        /// Message passed to the service
        #[arg(default_value = "2")]
        message: String,
    },

    /// List configured user services
    List,
}
