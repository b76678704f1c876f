// CLI module - Command line interface and argument parsing
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod host_args;
mod serve_args;

pub use host_args::{CheckArgs, RegisterArgs, ShowArgs};
pub use serve_args::ServeArgs;

/// SSL Deadline Checker - track TLS certificate expiry and warn before it lapses
#[derive(Parser, Debug, Clone)]
#[command(name = "ssl-deadline", version, about, long_about = None)]
pub struct Args {
    /// Configuration file (TOML format)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Registry database url (`sqlite://...`, `postgres://...` or `memory`)
    #[arg(long = "database-url", value_name = "URL", global = true)]
    pub database_url: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long = "print-config", global = true)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Operational modes
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the JSON API server
    Serve(ServeArgs),

    /// Probe a hostname and add it to the registry
    Register(RegisterArgs),

    /// Recheck one registered hostname, or `all`
    Check(CheckArgs),

    /// List registered hostnames with their last result
    List,

    /// Show one registered hostname
    Show(ShowArgs),
}
