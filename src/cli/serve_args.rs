// API server arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::Args;

/// API server options; unset values fall back to the configuration file
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Listen port
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Recheck every registered host on this interval (seconds)
    #[arg(long = "recheck-interval", value_name = "SECONDS")]
    pub recheck_interval: Option<u64>,
}
