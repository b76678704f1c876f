// Host operation arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Hostname to track (port 443 is implied)
    #[arg(value_name = "HOSTNAME")]
    pub hostname: String,

    /// Warn when this many days or fewer remain
    #[arg(short = 'n', long = "notification-days", value_name = "DAYS")]
    pub notification_days: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Registered hostname, or `all`
    #[arg(value_name = "TARGET", default_value = "all")]
    pub target: String,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(value_name = "HOSTNAME")]
    pub hostname: String,
}
