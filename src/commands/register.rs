// RegisterCommand - add a hostname to the registry
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::{Command, context};
use crate::Result;
use crate::cli::RegisterArgs;
use crate::config::AppConfig;
use async_trait::async_trait;
use colored::Colorize;

pub struct RegisterCommand {
    config: AppConfig,
    args: RegisterArgs,
}

impl RegisterCommand {
    pub fn new(config: AppConfig, args: RegisterArgs) -> Self {
        Self { config, args }
    }
}

#[async_trait]
impl Command for RegisterCommand {
    async fn execute(&self) -> Result<()> {
        let monitor = context::build_monitor(&self.config).await?;
        let record = monitor
            .register(&self.args.hostname, self.args.notification_days)
            .await?;

        println!(
            "{} Registered {} (deadline {}, {} days left, notify at {} days)",
            "✓".green(),
            record.hostname.bold(),
            record.expiry_display,
            record.remaining_days,
            record.notification_threshold
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "RegisterCommand"
    }
}
