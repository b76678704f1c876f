// CheckCommand - recheck one host or all hosts
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::{Command, context};
use crate::Result;
use crate::cli::CheckArgs;
use crate::config::AppConfig;
use crate::monitor::RecheckTarget;
use async_trait::async_trait;
use colored::Colorize;

pub struct CheckCommand {
    config: AppConfig,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(config: AppConfig, args: CheckArgs) -> Self {
        Self { config, args }
    }
}

#[async_trait]
impl Command for CheckCommand {
    async fn execute(&self) -> Result<()> {
        let target: RecheckTarget = self.args.target.parse()?;
        let monitor = context::build_monitor(&self.config).await?;

        let report = monitor.recheck(&target).await?;

        for outcome in &report.checked {
            let days = if outcome.notified {
                outcome.remaining_days.to_string().red().bold()
            } else {
                outcome.remaining_days.to_string().green()
            };
            println!(
                "  {} - {} ({} days left){}",
                outcome.hostname,
                outcome.display_date,
                days,
                if outcome.notified { " [notified]" } else { "" }
            );
        }

        println!(
            "{} Checked {} host(s), {} notification(s) sent",
            "✓".green(),
            report.checked.len(),
            report.notified
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "CheckCommand"
    }
}
