// ListCommand / ShowCommand - print registry contents
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::Command;
use crate::Result;
use crate::cli::ShowArgs;
use crate::config::AppConfig;
use crate::registry::{self, HostRecord};
use async_trait::async_trait;
use colored::Colorize;

fn print_record(record: &HostRecord) {
    let days = if record.within_threshold() {
        record.remaining_days.to_string().red().bold()
    } else {
        record.remaining_days.to_string().green()
    };

    println!(
        "  {:<40} {}  {:>6} days  (notify at {})",
        record.hostname, record.expiry_display, days, record.notification_threshold
    );
}

/// ListCommand prints every registered host
pub struct ListCommand {
    config: AppConfig,
}

impl ListCommand {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(&self) -> Result<()> {
        let registry = registry::connect(&self.config.database).await?;
        let records = registry.list().await?;

        println!("\nRegistered hosts ({})", records.len());
        println!("{}", "=".repeat(80));

        if records.is_empty() {
            println!("No hosts registered");
        }
        for record in &records {
            print_record(record);
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ListCommand"
    }
}

/// ShowCommand prints one host as JSON
pub struct ShowCommand {
    config: AppConfig,
    args: ShowArgs,
}

impl ShowCommand {
    pub fn new(config: AppConfig, args: ShowArgs) -> Self {
        Self { config, args }
    }
}

#[async_trait]
impl Command for ShowCommand {
    async fn execute(&self) -> Result<()> {
        let registry = registry::connect(&self.config.database).await?;
        let record = registry.get(&self.args.hostname).await?;

        println!("{}", serde_json::to_string_pretty(&record)?);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ShowCommand"
    }
}
