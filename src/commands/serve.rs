// ServeCommand - JSON API server mode
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::{Command, context};
use crate::api::ApiServer;
use crate::cli::ServeArgs;
use crate::config::AppConfig;
use crate::monitor::RecheckScheduler;
use crate::{DeadlineError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// ServeCommand runs the API server, optionally with a periodic recheck
pub struct ServeCommand {
    config: AppConfig,
    args: ServeArgs,
}

impl ServeCommand {
    pub fn new(config: AppConfig, args: ServeArgs) -> Self {
        Self { config, args }
    }

    /// Server settings with CLI overrides applied
    fn server_settings(&self) -> crate::config::ServerSettings {
        let mut settings = self.config.server.clone();
        if let Some(host) = &self.args.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.args.port {
            settings.port = port;
        }
        settings
    }

    fn recheck_interval(&self) -> Result<Option<Duration>> {
        match self.args.recheck_interval {
            Some(0) => Err(DeadlineError::InvalidInput {
                message: "--recheck-interval must be at least 1 second".to_string(),
            }),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Command for ServeCommand {
    async fn execute(&self) -> Result<()> {
        info!("Starting SSL deadline checker in API server mode");

        let interval = self.recheck_interval()?;
        let monitor = context::build_monitor(&self.config).await?;

        let scheduler = interval.map(|period| {
            let scheduler = Arc::new(RecheckScheduler::new(monitor.clone(), period));
            let handle = scheduler.clone().spawn();
            (scheduler, handle)
        });

        let result = ApiServer::new(self.server_settings(), monitor).run().await;

        if let Some((scheduler, handle)) = scheduler {
            scheduler.stop();
            handle.abort();
        }

        result
    }

    fn name(&self) -> &'static str {
        "ServeCommand"
    }
}
