// Shared wiring for commands
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::Result;
use crate::config::AppConfig;
use crate::monitor::DeadlineMonitor;
use crate::registry;
use std::sync::Arc;

/// Open the registry and build the production monitor
pub async fn build_monitor(config: &AppConfig) -> Result<Arc<DeadlineMonitor>> {
    let registry = registry::connect(&config.database).await?;
    tracing::debug!("Opened {} registry", registry.backend_name());

    Ok(Arc::new(DeadlineMonitor::from_config(config, registry)?))
}
