// API State Management

use crate::monitor::DeadlineMonitor;
use crate::registry::HostRegistry;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
pub struct AppState {
    /// Registration and recheck entry point
    pub monitor: Arc<DeadlineMonitor>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(monitor: Arc<DeadlineMonitor>) -> Self {
        Self {
            monitor,
            start_time: Instant::now(),
        }
    }

    pub fn registry(&self) -> &Arc<dyn HostRegistry> {
        self.monitor.registry()
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
