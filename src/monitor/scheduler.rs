// Recheck Scheduler - periodic `recheck(all)` driver

use crate::monitor::orchestrator::DeadlineMonitor;
use crate::monitor::types::RecheckTarget;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Runs a full recheck on a fixed interval until stopped
pub struct RecheckScheduler {
    monitor: Arc<DeadlineMonitor>,
    period: Duration,
    running: Arc<AtomicBool>,
}

impl RecheckScheduler {
    pub fn new(monitor: Arc<DeadlineMonitor>, period: Duration) -> Self {
        Self {
            monitor,
            period,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop after the current cycle
    pub fn stop(&self) {
        tracing::info!("Stopping recheck scheduler...");
        self.running.store(false, Ordering::SeqCst);
    }

    /// Run until `stop` is called. The first cycle starts one period from now.
    pub async fn run(&self) {
        self.running.store(true, Ordering::SeqCst);
        tracing::info!("Recheck scheduler started, every {:?}", self.period);

        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while self.running.load(Ordering::SeqCst) {
            ticker.tick().await;

            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            // Failures are reported and the next cycle still runs.
            match self.monitor.recheck(&RecheckTarget::All).await {
                Ok(report) => tracing::info!(
                    "Scheduled recheck: {} hosts, {} notifications",
                    report.checked.len(),
                    report.notified
                ),
                Err(e) => tracing::error!("Scheduled recheck failed: {}", e),
            }
        }

        tracing::info!("Recheck scheduler stopped");
    }

    /// Run on a background task
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::certificates::CertificateProbe;
    use crate::config::SlackConfig;
    use crate::deadline::{Deadline, DeadlineEvaluator};
    use crate::notify::SlackNotifier;
    use crate::registry::{HostRecord, HostRegistry, MemoryRegistry};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingProber {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CertificateProbe for CountingProber {
        async fn probe(&self, _hostname: &str) -> Result<DateTime<Utc>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Utc::now() + chrono::Duration::days(200))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_each_period_until_stopped() {
        let prober = Arc::new(CountingProber::default());
        let registry = Arc::new(MemoryRegistry::new());
        let deadline = Deadline {
            display_date: "2000-01-01".to_string(),
            remaining_days: 0,
        };
        registry
            .insert(&HostRecord::new("a.example", &deadline, 45))
            .await
            .unwrap();

        let notifier = Arc::new(SlackNotifier::new(SlackConfig::default()).unwrap());
        let monitor = Arc::new(DeadlineMonitor::new(
            prober.clone(),
            registry,
            notifier,
            DeadlineEvaluator::new(chrono_tz::UTC),
        ));

        let scheduler = Arc::new(RecheckScheduler::new(monitor, Duration::from_secs(60)));
        let handle = scheduler.clone().spawn();

        tokio::time::sleep(Duration::from_secs(130)).await;
        assert!(scheduler.is_running());
        assert_eq!(prober.calls.load(Ordering::SeqCst), 2);

        scheduler.stop();
        handle.await.unwrap();
        assert_eq!(prober.calls.load(Ordering::SeqCst), 2);
    }
}
