// Deadline Monitor - registration and batch recheck orchestration

use crate::Result;
use crate::certificates::{CertificateProbe, TlsProber};
use crate::config::{AppConfig, DEFAULT_NOTIFICATION_DAYS, FailurePolicy};
use crate::deadline::{Deadline, DeadlineEvaluator};
use crate::error::DeadlineError;
use crate::monitor::types::{ALL_HOSTS, HostDeadline, RecheckReport, RecheckTarget};
use crate::notify::{Notifier, SlackNotifier};
use crate::registry::{HostRecord, HostRegistry};
use chrono::Utc;
use std::sync::Arc;

/// Render the notification text for a host
pub fn deadline_message(hostname: &str, deadline: &Deadline) -> String {
    format!(
        "https://{}'s ssl deadline is {}. {} days left until the deadline.",
        hostname, deadline.display_date, deadline.remaining_days
    )
}

/// Ties probing, evaluation, persistence and notification together
pub struct DeadlineMonitor {
    prober: Arc<dyn CertificateProbe>,
    registry: Arc<dyn HostRegistry>,
    notifier: Arc<dyn Notifier>,
    evaluator: DeadlineEvaluator,
    default_threshold: i64,
    failure_policy: FailurePolicy,
}

impl DeadlineMonitor {
    pub fn new(
        prober: Arc<dyn CertificateProbe>,
        registry: Arc<dyn HostRegistry>,
        notifier: Arc<dyn Notifier>,
        evaluator: DeadlineEvaluator,
    ) -> Self {
        Self {
            prober,
            registry,
            notifier,
            evaluator,
            default_threshold: DEFAULT_NOTIFICATION_DAYS,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Build the production monitor: TLS prober, Slack notifier, configured zone
    pub fn from_config(config: &AppConfig, registry: Arc<dyn HostRegistry>) -> Result<Self> {
        let prober = TlsProber::new(&config.probe)?;
        let notifier = SlackNotifier::new(config.notify.slack.clone())?;
        let evaluator = DeadlineEvaluator::new(config.reporting_timezone()?);

        if !notifier.is_configured() {
            tracing::warn!("Slack token or channel missing, notifications are disabled");
        }

        Ok(Self::new(Arc::new(prober), registry, Arc::new(notifier), evaluator)
            .with_default_threshold(config.defaults.notification_days)
            .with_failure_policy(config.batch.failure_policy))
    }

    pub fn with_default_threshold(mut self, days: i64) -> Self {
        self.default_threshold = days;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn registry(&self) -> &Arc<dyn HostRegistry> {
        &self.registry
    }

    /// Probe a new host and store it with its threshold.
    ///
    /// Nothing is persisted unless the probe succeeds.
    pub async fn register(&self, hostname: &str, threshold: Option<i64>) -> Result<HostRecord> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(DeadlineError::InvalidInput {
                message: "hostname must not be empty".to_string(),
            });
        }
        if hostname == ALL_HOSTS {
            return Err(DeadlineError::InvalidInput {
                message: format!("{:?} is reserved for batch rechecks", ALL_HOSTS),
            });
        }

        let threshold = threshold.unwrap_or(self.default_threshold);
        if threshold < 0 {
            return Err(DeadlineError::InvalidInput {
                message: format!("notification_days must not be negative, got {}", threshold),
            });
        }

        if self.registry.contains(hostname).await? {
            return Err(DeadlineError::HostAlreadyRegistered {
                hostname: hostname.to_string(),
            });
        }

        let deadline = self.fetch_deadline(hostname).await?;
        let stored = self
            .registry
            .insert(&HostRecord::new(hostname, &deadline, threshold))
            .await?;

        tracing::info!(
            "Registered {} (expires {}, {} days left, notify at {} days)",
            hostname,
            deadline.display_date,
            deadline.remaining_days,
            threshold
        );

        Ok(stored)
    }

    /// Recheck one host or every registered host.
    ///
    /// Hosts run one at a time in listing order. Under `FailFast` the first
    /// error ends the batch and is returned as-is.
    pub async fn recheck(&self, target: &RecheckTarget) -> Result<RecheckReport> {
        let mut report = RecheckReport::default();

        let hostname = match target {
            RecheckTarget::Host(hostname) => hostname,
            RecheckTarget::All => return self.recheck_all(report).await,
        };

        report.record(self.check_host(hostname).await?);
        Ok(report)
    }

    async fn recheck_all(&self, mut report: RecheckReport) -> Result<RecheckReport> {
        let hostnames = self.registry.list_hostnames().await?;
        tracing::info!("Rechecking {} hosts", hostnames.len());

        for hostname in &hostnames {
            match self.check_host(hostname).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => match self.failure_policy {
                    FailurePolicy::FailFast => {
                        tracing::error!("Recheck of {} failed, aborting batch: {}", hostname, e);
                        return Err(e);
                    }
                    FailurePolicy::Continue => {
                        tracing::warn!("Recheck of {} failed: {}", hostname, e);
                        report.record_failure(hostname, &e);
                    }
                },
            }
        }

        if !report.is_clean() {
            return Err(DeadlineError::BatchFailed {
                failures: report.failures,
            });
        }

        tracing::info!(
            "Recheck complete: {} hosts, {} notifications",
            report.checked.len(),
            report.notified
        );

        Ok(report)
    }

    /// Per-host pipeline: probe, evaluate, persist, then notify if due
    pub async fn check_host(&self, hostname: &str) -> Result<HostDeadline> {
        let deadline = self.fetch_deadline(hostname).await?;

        self.registry
            .update_expiry(hostname, &deadline.display_date, deadline.remaining_days)
            .await?;

        // Threshold is read back from storage; it may be edited outside this process.
        let record = self.registry.get(hostname).await?;

        let notified = deadline.remaining_days <= record.notification_threshold;
        if notified {
            self.notifier
                .notify(&deadline_message(hostname, &deadline))
                .await?;
            tracing::info!(
                "{}: {} days left (threshold {}), sent via {}",
                hostname,
                deadline.remaining_days,
                record.notification_threshold,
                self.notifier.channel_name()
            );
        } else {
            tracing::debug!("{}: {} days left", hostname, deadline.remaining_days);
        }

        Ok(HostDeadline {
            hostname: hostname.to_string(),
            display_date: deadline.display_date,
            remaining_days: deadline.remaining_days,
            notified,
        })
    }

    async fn fetch_deadline(&self, hostname: &str) -> Result<Deadline> {
        tracing::debug!("Probing {}", hostname);
        let not_after = self.prober.probe(hostname).await?;
        Ok(self.evaluator.evaluate(not_after, Utc::now()))
    }
}
