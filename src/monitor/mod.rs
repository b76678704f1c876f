// Deadline Monitoring
//
// Registration and recheck orchestration on top of the prober, evaluator,
// registry and notifier, plus an optional periodic recheck driver.

pub mod orchestrator;
pub mod scheduler;
pub mod types;

pub use orchestrator::{DeadlineMonitor, deadline_message};
pub use scheduler::RecheckScheduler;
pub use types::{ALL_HOSTS, HostDeadline, RecheckReport, RecheckTarget};
