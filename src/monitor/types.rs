// Core types for deadline rechecks

use crate::error::{DeadlineError, HostFailure};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Literal selecting every registered host
pub const ALL_HOSTS: &str = "all";

/// Which hosts a recheck covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecheckTarget {
    All,
    Host(String),
}

impl FromStr for RecheckTarget {
    type Err = DeadlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DeadlineError::InvalidInput {
                message: "Recheck target must not be empty".to_string(),
            });
        }

        if s == ALL_HOSTS {
            Ok(RecheckTarget::All)
        } else {
            Ok(RecheckTarget::Host(s.to_string()))
        }
    }
}

impl fmt::Display for RecheckTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecheckTarget::All => write!(f, "{}", ALL_HOSTS),
            RecheckTarget::Host(hostname) => write!(f, "{}", hostname),
        }
    }
}

/// Outcome of one successful per-host pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDeadline {
    pub hostname: String,
    pub display_date: String,
    pub remaining_days: i64,
    pub notified: bool,
}

/// Summary of a recheck
#[derive(Debug, Clone, Default)]
pub struct RecheckReport {
    pub checked: Vec<HostDeadline>,
    pub notified: usize,
    pub failures: Vec<HostFailure>,
}

impl RecheckReport {
    pub fn record(&mut self, outcome: HostDeadline) {
        if outcome.notified {
            self.notified += 1;
        }
        self.checked.push(outcome);
    }

    pub fn record_failure(&mut self, hostname: &str, error: &DeadlineError) {
        self.failures.push(HostFailure {
            hostname: hostname.to_string(),
            message: error.to_string(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
