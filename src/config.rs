// Application configuration
//
// Built once at startup (defaults, then an optional TOML file, then environment
// overrides) and handed to each component by reference.

use crate::Result;
use crate::error::DeadlineError;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Slack endpoint used for notifications
pub const SLACK_API_URL: &str = "https://slack.com/api/chat.postMessage";

/// Threshold applied when a registration does not specify one
pub const DEFAULT_NOTIFICATION_DAYS: i64 = 45;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub probe: ProbeSettings,
    pub report: ReportSettings,
    pub defaults: DefaultsSettings,
    pub notify: NotifySettings,
    pub batch: BatchSettings,
}

/// HTTP API listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1323,
        }
    }
}

/// Host registry storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// `sqlite://...`, `postgres://...`, or `memory` for a process-local registry
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://ssl-deadline.db".to_string(),
            max_connections: 5,
        }
    }
}

/// TLS probe settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub port: u16,
    pub connect_timeout_secs: u64,
    pub handshake_timeout_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            port: 443,
            connect_timeout_secs: 10,
            handshake_timeout_secs: 10,
        }
    }
}

impl ProbeSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }
}

/// Reporting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// IANA zone used to render expiry dates
    pub timezone: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            timezone: "Asia/Tokyo".to_string(),
        }
    }
}

/// Registration defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSettings {
    pub notification_days: i64,
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        Self {
            notification_days: DEFAULT_NOTIFICATION_DAYS,
        }
    }
}

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NotifySettings {
    pub slack: SlackConfig,
}

/// Slack configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    pub token: Option<String>,
    pub channel: Option<String>,
    pub api_url: String,
    pub username: String,
    pub icon_emoji: String,
    pub timeout_secs: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            token: None,
            channel: None,
            api_url: SLACK_API_URL.to_string(),
            username: "SSL Deadline Checker".to_string(),
            icon_emoji: ":squirrel:".to_string(),
            timeout_secs: 10,
        }
    }
}

impl SlackConfig {
    /// Token and channel, when both are present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        let channel = self.channel.as_deref().filter(|c| !c.is_empty())?;
        Some((token, channel))
    }
}

/// How a batch recheck reacts to a failing host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort on the first failing host and report its error
    #[default]
    FailFast,
    /// Check every host and report all failures together
    Continue,
}

/// Batch recheck settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BatchSettings {
    pub failure_policy: FailurePolicy,
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            DeadlineError::Configuration {
                message: format!("Failed to read config file {:?}: {}", path.as_ref(), e),
            }
        })?;

        toml::from_str(&contents).map_err(|e| DeadlineError::Configuration {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Serialize configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DeadlineError::Configuration {
            message: format!("Failed to serialize config: {}", e),
        })
    }

    /// Override values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Override values using the given lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("SLACK_TOKEN") {
            self.notify.slack.token = Some(token);
        }
        if let Some(channel) = lookup("SLACK_CHANNEL") {
            self.notify.slack.channel = Some(channel);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(tz) = lookup("REPORTING_TIMEZONE") {
            self.report.timezone = tz;
        }
    }

    /// Resolve the reporting timezone
    pub fn reporting_timezone(&self) -> Result<Tz> {
        self.report
            .timezone
            .parse::<Tz>()
            .map_err(|e| DeadlineError::Configuration {
                message: format!("Unknown reporting timezone {:?}: {}", self.report.timezone, e),
            })
    }

    /// Check the configuration before any component is built
    pub fn validate(&self) -> Result<()> {
        self.reporting_timezone()?;

        if self.defaults.notification_days < 0 {
            crate::config_bail!(
                "defaults.notification_days must not be negative (got {})",
                self.defaults.notification_days
            );
        }

        if self.probe.connect_timeout_secs == 0 || self.probe.handshake_timeout_secs == 0 {
            crate::config_bail!("probe timeouts must be at least one second");
        }

        Ok(())
    }
}
