// API Request Models

use serde::{Deserialize, Serialize};

/// Body of `POST /api`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub hostname: String,

    /// Warning threshold in days; the configured default applies when absent
    #[serde(default)]
    pub notification_days: Option<i64>,
}
