// API Response Models

use serde::{Deserialize, Serialize};

/// JSON envelope shared by every `/api` route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub response: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(response: T) -> Self {
        Self {
            response: Some(response),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            response: None,
            error: Some(error),
        }
    }
}

/// Registration acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub registry: String,
}
