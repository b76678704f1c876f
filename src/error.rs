// Error types for the certificate deadline engine
//
// Probing, persistence and notification failures are kept as distinct variants
// so callers (the API layer, the CLI) can map them without string matching.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Main error type for deadline checking operations
#[derive(Debug, Error)]
pub enum DeadlineError {
    /// TCP connection to the host could not be established
    #[error("Failed to connect to {hostname}:{port}: {source}")]
    Connect {
        hostname: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The TLS layer rejected the handshake or it did not finish in time
    #[error("TLS handshake with {hostname} failed: {details}")]
    TlsHandshake { hostname: String, details: String },

    /// Handshake succeeded but the peer presented no certificate
    #[error("No peer certificate presented by {hostname}")]
    NoCertificate { hostname: String },

    /// The leaf certificate could not be decoded
    #[error("Failed to parse certificate from {hostname}: {details}")]
    CertificateParse { hostname: String, details: String },

    /// Reading from the host registry failed
    #[error("Registry read failed: {0}")]
    RegistryRead(String),

    /// Writing to the host registry failed
    #[error("Registry write failed: {0}")]
    RegistryWrite(String),

    /// Hostname is not registered
    #[error("Host not found: {hostname}")]
    HostNotFound { hostname: String },

    /// Hostname is already registered
    #[error("Host already registered: {hostname}")]
    HostAlreadyRegistered { hostname: String },

    /// Notification request could not be built or sent
    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    /// Invalid startup configuration
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// Generic I/O error outside of probing
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input from a caller
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// One or more hosts failed during a batch run with the continue policy
    #[error("{} host(s) failed during recheck: {}", .failures.len(), summarize(.failures))]
    BatchFailed { failures: Vec<HostFailure> },
}

/// A single host's failure inside a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFailure {
    pub hostname: String,
    pub message: String,
}

fn summarize(failures: &[HostFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.hostname, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl DeadlineError {
    /// Build a handshake timeout error
    pub fn handshake_timeout(hostname: &str, duration: Duration) -> Self {
        DeadlineError::TlsHandshake {
            hostname: hostname.to_string(),
            details: format!("timed out after {:?}", duration),
        }
    }

    /// Build a connect timeout error
    pub fn connect_timeout(hostname: &str, port: u16, duration: Duration) -> Self {
        DeadlineError::Connect {
            hostname: hostname.to_string(),
            port,
            source: io::Error::new(
                io::ErrorKind::TimedOut,
                format!("connection timed out after {:?}", duration),
            ),
        }
    }
}

/// Helper macro for early-returning configuration errors
#[macro_export]
macro_rules! config_bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::DeadlineError::Configuration { message: $msg.to_string() })
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::DeadlineError::Configuration { message: format!($fmt, $($arg)*) })
    };
}
