// SSL Deadline Checker - TLS certificate expiry tracking
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

//! Tracks the expiry of TLS certificates for registered hostnames.
//!
//! A [`monitor::DeadlineMonitor`] probes each host's live endpoint, turns the
//! leaf certificate's `NotAfter` into a display date and a remaining-day count,
//! stores the result in a [`registry::HostRegistry`] and sends a notification
//! once the count falls within the host's threshold.

pub mod api;
pub mod certificates;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deadline;
pub mod error;
pub mod monitor;
pub mod notify;
pub mod registry;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::config::AppConfig;
pub use crate::error::{DeadlineError, HostFailure};

/// Result type for deadline checking operations
pub type Result<T> = std::result::Result<T, DeadlineError>;
