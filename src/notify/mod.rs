// Notification dispatch
//
// Delivery is optional: a notifier without credentials accepts every message
// and sends nothing.

pub mod slack;

use crate::Result;
use async_trait::async_trait;

pub use slack::SlackNotifier;

/// Delivers a human-readable message to an external channel
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `message`; a no-op when the channel is not configured
    async fn notify(&self, message: &str) -> Result<()>;

    /// Channel name for logging
    fn channel_name(&self) -> &str;

    /// Whether messages will actually leave the process
    fn is_configured(&self) -> bool {
        true
    }
}
