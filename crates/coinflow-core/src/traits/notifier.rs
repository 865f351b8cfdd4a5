//! Notifier trait definition.

use async_trait::async_trait;

/// Outbound alert channel.
///
/// Fire-and-forget: implementations swallow their own failures, a dropped
/// alert must never affect the trading loop.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a plain-text alert.
    async fn notify(&self, message: &str);
}
