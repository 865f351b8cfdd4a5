//! Logging setup and outbound alerting.

mod alerts;
mod logging;

pub use alerts::{LogNotifier, TelegramNotifier};
pub use logging::setup_logging;
