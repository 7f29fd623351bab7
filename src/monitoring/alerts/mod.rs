//! Alerting
//!
//! Threshold and cooldown gated alerts fanned out to pluggable handlers.

mod channels;
mod dispatcher;
mod types;

pub use channels::{AlertHandler, ConsoleAlertHandler, LogAlertHandler, WebhookAlertHandler};
pub use dispatcher::AlertDispatcher;
pub use types::{AlertCandidate, AlertStats};
