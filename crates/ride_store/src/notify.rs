
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
    pub level: AlertLevel,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: AlertLevel);
}

/// Writes alerts to the log only.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, level: AlertLevel) {
        match level {
            AlertLevel::Success => info!(alert = message, "ride notification"),
            AlertLevel::Error => warn!(alert = message, "ride notification"),
        }
    }
}

/// Forwards alerts to whoever renders them. Alerts are dropped once the receiver is gone.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Alert>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Alert>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str, level: AlertLevel) {
        let _ = self.tx.send(Alert {
            message: message.to_string(),
            level,
        });
    }
}
