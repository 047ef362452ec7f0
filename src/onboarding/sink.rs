//! Output sinks — where transcript lines and notifications end up.
//!
//! The engine never renders anything itself. A front-end implements these
//! traits and the outbox calls them, possibly after a typing delay.

use std::sync::Mutex;

use super::model::{Message, Notification};

/// Receives transcript lines in display order.
pub trait MessageSink: Send + Sync {
    fn append(&self, message: &Message);
}

/// Receives fire-and-forget alerts.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// In-memory sink that records everything it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<Message>>,
    notifications: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

impl MessageSink for MemorySink {
    fn append(&self, message: &Message) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.clone());
        }
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: &Notification) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(notification.clone());
        }
    }
}
