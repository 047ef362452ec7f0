//! Outbox — delivers emissions to the sinks, applying the typing delay.
//!
//! In deferred mode a single tokio task per session drains a queue in order,
//! sleeping out each emission's delay before handing it to the sink. The
//! engine never waits on it. Cancelling (or dropping) the outbox aborts the
//! task and silently discards whatever hasn't been delivered yet.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use super::model::{Message, Notification};
use super::sink::{MessageSink, NotificationSink};

/// Something to be shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    Message(Message),
    Notification(Notification),
}

enum Delivery {
    Emit { emission: Emission, delay: Duration },
    Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
struct Sinks {
    messages: Arc<dyn MessageSink>,
    notifications: Arc<dyn NotificationSink>,
}

impl Sinks {
    fn deliver(&self, emission: &Emission) {
        match emission {
            Emission::Message(message) => self.messages.append(message),
            Emission::Notification(notification) => self.notifications.notify(notification),
        }
    }
}

enum Mode {
    Immediate,
    Deferred {
        tx: mpsc::UnboundedSender<Delivery>,
        handle: JoinHandle<()>,
    },
    Closed,
}

/// Per-session delivery queue.
pub struct Outbox {
    sinks: Sinks,
    mode: Mode,
    pending: Arc<AtomicUsize>,
}

impl Outbox {
    /// Deliver every emission inline, ignoring delays.
    pub fn immediate(
        messages: Arc<dyn MessageSink>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            sinks: Sinks {
                messages,
                notifications,
            },
            mode: Mode::Immediate,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Deliver emissions from a background task, honoring delays.
    ///
    /// Must be called from within a tokio runtime.
    pub fn deferred(
        messages: Arc<dyn MessageSink>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        let sinks = Sinks {
            messages,
            notifications,
        };
        let pending = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_delivery(rx, sinks.clone(), Arc::clone(&pending)));

        Self {
            sinks,
            mode: Mode::Deferred { tx, handle },
            pending,
        }
    }

    /// Queue an emission. Never blocks.
    pub fn post(&self, emission: Emission, delay: Duration) {
        match &self.mode {
            Mode::Immediate => self.sinks.deliver(&emission),
            Mode::Deferred { tx, .. } => {
                self.pending.fetch_add(1, Ordering::SeqCst);
                if tx.send(Delivery::Emit { emission, delay }).is_err() {
                    self.pending.fetch_sub(1, Ordering::SeqCst);
                    debug!("Delivery task gone, emission dropped");
                }
            }
            Mode::Closed => debug!("Outbox closed, emission dropped"),
        }
    }

    /// Wait until everything posted so far has been delivered.
    ///
    /// Returns immediately for an immediate or cancelled outbox.
    pub async fn flush(&self) {
        if let Mode::Deferred { tx, .. } = &self.mode {
            let (done_tx, done_rx) = oneshot::channel();
            if tx.send(Delivery::Flush(done_tx)).is_ok() {
                let _ = done_rx.await;
            }
        }
    }

    /// Number of emissions queued but not yet delivered.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Stop delivering. Anything still queued is discarded.
    pub fn cancel(&mut self) {
        if let Mode::Deferred { handle, .. } = std::mem::replace(&mut self.mode, Mode::Closed) {
            handle.abort();
            let discarded = self.pending.swap(0, Ordering::SeqCst);
            if discarded > 0 {
                debug!(discarded, "Discarded pending emissions");
            }
        }
    }
}

impl Drop for Outbox {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_delivery(
    mut rx: mpsc::UnboundedReceiver<Delivery>,
    sinks: Sinks,
    pending: Arc<AtomicUsize>,
) {
    while let Some(delivery) = rx.recv().await {
        match delivery {
            Delivery::Emit { emission, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                sinks.deliver(&emission);
                pending.fetch_sub(1, Ordering::SeqCst);
            }
            Delivery::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
