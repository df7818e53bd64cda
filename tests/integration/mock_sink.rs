//! Recording notification sink for integration testing.
//!
//! Captures every notification the session emits so tests can assert on
//! the toast stream after the sink has been boxed into a `Session`.

use std::sync::{Arc, Mutex};

use betslip::catalog::Catalog;
use betslip::engine::{LedgerEngine, Session};
use betslip::notify::{Notification, NotificationSink};
use rust_decimal::Decimal;

/// A sink that stores notifications in shared memory.
#[derive(Clone, Default)]
pub struct RecordingSink {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, oldest first.
    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, notification: &Notification) {
        self.received.lock().unwrap().push(notification.clone());
    }
}

/// A session over the default card with the given balance, plus a handle
/// on the notifications it emits.
pub fn recording_session(balance: Decimal) -> (Session, RecordingSink) {
    let sink = RecordingSink::new();
    let session = Session::new(
        Catalog::default(),
        LedgerEngine::with_balance(balance),
        Box::new(sink.clone()),
        50,
    );
    (session, sink)
}
