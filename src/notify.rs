//! Bet notifications — the toast events emitted after every commit attempt.
//!
//! Defines the `NotificationSink` trait and two sinks: one that writes to
//! the `tracing` log and a bounded in-memory history for the dashboard.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use tracing::{info, warn};

use crate::engine::accountant::round_display;
use crate::types::{ConfirmedBet, LedgerError, MatchId, RejectionKind};

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Outcome of a commit attempt, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    BetAccepted {
        match_id: MatchId,
        label: String,
        odds: Decimal,
        stake: Decimal,
        /// stake × odds rounded to whole units.
        payout: Decimal,
    },
    BetRejected {
        match_id: MatchId,
        reason: RejectionKind,
        message: String,
    },
}

impl Notification {
    pub fn accepted(bet: &ConfirmedBet) -> Self {
        Notification::BetAccepted {
            match_id: bet.match_id,
            label: bet.label.clone(),
            odds: bet.odds,
            stake: bet.stake,
            payout: round_display(bet.potential_payout()),
        }
    }

    pub fn rejected(match_id: MatchId, error: &LedgerError) -> Self {
        Notification::BetRejected {
            match_id,
            reason: error.kind(),
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notification::BetAccepted { .. })
    }

    pub fn match_id(&self) -> MatchId {
        match self {
            Notification::BetAccepted { match_id, .. }
            | Notification::BetRejected { match_id, .. } => *match_id,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::BetAccepted { label, odds, stake, payout, .. } => write!(
                f,
                "Bet accepted! {label} × {odds} | stake {stake} | possible win {payout}"
            ),
            Notification::BetRejected { reason, .. } => match reason {
                RejectionKind::NoOutcomeSelected => write!(f, "Pick a match outcome"),
                RejectionKind::InvalidStake => write!(f, "Enter a stake above zero"),
                RejectionKind::InsufficientBalance => write!(f, "Insufficient funds"),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Receiver of commit notifications.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

/// Writes every notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::BetAccepted { match_id, label, odds, stake, payout } => info!(
                match_id,
                label = %label,
                odds = %odds,
                stake = %stake,
                payout = %payout,
                "Bet accepted"
            ),
            Notification::BetRejected { match_id, reason, message } => warn!(
                match_id,
                reason = ?reason,
                message = %message,
                "Bet rejected"
            ),
        }
    }
}

/// A notification with the time it was emitted.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecord {
    pub at: DateTime<Utc>,
    pub text: String,
    #[serde(flatten)]
    pub notification: Notification,
}

/// Bounded history, newest last. The oldest entry is dropped once
/// `capacity` is reached.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    capacity: usize,
    entries: VecDeque<NotificationRecord>,
}

impl NotificationLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn recent(&self) -> Vec<NotificationRecord> {
        self.entries.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<&NotificationRecord> {
        self.entries.back()
    }
}

impl NotificationSink for NotificationLog {
    fn notify(&mut self, notification: &Notification) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(NotificationRecord {
            at: Utc::now(),
            text: notification.to_string(),
            notification: notification.clone(),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
