//! Session — one catalog, one ledger, one notification stream.
//!
//! Hosts (the dashboard, the binary, tests) talk to the ledger through a
//! `Session` using match ids. The session resolves ids against the catalog
//! and emits a notification for every commit attempt.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::ledger::{LedgerEngine, LedgerSnapshot};
use crate::catalog::Catalog;
use crate::notify::{Notification, NotificationLog, NotificationRecord, NotificationSink};
use crate::types::{ConfirmedBet, LedgerError, MatchId, MatchRecord, Outcome};

/// Default number of notifications kept for the dashboard.
pub const DEFAULT_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Match not found: {0}")]
    UnknownMatch(MatchId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// A catalog entry joined with the caller's pending slip.
#[derive(Debug, Clone, Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub record: MatchRecord,
    pub selection: Option<Outcome>,
    pub stake: Decimal,
    pub preview_payout: Option<Decimal>,
}

pub struct Session {
    catalog: Catalog,
    ledger: LedgerEngine,
    sink: Box<dyn NotificationSink + Send>,
    history: NotificationLog,
}

impl Session {
    pub fn new(
        catalog: Catalog,
        ledger: LedgerEngine,
        sink: Box<dyn NotificationSink + Send>,
        history_capacity: usize,
    ) -> Self {
        Self {
            catalog,
            ledger,
            sink,
            history: NotificationLog::new(history_capacity),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &LedgerEngine {
        &self.ledger
    }

    fn lookup(&self, match_id: MatchId) -> Result<&MatchRecord, SessionError> {
        self.catalog
            .get(match_id)
            .ok_or(SessionError::UnknownMatch(match_id))
    }

    /// The card with each match's current selection, stake and possible win.
    pub fn matches(&self) -> Vec<MatchView> {
        self.catalog
            .list_matches()
            .iter()
            .map(|m| MatchView {
                record: m.clone(),
                selection: self.ledger.selection(m.id),
                stake: self.ledger.stake(m.id),
                preview_payout: self.ledger.preview_payout(m),
            })
            .collect()
    }

    pub fn select_outcome(
        &mut self,
        match_id: MatchId,
        outcome: Outcome,
    ) -> Result<Option<Outcome>, SessionError> {
        self.lookup(match_id)?;
        Ok(self.ledger.select_outcome(match_id, outcome))
    }

    pub fn set_stake(&mut self, match_id: MatchId, amount: Decimal) -> Result<Decimal, SessionError> {
        self.lookup(match_id)?;
        self.ledger.set_stake(match_id, amount);
        Ok(self.ledger.stake(match_id))
    }

    /// Commit the pending slip for a match and notify the outcome.
    ///
    /// Unknown ids are refused without a notification; ledger rejections
    /// are notified and returned.
    pub fn place_bet(&mut self, match_id: MatchId) -> Result<ConfirmedBet, SessionError> {
        let record = self.lookup(match_id)?.clone();

        let result = self.ledger.commit_bet(&record);
        let notification = match &result {
            Ok(bet) => Notification::accepted(bet),
            Err(e) => {
                warn!(match_id, error = %e, "Commit refused");
                Notification::rejected(match_id, e)
            }
        };
        self.emit(&notification);

        result.map_err(SessionError::from)
    }

    fn emit(&mut self, notification: &Notification) {
        self.history.notify(notification);
        self.sink.notify(notification);
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    pub fn recent_notifications(&self) -> Vec<NotificationRecord> {
        self.history.recent()
    }

    pub fn last_notification(&self) -> Option<&NotificationRecord> {
        self.history.last()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
