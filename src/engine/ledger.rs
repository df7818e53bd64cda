//! Ledger engine — balance, pending slips, and the confirmed bet list.
//!
//! All mutation goes through `select_outcome`, `set_stake` and
//! `commit_bet`. A failed commit leaves every field untouched; a successful
//! one appends exactly one bet and lowers the balance by exactly its stake.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use super::accountant::{Accountant, Aggregates};
use crate::types::{ConfirmedBet, LedgerError, MatchId, MatchRecord, Outcome, PendingSlip};

/// Stake recorded the first time an outcome is picked for a match.
pub const DEFAULT_STAKE: Decimal = dec!(100);

/// Starting balance of a fresh session.
pub const DEFAULT_BALANCE: Decimal = dec!(10000);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub initial_balance: Decimal,
    pub default_stake: Decimal,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_BALANCE,
            default_stake: DEFAULT_STAKE,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything a presentation layer needs to re-render after a change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSnapshot {
    pub balance: Decimal,
    pub pending: Vec<PendingSlip>,
    pub bets: Vec<ConfirmedBet>,
    pub aggregates: Aggregates,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LedgerEngine {
    balance: Decimal,
    default_stake: Decimal,
    selections: HashMap<MatchId, Outcome>,
    stakes: HashMap<MatchId, Decimal>,
    bets: Vec<ConfirmedBet>,
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl LedgerEngine {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            balance: config.initial_balance.max(Decimal::ZERO),
            default_stake: config.default_stake,
            selections: HashMap::new(),
            stakes: HashMap::new(),
            bets: Vec::new(),
        }
    }

    /// Engine with the given balance and the standard default stake.
    pub fn with_balance(balance: Decimal) -> Self {
        Self::new(LedgerConfig {
            initial_balance: balance,
            ..LedgerConfig::default()
        })
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn default_stake(&self) -> Decimal {
        self.default_stake
    }

    /// Confirmed bets, oldest first.
    pub fn bets(&self) -> &[ConfirmedBet] {
        &self.bets
    }

    /// The pending outcome for a match, if any.
    pub fn selection(&self, match_id: MatchId) -> Option<Outcome> {
        self.selections.get(&match_id).copied()
    }

    /// The stake that a commit on this match would use.
    pub fn stake(&self, match_id: MatchId) -> Decimal {
        self.stakes
            .get(&match_id)
            .copied()
            .unwrap_or(self.default_stake)
    }

    /// Toggle `outcome` for a match and return the resulting selection.
    ///
    /// Picking the already-selected outcome clears it. The first pick on a
    /// match without a recorded stake records the default stake.
    pub fn select_outcome(&mut self, match_id: MatchId, outcome: Outcome) -> Option<Outcome> {
        let selected = if self.selections.get(&match_id) == Some(&outcome) {
            self.selections.remove(&match_id);
            None
        } else {
            self.selections.insert(match_id, outcome);
            Some(outcome)
        };

        self.stakes.entry(match_id).or_insert(self.default_stake);

        debug!(match_id, ?selected, "Selection changed");
        selected
    }

    /// Record a stake for a match. Range checks happen at commit.
    pub fn set_stake(&mut self, match_id: MatchId, amount: Decimal) {
        self.stakes.insert(match_id, amount);
        debug!(match_id, %amount, "Stake set");
    }

    /// Validate the pending slip for `m` and turn it into a confirmed bet.
    pub fn commit_bet(&mut self, m: &MatchRecord) -> Result<ConfirmedBet, LedgerError> {
        let outcome = self
            .selection(m.id)
            .ok_or(LedgerError::NoOutcomeSelected { match_id: m.id })?;

        let stake = self.stake(m.id);
        if stake <= Decimal::ZERO {
            return Err(LedgerError::InvalidStake { stake });
        }
        if stake > self.balance {
            return Err(LedgerError::InsufficientBalance {
                stake,
                balance: self.balance,
            });
        }

        let bet = ConfirmedBet {
            match_id: m.id,
            label: m.label_for(outcome),
            outcome,
            odds: m.odds.for_outcome(outcome),
            stake,
        };

        self.bets.push(bet.clone());
        self.balance -= stake;
        self.selections.remove(&m.id);
        self.stakes.insert(m.id, self.default_stake);

        info!(
            match_id = m.id,
            label = %bet.label,
            odds = %bet.odds,
            stake = %stake,
            balance = %self.balance,
            "Bet committed"
        );

        Ok(bet)
    }

    /// Totals over the confirmed bets.
    pub fn compute_aggregates(&self) -> Aggregates {
        Accountant::aggregate(&self.bets)
    }

    /// Possible win for the pending slip on `m`. `None` when nothing is
    /// selected or the product does not fit in a `Decimal`.
    pub fn preview_payout(&self, m: &MatchRecord) -> Option<Decimal> {
        let outcome = self.selection(m.id)?;
        self.stake(m.id).checked_mul(m.odds.for_outcome(outcome))
    }

    /// All pending slips, ordered by match id.
    pub fn pending(&self) -> Vec<PendingSlip> {
        let mut slips: Vec<PendingSlip> = self
            .selections
            .iter()
            .map(|(&match_id, &outcome)| PendingSlip {
                match_id,
                outcome,
                stake: self.stake(match_id),
            })
            .collect();
        slips.sort_by_key(|s| s.match_id);
        slips
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            balance: self.balance,
            pending: self.pending(),
            bets: self.bets.clone(),
            aggregates: self.compute_aggregates(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
