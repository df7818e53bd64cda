//! Accountant — exposure and payout totals over the confirmed bets.
//!
//! Everything here is a pure function of the bet sequence; nothing is
//! cached between calls.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::types::ConfirmedBet;

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Totals shown under the bet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    /// Sum of all stakes.
    pub total_staked: Decimal,
    /// Sum of stake × odds over all bets.
    pub potential_payout: Decimal,
    /// `potential_payout - total_staked`.
    pub potential_profit: Decimal,
}

impl Default for Aggregates {
    fn default() -> Self {
        Self {
            total_staked: Decimal::ZERO,
            potential_payout: Decimal::ZERO,
            potential_profit: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Accountant
// ---------------------------------------------------------------------------

pub struct Accountant;

impl Accountant {
    /// Fold the bet sequence into its totals. Sums saturate at
    /// `Decimal::MAX`.
    pub fn aggregate(bets: &[ConfirmedBet]) -> Aggregates {
        let (total_staked, potential_payout) = bets.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(staked, payout), bet| {
                (
                    staked.saturating_add(bet.stake),
                    payout.saturating_add(bet.potential_payout()),
                )
            },
        );

        Aggregates {
            total_staked,
            potential_payout,
            potential_profit: potential_payout.saturating_sub(total_staked),
        }
    }
}

/// Round a money amount to whole units for display, halves away from zero.
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
