//! Shared types for the BETSLIP ledger.
//!
//! These types form the data model used across the catalog, the ledger
//! engine, notifications, and the dashboard API. They carry no behaviour
//! beyond pure lookups and formatting so every other module can depend on
//! them without circular references.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog-assigned match identifier.
pub type MatchId = u32;

/// Display label used for a draw outcome.
pub const DRAW_LABEL: &str = "Draw";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// One of the three results of a two-team match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    /// All outcomes in card order (home, draw, away).
    pub const ALL: &'static [Outcome] = &[Outcome::Home, Outcome::Draw, Outcome::Away];

    /// Short code printed on the odds button ("1", "X", "2").
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Home => "1",
            Outcome::Draw => "X",
            Outcome::Away => "2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Home => write!(f, "home"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Away => write!(f, "away"),
        }
    }
}

/// Parse an outcome tag (case-insensitive, accepts the button codes too).
impl std::str::FromStr for Outcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" | "1" => Ok(Outcome::Home),
            "draw" | "x" => Ok(Outcome::Draw),
            "away" | "2" => Ok(Outcome::Away),
            _ => Err(anyhow::anyhow!("Unknown outcome: {s}")),
        }
    }
}

/// Match lifecycle tag as shown on the card badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Upcoming => write!(f, "SOON"),
            MatchStatus::Live => write!(f, "LIVE"),
            MatchStatus::Finished => write!(f, "FT"),
        }
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// Decimal odds for the three outcomes of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Odds {
    pub home: Decimal,
    pub draw: Decimal,
    pub away: Decimal,
}

impl Odds {
    pub fn new(home: Decimal, draw: Decimal, away: Decimal) -> Self {
        Self { home, draw, away }
    }

    /// The price for a given outcome.
    pub fn for_outcome(&self, outcome: Outcome) -> Decimal {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
        }
    }

    /// Whether every price is a valid decimal odd (>= 1.0).
    pub fn is_valid(&self) -> bool {
        Outcome::ALL
            .iter()
            .all(|o| self.for_outcome(*o) >= Decimal::ONE)
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, outcome) in Outcome::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}: {}", outcome.code(), self.for_outcome(*outcome))?;
        }
        Ok(())
    }
}

/// A single fixture on the card. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    pub time: String,
    pub odds: Odds,
    pub status: MatchStatus,
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}] {} vs {} ({} {}) {}",
            self.id,
            self.status,
            self.home_team,
            self.away_team,
            self.date,
            self.time,
            self.odds,
        )
    }
}

impl MatchRecord {
    /// Label shown on a bet slip for the given outcome: the team name for a
    /// win, the fixed draw label otherwise.
    pub fn label_for(&self, outcome: Outcome) -> String {
        match outcome {
            Outcome::Home => self.home_team.clone(),
            Outcome::Draw => DRAW_LABEL.to_string(),
            Outcome::Away => self.away_team.clone(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == MatchStatus::Live
    }

    /// Helper to build a test match with the odds of the opening fixture.
    #[cfg(test)]
    pub fn sample() -> Self {
        use rust_decimal_macros::dec;
        MatchRecord {
            id: 1,
            home_team: "Spartak".to_string(),
            away_team: "Dynamo".to_string(),
            date: "15 November".to_string(),
            time: "19:00".to_string(),
            odds: Odds::new(dec!(2.1), dec!(3.2), dec!(3.5)),
            status: MatchStatus::Live,
        }
    }
}

// ---------------------------------------------------------------------------
// Bets
// ---------------------------------------------------------------------------

/// A committed bet. Odds are copied out of the match at commit time and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedBet {
    pub match_id: MatchId,
    pub label: String,
    pub outcome: Outcome,
    pub odds: Decimal,
    pub stake: Decimal,
}

impl fmt::Display for ConfirmedBet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} @ {} stake={} (+{})",
            self.match_id,
            self.label,
            self.odds,
            self.stake,
            self.potential_profit().round_dp(0),
        )
    }
}

impl ConfirmedBet {
    /// Gross return if the bet wins: stake × odds, capped at `Decimal::MAX`.
    pub fn potential_payout(&self) -> Decimal {
        self.stake.checked_mul(self.odds).unwrap_or(Decimal::MAX)
    }

    /// Net gain if the bet wins: payout − stake.
    pub fn potential_profit(&self) -> Decimal {
        self.potential_payout() - self.stake
    }
}

/// A pending selection and its stake for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSlip {
    pub match_id: MatchId,
    pub outcome: Outcome,
    pub stake: Decimal,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Reasons a commit can be refused. The ledger is left untouched in every
/// case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("No outcome selected for match #{match_id}")]
    NoOutcomeSelected { match_id: MatchId },

    #[error("Invalid stake {stake}: must be greater than zero")]
    InvalidStake { stake: Decimal },

    #[error("Insufficient balance: need {stake}, have {balance}")]
    InsufficientBalance { stake: Decimal, balance: Decimal },
}

/// Payload-free tag of a [`LedgerError`], carried by rejection
/// notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    NoOutcomeSelected,
    InvalidStake,
    InsufficientBalance,
}

impl LedgerError {
    pub fn kind(&self) -> RejectionKind {
        match self {
            LedgerError::NoOutcomeSelected { .. } => RejectionKind::NoOutcomeSelected,
            LedgerError::InvalidStake { .. } => RejectionKind::InvalidStake,
            LedgerError::InsufficientBalance { .. } => RejectionKind::InsufficientBalance,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
