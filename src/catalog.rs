//! Match catalog — the fixed card of fixtures offered for betting.
//!
//! Built once at startup from configuration (or the default tournament
//! card) and never mutated afterwards. Construction rejects duplicate ids
//! and odds below 1.0, so a `Catalog` value is always valid.

use rust_decimal_macros::dec;
use std::collections::HashSet;
use tracing::debug;

use crate::types::{MatchId, MatchRecord, MatchStatus, Odds, Outcome};

/// Problems found while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate match id: {0}")]
    DuplicateMatchId(MatchId),

    #[error("Invalid {outcome} odds for match #{match_id}: must be at least 1.0")]
    InvalidOdds { match_id: MatchId, outcome: Outcome },
}

/// Read-only, ordered set of matches.
#[derive(Debug, Clone)]
pub struct Catalog {
    matches: Vec<MatchRecord>,
}

impl Catalog {
    /// Build a catalog, preserving the given order.
    pub fn new(matches: Vec<MatchRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(matches.len());
        for m in &matches {
            if !seen.insert(m.id) {
                return Err(CatalogError::DuplicateMatchId(m.id));
            }
            if let Some(outcome) = Outcome::ALL
                .iter()
                .copied()
                .find(|o| m.odds.for_outcome(*o) < rust_decimal::Decimal::ONE)
            {
                return Err(CatalogError::InvalidOdds { match_id: m.id, outcome });
            }
        }
        debug!(count = matches.len(), "Catalog built");
        Ok(Self { matches })
    }

    /// All matches in card order.
    pub fn list_matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn get(&self, id: MatchId) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of matches currently in play.
    pub fn live_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_live()).count()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            matches: default_fixtures(),
        }
    }
}

/// The built-in tournament card used when configuration lists no matches.
pub fn default_fixtures() -> Vec<MatchRecord> {
    let fixture = |id, home: &str, away: &str, date: &str, time: &str, odds, status| MatchRecord {
        id,
        home_team: home.to_string(),
        away_team: away.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        odds,
        status,
    };

    vec![
        fixture(
            1,
            "Spartak",
            "Dynamo",
            "15 November",
            "19:00",
            Odds::new(dec!(2.1), dec!(3.2), dec!(3.5)),
            MatchStatus::Live,
        ),
        fixture(
            2,
            "Zenit",
            "CSKA",
            "15 November",
            "21:30",
            Odds::new(dec!(1.8), dec!(3.4), dec!(4.2)),
            MatchStatus::Upcoming,
        ),
        fixture(
            3,
            "Lokomotiv",
            "Krasnodar",
            "16 November",
            "16:00",
            Odds::new(dec!(2.3), dec!(3.1), dec!(3.0)),
            MatchStatus::Upcoming,
        ),
        fixture(
            4,
            "Rubin",
            "Rostov",
            "16 November",
            "18:30",
            Odds::new(dec!(2.5), dec!(3.0), dec!(2.8)),
            MatchStatus::Upcoming,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
