//! Core engine — catalog-backed bet placement over a local balance.

pub mod ledger;
pub mod accountant;
pub mod session;

pub use ledger::{LedgerConfig, LedgerEngine, LedgerSnapshot, DEFAULT_STAKE};
pub use session::{MatchView, Session, SessionError};
