//! Betting scenarios against the default tournament card.
//!
//! Match 1 is Spartak v Dynamo with odds 2.1 / 3.2 / 3.5.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use betslip::catalog::Catalog;
use betslip::engine::{LedgerEngine, SessionError};
use betslip::notify::Notification;
use betslip::types::{LedgerError, Outcome, RejectionKind};

use crate::mock_sink::recording_session;

#[test]
fn test_home_bet_updates_balance_and_totals() {
    let (mut session, sink) = recording_session(dec!(10000));

    session.select_outcome(1, Outcome::Home).unwrap();
    session.set_stake(1, dec!(100)).unwrap();
    session.place_bet(1).unwrap();

    let snap = session.snapshot();
    assert_eq!(snap.balance, dec!(9900));
    assert_eq!(snap.bets.len(), 1);
    assert_eq!(snap.bets[0].label, "Spartak");
    assert_eq!(snap.bets[0].odds, dec!(2.1));
    assert_eq!(snap.bets[0].stake, dec!(100));
    assert_eq!(snap.aggregates.potential_payout, dec!(210));
    assert_eq!(snap.aggregates.potential_profit, dec!(110));

    assert_eq!(
        sink.received(),
        vec![Notification::BetAccepted {
            match_id: 1,
            label: "Spartak".to_string(),
            odds: dec!(2.1),
            stake: dec!(100),
            payout: dec!(210),
        }]
    );
}

#[test]
fn test_stake_above_balance_rejected() {
    let (mut session, sink) = recording_session(dec!(50));

    for id in 1..=4 {
        session.select_outcome(id, Outcome::Away).unwrap();
        let err = session.place_bet(id).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Ledger(LedgerError::InsufficientBalance { .. })
        ));
    }

    assert_eq!(session.ledger().balance(), dec!(50));
    assert!(session.ledger().bets().is_empty());
    assert_eq!(sink.count(), 4);
    assert!(sink.received().iter().all(|n| !n.is_success()));
}

#[test]
fn test_commit_without_selection_changes_nothing() {
    let (mut session, sink) = recording_session(dec!(10000));
    let before = session.snapshot();

    let err = session.place_bet(2).unwrap_err();

    assert_eq!(
        err,
        SessionError::Ledger(LedgerError::NoOutcomeSelected { match_id: 2 })
    );
    assert_eq!(session.snapshot(), before);
    match &sink.received()[0] {
        Notification::BetRejected { reason, .. } => {
            assert_eq!(*reason, RejectionKind::NoOutcomeSelected)
        }
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[test]
fn test_toggled_off_selection_cannot_be_committed() {
    let (mut session, _sink) = recording_session(dec!(10000));

    assert_eq!(session.select_outcome(1, Outcome::Home).unwrap(), Some(Outcome::Home));
    assert_eq!(session.select_outcome(1, Outcome::Home).unwrap(), None);

    let err = session.place_bet(1).unwrap_err();
    assert_eq!(
        err,
        SessionError::Ledger(LedgerError::NoOutcomeSelected { match_id: 1 })
    );
    assert_eq!(session.ledger().balance(), dec!(10000));
}

#[test]
fn test_two_bets_on_one_match() {
    let (mut session, sink) = recording_session(dec!(10000));

    session.select_outcome(1, Outcome::Home).unwrap();
    session.set_stake(1, dec!(150)).unwrap();
    session.place_bet(1).unwrap();

    session.select_outcome(1, Outcome::Draw).unwrap();
    session.set_stake(1, dec!(350)).unwrap();
    session.place_bet(1).unwrap();

    let bets = session.ledger().bets();
    assert_eq!(bets.len(), 2);
    assert_eq!(bets[0].outcome, Outcome::Home);
    assert_eq!(bets[1].outcome, Outcome::Draw);
    assert_eq!(bets[1].label, "Draw");
    assert_eq!(session.ledger().balance(), dec!(9500));
    assert_eq!(sink.count(), 2);

    // 150 × 2.1 + 350 × 3.2 = 315 + 1120
    let totals = session.ledger().compute_aggregates();
    assert_eq!(totals.total_staked, dec!(500));
    assert_eq!(totals.potential_payout, dec!(1435));
    assert_eq!(totals.potential_profit, dec!(935));
}

#[test]
fn test_non_positive_stake_rejected() {
    let (mut session, sink) = recording_session(dec!(10000));

    session.select_outcome(4, Outcome::Home).unwrap();
    session.set_stake(4, Decimal::ZERO).unwrap();
    let err = session.place_bet(4).unwrap_err();

    assert_eq!(
        err,
        SessionError::Ledger(LedgerError::InvalidStake { stake: Decimal::ZERO })
    );
    assert_eq!(session.ledger().balance(), dec!(10000));
    // The slip is kept so the user can correct the stake.
    assert_eq!(session.ledger().selection(4), Some(Outcome::Home));
    assert_eq!(sink.count(), 1);
}

#[test]
fn test_every_commit_moves_balance_by_its_stake() {
    let (mut session, _sink) = recording_session(dec!(1000));
    let stakes = [dec!(120), dec!(300), dec!(45.5), dec!(600), dec!(10), dec!(534.5)];
    let outcomes = [Outcome::Home, Outcome::Draw, Outcome::Away];

    for (i, stake) in stakes.iter().enumerate() {
        let id = (i % 4) as u32 + 1;
        let outcome = outcomes[i % 3];
        if session.ledger().selection(id) != Some(outcome) {
            session.select_outcome(id, outcome).unwrap();
        }
        session.set_stake(id, *stake).unwrap();

        let balance_before = session.ledger().balance();
        let count_before = session.ledger().bets().len();

        match session.place_bet(id) {
            Ok(bet) => {
                assert_eq!(session.ledger().balance(), balance_before - bet.stake);
                assert_eq!(session.ledger().bets().len(), count_before + 1);
            }
            Err(_) => {
                assert_eq!(session.ledger().balance(), balance_before);
                assert_eq!(session.ledger().bets().len(), count_before);
            }
        }
        assert!(session.ledger().balance() >= Decimal::ZERO);
    }

    // 1000 − 120 − 300 − 45.5 = 534.5; 600 is refused; then 10 leaves 524.5
    // and 534.5 is refused.
    assert_eq!(session.ledger().balance(), dec!(524.5));
    assert_eq!(session.ledger().bets().len(), 4);
}

#[test]
fn test_aggregates_are_stable_between_commits() {
    let (mut session, _sink) = recording_session(dec!(10000));
    session.select_outcome(3, Outcome::Away).unwrap();
    session.place_bet(3).unwrap();

    let first = session.ledger().compute_aggregates();
    let second = session.ledger().compute_aggregates();
    assert_eq!(first, second);
    assert_eq!(
        first.potential_profit,
        first.potential_payout - first.total_staked
    );
}

#[test]
fn test_committed_odds_survive_catalog_changes() {
    let mut ledger = LedgerEngine::default();
    let mut record = Catalog::default().get(2).cloned().unwrap();

    ledger.select_outcome(record.id, Outcome::Away);
    ledger.commit_bet(&record).unwrap();

    record.odds.away = dec!(1.01);
    ledger.select_outcome(record.id, Outcome::Away);
    ledger.commit_bet(&record).unwrap();

    let odds: Vec<_> = ledger.bets().iter().map(|b| b.odds).collect();
    assert_eq!(odds, vec![dec!(4.2), dec!(1.01)]);
}

#[test]
fn test_pending_slips_listed_in_match_order() {
    let (mut session, _sink) = recording_session(dec!(10000));
    session.select_outcome(4, Outcome::Draw).unwrap();
    session.select_outcome(2, Outcome::Home).unwrap();
    session.set_stake(2, dec!(75)).unwrap();

    let pending = session.snapshot().pending;
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].match_id, 2);
    assert_eq!(pending[0].stake, dec!(75));
    assert_eq!(pending[1].match_id, 4);
    assert_eq!(pending[1].stake, dec!(100));

    let views = session.matches();
    assert_eq!(views[1].preview_payout, Some(dec!(135)));
    assert_eq!(views[3].preview_payout, Some(dec!(300)));
}
