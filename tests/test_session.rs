use std::collections::HashSet;

use video_poker::cards::{full_pack, parse_hand, Deck};
use video_poker::config::GameConfig;
use video_poker::error::PokerError;
use video_poker::hand_evaluator::{rank_hand, HandRank};
use video_poker::paytable::Paytable;
use video_poker::session::*;

fn seeded(seed: u64) -> Session {
    let config = GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    };
    Session::with_config(&config).unwrap()
}

fn expected_payout(session: &Session, rank: HandRank, bet: u64) -> u64 {
    if rank == HandRank::RoyalFlush && bet == 5 {
        4000
    } else {
        session.paytable().multiplier(rank) as u64 * bet
    }
}

#[test]
fn test_new_session() {
    let session = Session::new().unwrap();
    assert_eq!(session.bankroll(), STARTING_BANKROLL);
    assert_eq!(session.net_gain(), 0);
    assert_eq!(session.current_bet(), 0);
    assert_eq!(session.state(), SessionState::AwaitingBet);
    assert!(session.cards_in_hand().is_empty());
}

#[test]
fn test_full_round_hold_all() {
    let mut session = seeded(17);
    let dealt_rank = session.place_bet(5).unwrap();
    assert_eq!(session.bankroll(), 95);
    assert_eq!(session.net_gain(), -5);
    assert_eq!(session.current_bet(), 5);
    assert_eq!(session.state(), SessionState::AwaitingHold);
    assert_eq!(session.cards_in_hand().len(), 5);
    assert_eq!(session.deck().remaining(), 47);

    let dealt = session.cards_in_hand().to_vec();
    let final_rank = session.apply_hold(&[true; 5]).unwrap();
    assert_eq!(final_rank, dealt_rank);
    assert_eq!(session.cards_in_hand(), dealt.as_slice());
    assert_eq!(session.state(), SessionState::AwaitingPayout);

    let won = session.settle_payout().unwrap();
    assert_eq!(won, expected_payout(&session, final_rank, 5));
    assert_eq!(session.bankroll(), 95 + won);
    assert_eq!(session.net_gain(), won as i64 - 5);
    assert_eq!(session.current_bet(), 0);
    assert_eq!(session.state(), SessionState::AwaitingBet);
}

#[test]
fn test_discard_all_replaces_every_card() {
    let mut session = seeded(3);
    session.place_bet(1).unwrap();
    let dealt: HashSet<_> = session.cards_in_hand().iter().copied().collect();

    let rank = session.apply_hold(&[false; 5]).unwrap();
    let redrawn = session.cards_in_hand();
    assert_eq!(redrawn.len(), 5);
    assert!(redrawn.iter().all(|c| !dealt.contains(c)));
    assert_eq!(rank_hand(redrawn).unwrap(), rank);
    assert_eq!(session.deck().remaining(), 42);
}

#[test]
fn test_partial_hold_keeps_positions() {
    let mut session = seeded(8);
    session.place_bet(2).unwrap();
    let dealt = session.cards_in_hand().to_vec();
    let keep = [true, false, true, false, true];

    session.apply_hold(&keep).unwrap();
    let after = session.cards_in_hand();
    for (i, &held) in keep.iter().enumerate() {
        if held {
            assert_eq!(after[i], dealt[i]);
        } else {
            assert!(!dealt.contains(&after[i]));
        }
    }
    assert_eq!(session.deck().remaining(), 45);
}

#[test]
fn test_deck_restored_each_round() {
    let mut session = seeded(12);
    for _ in 0..10 {
        session.place_bet(1).unwrap();
        assert_eq!(session.deck().remaining(), 47);
        session.apply_hold(&[false, true, false, true, false]).unwrap();
        session.settle_payout().unwrap();
    }
    assert_eq!(session.state(), SessionState::AwaitingBet);
}

#[test]
fn test_net_gain_tracks_bankroll() {
    let mut session = seeded(44);
    for _ in 0..25 {
        if session.bankroll() == 0 {
            break;
        }
        session.place_bet(1).unwrap();
        session.apply_hold(&[true, true, false, false, false]).unwrap();
        session.settle_payout().unwrap();
        assert_eq!(
            session.bankroll() as i64,
            STARTING_BANKROLL as i64 + session.net_gain()
        );
    }
}

#[test]
fn test_out_of_order_calls() {
    let mut session = seeded(1);
    assert!(matches!(
        session.apply_hold(&[true; 5]),
        Err(PokerError::IllegalState { .. })
    ));
    assert!(matches!(
        session.settle_payout(),
        Err(PokerError::IllegalState { .. })
    ));

    session.place_bet(3).unwrap();
    assert!(matches!(
        session.place_bet(3),
        Err(PokerError::IllegalState { .. })
    ));
    assert!(session.settle_payout().is_err());
    assert_eq!(session.bankroll(), 97);

    session.apply_hold(&[true; 5]).unwrap();
    assert!(session.apply_hold(&[true; 5]).is_err());
    assert!(session.place_bet(1).is_err());
    session.settle_payout().unwrap();
    assert_eq!(session.state(), SessionState::AwaitingBet);
}

#[test]
fn test_invalid_bets() {
    let mut session = seeded(2);
    assert!(matches!(session.place_bet(0), Err(PokerError::InvalidBet { .. })));
    assert!(matches!(session.place_bet(6), Err(PokerError::InvalidBet { .. })));
    assert_eq!(session.bankroll(), STARTING_BANKROLL);
    assert_eq!(session.state(), SessionState::AwaitingBet);
}

#[test]
fn test_insufficient_funds() {
    let config = GameConfig {
        starting_bankroll: 3,
        seed: Some(6),
        ..GameConfig::default()
    };
    let mut session = Session::with_config(&config).unwrap();
    assert!(matches!(
        session.place_bet(4),
        Err(PokerError::InsufficientFunds { bet: 4, bankroll: 3 })
    ));
    assert_eq!(session.bankroll(), 3);
    assert_eq!(session.state(), SessionState::AwaitingBet);

    session.place_bet(3).unwrap();
    assert_eq!(session.bankroll(), 0);
}

#[test]
fn test_add_funds() {
    let mut session = seeded(5);
    assert_eq!(session.add_funds(50).unwrap(), 150);
    assert_eq!(session.bankroll(), 150);
}

#[test]
fn test_add_funds_overflow() {
    let mut session = seeded(5);
    assert!(matches!(
        session.add_funds(u64::MAX),
        Err(PokerError::InvalidValue(_))
    ));
    assert_eq!(session.bankroll(), STARTING_BANKROLL);
}

/// A one-pack shoe holding only the given five cards.
fn stacked_deck(notation: &str) -> Deck {
    let keep = parse_hand(notation).unwrap();
    let rest: Vec<_> = full_pack().into_iter().filter(|c| !keep.contains(c)).collect();
    Deck::without(1, &rest, Some(1)).unwrap()
}

#[test]
fn test_royal_at_max_bet_pays_jackpot() {
    let deck = stacked_deck("Ts Js Qs Ks As");
    let mut session = Session::with_deck(deck, Paytable::default(), 100);

    assert_eq!(session.place_bet(5).unwrap(), HandRank::RoyalFlush);
    assert_eq!(session.apply_hold(&[true; 5]).unwrap(), HandRank::RoyalFlush);
    assert_eq!(session.settle_payout().unwrap(), 4000);
    assert_eq!(session.bankroll(), 95 + 4000);
    assert_eq!(session.net_gain(), 3995);
}

#[test]
fn test_royal_below_max_bet_pays_table() {
    let deck = stacked_deck("Th Jh Qh Kh Ah");
    let mut session = Session::with_deck(deck, Paytable::default(), 100);

    session.place_bet(4).unwrap();
    session.apply_hold(&[true; 5]).unwrap();
    assert_eq!(session.settle_payout().unwrap(), 250 * 4);
}

#[test]
fn test_bad_hold_length() {
    let mut session = seeded(9);
    session.place_bet(1).unwrap();
    assert!(matches!(
        session.apply_hold(&[true, false]),
        Err(PokerError::InvalidHoldMask(2))
    ));
    assert_eq!(session.state(), SessionState::AwaitingHold);
    assert!(session.apply_hold(&[false; 5]).is_ok());
}

#[test]
fn test_multi_deck_session() {
    let config = GameConfig {
        num_decks: 2,
        seed: Some(10),
        ..GameConfig::default()
    };
    let mut session = Session::with_config(&config).unwrap();
    session.place_bet(5).unwrap();
    assert_eq!(session.deck().remaining(), 99);
}

#[test]
fn test_unknown_paytable() {
    let config = GameConfig {
        paytable: "deuces-wild".to_string(),
        ..GameConfig::default()
    };
    assert!(matches!(
        Session::with_config(&config),
        Err(PokerError::UnknownPaytable(_))
    ));
}
