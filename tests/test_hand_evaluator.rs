use itertools::Itertools;

use video_poker::cards::{parse_hand, Card};
use video_poker::hand_evaluator::*;

fn rank_of(notation: &str) -> HandRank {
    rank_hand(&parse_hand(notation).unwrap()).unwrap()
}

#[test]
fn test_royal_flush() {
    assert_eq!(rank_of("As Ks Qs Js Ts"), HandRank::RoyalFlush);
    assert_eq!(rank_of("Th Jh Qh Kh Ah"), HandRank::RoyalFlush);
}

#[test]
fn test_straight_flush() {
    assert_eq!(rank_of("9s Ks Qs Js Ts"), HandRank::StraightFlush);
    assert_eq!(rank_of("5d 6d 7d 8d 9d"), HandRank::StraightFlush);
}

#[test]
fn test_wheel_straight_flush() {
    assert_eq!(rank_of("Ac 2c 3c 4c 5c"), HandRank::StraightFlush);
}

#[test]
fn test_wheel_straight() {
    assert_eq!(rank_of("Ah 2c 3d 4s 5h"), HandRank::Straight);
}

#[test]
fn test_broadway_straight_offsuit() {
    assert_eq!(rank_of("Ah Kc Qd Js Th"), HandRank::Straight);
}

#[test]
fn test_no_wraparound_straight() {
    assert_eq!(rank_of("Qh Kc Ad 2s 3h"), HandRank::Nothing);
}

#[test]
fn test_four_of_a_kind() {
    assert_eq!(rank_of("7h 7c 7d 7s 2h"), HandRank::FourOfAKind);
    assert_eq!(rank_of("2h Ac Ad As Ah"), HandRank::FourOfAKind);
}

#[test]
fn test_full_house() {
    assert_eq!(rank_of("Kh Kc Kd 3s 3h"), HandRank::FullHouse);
    assert_eq!(rank_of("2h 2c Ad As Ah"), HandRank::FullHouse);
}

#[test]
fn test_flush() {
    assert_eq!(rank_of("2h 5h 9h Jh Kh"), HandRank::Flush);
}

#[test]
fn test_three_of_a_kind() {
    assert_eq!(rank_of("4h 4c 4d 9s Kh"), HandRank::ThreeOfAKind);
}

#[test]
fn test_two_pair() {
    assert_eq!(rank_of("4h 4c 9d 9s Kh"), HandRank::TwoPair);
    // Low two pair still beats a single high pair.
    assert_eq!(rank_of("2h 2c 3d 3s Kh"), HandRank::TwoPair);
}

#[test]
fn test_jacks_or_better_pairs() {
    assert_eq!(rank_of("Jh Jc 2d 5s 8h"), HandRank::JacksOrBetter);
    assert_eq!(rank_of("Qh Qc 2d 5s 8h"), HandRank::JacksOrBetter);
    assert_eq!(rank_of("Kh Kc 2d 5s 8h"), HandRank::JacksOrBetter);
    assert_eq!(rank_of("Ah Ac 2d 5s 8h"), HandRank::JacksOrBetter);
}

#[test]
fn test_low_pairs_are_nothing() {
    assert_eq!(rank_of("Th Tc 2d 5s 8h"), HandRank::Nothing);
    assert_eq!(rank_of("2h 2c 7d 5s 8h"), HandRank::Nothing);
}

#[test]
fn test_high_card_is_nothing() {
    assert_eq!(rank_of("Ah Kc 9d 5s 2h"), HandRank::Nothing);
}

#[test]
fn test_four_flush_is_nothing() {
    assert_eq!(rank_of("2h 5h 9h Jh Kc"), HandRank::Nothing);
}

#[test]
fn test_rank_is_order_independent() {
    let hands = [
        "As Ks Qs Js Ts",
        "Ac 2c 3c 4c 5c",
        "Kh Kc Kd 3s 3h",
        "Ah 2c 3d 4s 5h",
        "4h 4c 9d 9s Kh",
        "Qh Kc Ad 2s 3h",
    ];
    for notation in hands {
        let cards = parse_hand(notation).unwrap();
        let expected = rank_hand(&cards).unwrap();
        for perm in cards.iter().copied().permutations(5) {
            let five: [Card; HAND_SIZE] = perm.try_into().unwrap();
            assert_eq!(rank_five(&five), expected, "{}", notation);
        }
    }
}

#[test]
fn test_wrong_hand_size() {
    let four = parse_hand("As Ks Qs Js").unwrap();
    assert!(rank_hand(&four).is_err());
    let six = parse_hand("As Ks Qs Js Ts 9s").unwrap();
    assert!(rank_hand(&six).is_err());
}

#[test]
fn test_rank_order() {
    assert!(HandRank::RoyalFlush > HandRank::StraightFlush);
    assert!(HandRank::TwoPair > HandRank::JacksOrBetter);
    assert!(HandRank::JacksOrBetter > HandRank::Nothing);
    for (i, rank) in ALL_HAND_RANKS.iter().enumerate() {
        assert_eq!(rank.index(), i);
    }
}

#[test]
fn test_rank_names() {
    assert_eq!(HandRank::JacksOrBetter.to_string(), "Jacks or Better");
    assert_eq!(HandRank::RoyalFlush.to_string(), "Royal Flush");
}
