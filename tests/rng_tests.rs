// tests/rng_tests.rs

//! Тесты детерминированной сдачи:
//! - одинаковый seed → одинаковая перестановка, разные → разные;
//! - в перестановке все 52 карты без повторов;
//! - дельта борда идемпотентна и не пересекается с картами в игре;
//! - исчерпание перестановки — InsufficientCards;
//! - hash-reseeding стабилен, hex-кодек ходит по кругу.

use std::collections::HashSet;

use holdem_engine::domain::card::Card;
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::deck;
use holdem_engine::domain::hand::EngineConfig;
use holdem_engine::domain::seed::HandSeed;
use holdem_engine::engine::dealing::compute_board_delta;
use holdem_engine::engine::{start_hand, EngineError, HandOutcome, Participant};

fn config() -> EngineConfig {
    EngineConfig::new(Chips::new(50), Chips::new(100))
}

fn two_player_state(seed: u64) -> holdem_engine::domain::hand::HandState {
    let participants = [
        Participant {
            seat_pos: 0,
            user_ref: 1,
            stack: Chips::new(1_000),
        },
        Participant {
            seat_pos: 1,
            user_ref: 2,
            stack: Chips::new(1_000),
        },
    ];
    let (state, _, outcome) = start_hand(&config(), 1, HandSeed::from_u64(seed), &participants, 0)
        .expect("start_hand failed");
    assert!(matches!(outcome, HandOutcome::Ongoing));
    state
}

//
// ====================== ПЕРЕСТАНОВКА ======================
//

#[test]
fn same_seed_same_permutation() {
    let a = deck::shuffled_for(&HandSeed::from_u64(123));
    let b = deck::shuffled_for(&HandSeed::from_u64(123));
    assert_eq!(a, b, "одинаковый seed обязан давать одинаковую колоду");
}

#[test]
fn different_seeds_different_permutations() {
    let a = deck::shuffled_for(&HandSeed::from_u64(111));
    let b = deck::shuffled_for(&HandSeed::from_u64(222));
    assert_ne!(a, b);
}

#[test]
fn permutation_contains_all_52_cards_once() {
    let perm = deck::shuffled_for(&HandSeed::from_u64(5));
    assert_eq!(perm.len(), 52);

    let unique: HashSet<Card> = perm.iter().copied().collect();
    assert_eq!(unique.len(), 52, "без повторов");
}

//
// ====================== ДЕЛЬТА БОРДА ======================
//

#[test]
fn board_delta_is_idempotent() {
    let state = two_player_state(42);

    let first = compute_board_delta(&state, 3).expect("дельта флопа");
    let second = compute_board_delta(&state, 3).expect("повторная дельта");
    assert_eq!(first, second, "ретрай не пересдаёт карты");
}

#[test]
fn board_delta_never_repeats_cards_in_play() {
    let state = two_player_state(42);

    let delta = compute_board_delta(&state, 5).expect("дельта");
    let mut in_play: HashSet<Card> = state.board.iter().copied().collect();
    for seat in &state.seats {
        if let Some(hole) = seat.hole {
            in_play.extend(hole);
        }
    }

    assert_eq!(delta.len(), 5);
    assert!(
        delta.iter().all(|c| !in_play.contains(c)),
        "дельта не пересекается с картами в игре"
    );
}

#[test]
fn exhausted_permutation_is_insufficient_cards() {
    let state = two_player_state(42);

    // В игре 4 карманные карты, свободных остаётся 48.
    let err = compute_board_delta(&state, 49).expect_err("колода конечна");
    assert_eq!(err, EngineError::InsufficientCards);
    assert!(compute_board_delta(&state, 48).is_ok());
}

//
// ====================== SEED ======================
//

#[test]
fn derive_is_stable_and_context_sensitive() {
    let base = HandSeed::from_u64(9);

    assert_eq!(base.derive(1, 2), base.derive(1, 2), "derive детерминирован");
    assert_ne!(base.derive(1, 2), base.derive(1, 3), "контекст меняет seed");
    assert_ne!(base.derive(1, 2), base, "derive не возвращает исходный seed");
}

#[test]
fn seed_hex_roundtrip() {
    let seed = HandSeed::from_u64(777).derive(5, 1);
    let hex = seed.to_hex();

    assert_eq!(hex.len(), 64);
    let parsed = HandSeed::from_hex(&hex).expect("hex обязан парситься");
    assert_eq!(parsed, seed);

    assert!(HandSeed::from_hex("xyz").is_err());
    assert!(HandSeed::from_hex(&hex[..62]).is_err());
}
