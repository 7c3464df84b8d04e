// tests/reconstruct_tests.rs

//! Тесты реконструкции состояния из строк хранилища:
//! - legacy-строки с пропущенными колонками приводятся к нулю/false;
//! - min_raise никогда не опускается ниже большого блайнда стола;
//! - acting_pos = -1 читается как «хода никто не ждёт»;
//! - невозможные данные дают MalformedState;
//! - state → rows → state — точный круговой проход.

use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::hand::{EngineConfig, Street};
use holdem_engine::domain::seed::HandSeed;
use holdem_engine::engine::{start_hand, EngineError, HandOutcome, Participant};
use holdem_engine::infra::{
    reconstruct_state_from_db, state_to_rows, HandRow, HandSnapshot, SeatRow,
};

fn config() -> EngineConfig {
    EngineConfig::new(Chips::new(50), Chips::new(100))
}

fn seed_hex() -> String {
    HandSeed::from_u64(42).to_hex()
}

/// Минимальная корректная строка раздачи: только id и seed.
fn bare_hand_row() -> HandRow {
    HandRow {
        hand_id: 5,
        seed: Some(seed_hex()),
        ..HandRow::default()
    }
}

fn bare_seat_row(pos: i64) -> SeatRow {
    SeatRow {
        seat_pos: pos,
        ..SeatRow::default()
    }
}

//
// ====================== КОЭРЦИЯ LEGACY-СТРОК ======================
//

#[test]
fn missing_columns_coerce_to_zero_and_false() {
    let state = reconstruct_state_from_db(
        &config(),
        &bare_hand_row(),
        &[bare_seat_row(1), bare_seat_row(0)],
        &[],
    )
    .expect("реконструкция legacy-строки");

    assert_eq!(state.street, Street::Preflop);
    assert_eq!(state.current_bet, Chips::ZERO);
    assert_eq!(state.version, 0);
    assert_eq!(state.acting_pos, None);
    assert!(state.board.is_empty());
    assert!(state.pots.is_empty());

    // Места отсортированы по позиции, поля по умолчанию.
    assert_eq!(state.seats[0].seat_pos, 0);
    assert_eq!(state.seats[1].seat_pos, 1);
    assert!(state.seats.iter().all(|s| s.stack.is_zero()
        && s.bet.is_zero()
        && !s.in_hand
        && !s.is_all_in
        && s.hole.is_none()));
}

#[test]
fn min_raise_is_clamped_to_big_blind() {
    let mut row = bare_hand_row();
    row.min_raise = Some(40); // битое/устаревшее значение ниже BB

    let state =
        reconstruct_state_from_db(&config(), &row, &[bare_seat_row(0), bare_seat_row(1)], &[])
            .expect("реконструкция");

    assert_eq!(state.min_raise, Chips::new(100), "не ниже большого блайнда");

    let mut row = bare_hand_row();
    row.min_raise = Some(250);
    let state =
        reconstruct_state_from_db(&config(), &row, &[bare_seat_row(0), bare_seat_row(1)], &[])
            .expect("реконструкция");
    assert_eq!(state.min_raise, Chips::new(250), "большее значение сохраняется");
}

#[test]
fn acting_pos_minus_one_means_nobody() {
    let mut row = bare_hand_row();
    row.acting_pos = Some(-1);

    let state =
        reconstruct_state_from_db(&config(), &row, &[bare_seat_row(0), bare_seat_row(1)], &[])
            .expect("реконструкция");
    assert_eq!(state.acting_pos, None);
}

/// JSON-документ без половины колонок декодируется и реконструируется.
#[test]
fn json_document_with_missing_columns_decodes() {
    let doc = serde_json::json!({
        "hand": { "hand_id": 5, "seed": seed_hex(), "street": "preflop" },
        "seats": [ { "seat_pos": 0 }, { "seat_pos": 1, "stack": 500 } ],
        "pots": []
    });
    let snapshot: HandSnapshot = serde_json::from_value(doc).expect("decode снапшота");

    let state =
        reconstruct_state_from_db(&config(), &snapshot.hand, &snapshot.seats, &snapshot.pots)
            .expect("реконструкция");
    assert_eq!(state.seats[1].stack, Chips::new(500));
    assert_eq!(state.seats[0].stack, Chips::ZERO);
}

//
// ====================== НЕВОЗМОЖНЫЕ ДАННЫЕ ======================
//

#[test]
fn unknown_street_is_malformed() {
    let mut row = bare_hand_row();
    row.street = Some("прилив".to_string());

    let err =
        reconstruct_state_from_db(&config(), &row, &[bare_seat_row(0), bare_seat_row(1)], &[])
            .expect_err("неизвестная улица");
    assert!(matches!(err, EngineError::MalformedState(_)));
}

#[test]
fn duplicate_cards_are_malformed() {
    let mut row = bare_hand_row();
    row.street = Some("flop".to_string());
    row.board = Some("Ah Kd Ah".to_string());

    let err =
        reconstruct_state_from_db(&config(), &row, &[bare_seat_row(0), bare_seat_row(1)], &[])
            .expect_err("дубликат карты");
    assert!(matches!(err, EngineError::MalformedState(_)));
}

#[test]
fn board_length_must_match_street() {
    let mut row = bare_hand_row();
    row.street = Some("flop".to_string());
    row.board = Some("Ah Kd".to_string());

    let err =
        reconstruct_state_from_db(&config(), &row, &[bare_seat_row(0), bare_seat_row(1)], &[])
            .expect_err("флоп с двумя картами");
    assert!(matches!(err, EngineError::MalformedState(_)));
}

#[test]
fn missing_seed_is_malformed() {
    let mut row = bare_hand_row();
    row.seed = None;

    let err =
        reconstruct_state_from_db(&config(), &row, &[bare_seat_row(0), bare_seat_row(1)], &[])
            .expect_err("строка без seed");
    assert!(matches!(err, EngineError::MalformedState(_)));
}

#[test]
fn single_seat_is_malformed() {
    let err = reconstruct_state_from_db(&config(), &bare_hand_row(), &[bare_seat_row(0)], &[])
        .expect_err("одно место — не раздача");
    assert!(matches!(err, EngineError::MalformedState(_)));
}

//
// ====================== КРУГОВОЙ ПРОХОД ======================
//

#[test]
fn state_to_rows_roundtrips_exactly() {
    let participants = [
        Participant {
            seat_pos: 0,
            user_ref: 101,
            stack: Chips::new(10_000),
        },
        Participant {
            seat_pos: 1,
            user_ref: 102,
            stack: Chips::new(8_000),
        },
        Participant {
            seat_pos: 2,
            user_ref: 103,
            stack: Chips::new(6_000),
        },
    ];
    let (state, _, outcome) = start_hand(
        &config(),
        77,
        HandSeed::from_u64(9),
        &participants,
        1,
    )
    .expect("start_hand");
    assert!(matches!(outcome, HandOutcome::Ongoing));

    let snapshot = state_to_rows(&state);
    let rebuilt =
        reconstruct_state_from_db(&config(), &snapshot.hand, &snapshot.seats, &snapshot.pots)
            .expect("обратная реконструкция");

    assert_eq!(rebuilt, state, "круговой проход без потерь");
}
