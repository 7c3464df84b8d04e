// tests/engine_streets_tests.rs

//! Тесты завершения раунда ставок и перехода улиц:
//! - уравнявшие и действовавшие места закрывают раунд, флоп — ровно 3 карты;
//! - большой блайнд сохраняет право хода на префлопе (лимп не закрывает раунд);
//! - полный рейз переоткрывает торговлю, олл-ин ниже минимума — нет;
//! - когда действовать некому, улицы догоняются до шоудауна.

use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::hand::{EngineConfig, HandState, Street};
use holdem_engine::domain::seed::HandSeed;
use holdem_engine::engine::streets::is_betting_round_complete;
use holdem_engine::engine::{
    apply_action, start_hand, EngineError, EventLog, HandOutcome, Participant, PlayerAction,
    RuleViolation,
};

fn config() -> EngineConfig {
    EngineConfig::new(Chips::new(50), Chips::new(100))
}

fn hand(stacks: &[u64], seed: u64) -> HandState {
    let participants: Vec<Participant> = stacks
        .iter()
        .enumerate()
        .map(|(i, stack)| Participant {
            seat_pos: i as u8,
            user_ref: 100 + i as u64,
            stack: Chips::new(*stack),
        })
        .collect();
    let (state, _, outcome) = start_hand(&config(), 3, HandSeed::from_u64(seed), &participants, 0)
        .expect("start_hand failed");
    assert!(matches!(outcome, HandOutcome::Ongoing));
    state
}

//
// ====================== ЗАВЕРШЕНИЕ РАУНДА ======================
//

/// Два активных места, оба уравняли 200 и оба действовали —
/// раунд закрыт, переход префлоп→флоп открывает ровно 3 карты.
#[test]
fn matched_bets_after_raise_close_round_and_deal_flop() {
    let mut state = hand(&[1_000, 1_000], 11);
    let mut log = EventLog::new();

    // Дилер-SB повышает до 200, BB уравнивает.
    apply_action(&mut state, 0, PlayerAction::Raise(Chips::new(200)), &mut log)
        .expect("raise to 200");
    assert!(!is_betting_round_complete(&state), "BB ещё не действовал");

    apply_action(&mut state, 1, PlayerAction::Call, &mut log).expect("call");

    assert_eq!(state.street, Street::Flop);
    assert_eq!(state.board.len(), 3, "флоп — ровно три карты");
    assert_eq!(state.current_bet, Chips::ZERO);
    assert!(state.acted_this_street.is_empty());
    assert!(state.seats.iter().all(|s| s.bet.is_zero()));
    assert_eq!(
        state.acting_pos,
        Some(1),
        "постфлоп первым ходит активное место слева от дилера"
    );
    assert_eq!(state.total_chips(), Chips::new(2_000));
}

/// Лимп малого блайнда не закрывает префлоп: большой блайнд ещё
/// имеет право хода, хотя ставки уже равны.
#[test]
fn big_blind_keeps_option_after_limp() {
    let mut state = hand(&[1_000, 1_000], 12);
    let mut log = EventLog::new();

    apply_action(&mut state, 0, PlayerAction::Call, &mut log).expect("limp");

    assert_eq!(state.street, Street::Preflop, "раунд не закрыт");
    assert_eq!(state.acting_pos, Some(1), "опция большого блайнда");

    apply_action(&mut state, 1, PlayerAction::Check, &mut log).expect("check option");
    assert_eq!(state.street, Street::Flop);
}

/// Место, уравнявшее ставку раньше, обязано ответить на новый рейз:
/// одного «действовал» без совпадения ставок мало.
#[test]
fn caller_must_respond_to_new_raise() {
    let mut state = hand(&[5_000, 5_000, 5_000], 13);
    let mut log = EventLog::new();

    apply_action(&mut state, 0, PlayerAction::Call, &mut log).expect("call");
    apply_action(&mut state, 1, PlayerAction::Raise(Chips::new(400)), &mut log).expect("raise");
    apply_action(&mut state, 2, PlayerAction::Call, &mut log).expect("call bb");

    // Место 0 уже действовало, но ставка снова не уравнена.
    assert_eq!(state.street, Street::Preflop);
    assert_eq!(state.acting_pos, Some(0));

    apply_action(&mut state, 0, PlayerAction::Call, &mut log).expect("call the raise");
    assert_eq!(state.street, Street::Flop);
}

//
// ====================== ПЕРЕОТКРЫТИЕ ТОРГОВЛИ ======================
//

/// Олл-ин ниже минимального рейза двигает уровень ставки, но НЕ
/// переоткрывает торговлю: уже действовавшее место не вправе рейзить.
#[test]
fn under_min_all_in_does_not_reopen_betting() {
    // SB (место 1) со стеком 475: после блайнда остаётся 425.
    let mut state = hand(&[10_000, 475, 10_000], 14);
    let mut log = EventLog::new();

    apply_action(&mut state, 0, PlayerAction::Raise(Chips::new(300)), &mut log)
        .expect("open raise");
    assert_eq!(state.min_raise, Chips::new(200));

    // Олл-ин SB до 475: инкремент 175 < 200.
    apply_action(&mut state, 1, PlayerAction::AllIn, &mut log).expect("short all-in");
    assert_eq!(state.current_bet, Chips::new(475));

    apply_action(&mut state, 2, PlayerAction::Call, &mut log).expect("bb call");

    // Место 0 уравняло старые 300 и торговлю ему не переоткрывали.
    assert_eq!(state.acting_pos, Some(0));
    let err = apply_action(&mut state, 0, PlayerAction::Raise(Chips::new(900)), &mut log)
        .expect_err("рейз после неполного олл-ина обязан отбиться");
    assert_eq!(err, EngineError::Rule(RuleViolation::BettingNotReopened));

    // Call доступен и закрывает раунд.
    apply_action(&mut state, 0, PlayerAction::Call, &mut log).expect("call");
    assert_eq!(state.street, Street::Flop);
    assert_eq!(state.total_chips(), Chips::new(20_475));
}

/// Полный рейз очищает набор действовавших — торговля переоткрыта.
#[test]
fn full_raise_reopens_betting() {
    let mut state = hand(&[10_000, 10_000, 10_000], 15);
    let mut log = EventLog::new();

    apply_action(&mut state, 0, PlayerAction::Call, &mut log).expect("limp");
    apply_action(&mut state, 1, PlayerAction::Raise(Chips::new(400)), &mut log).expect("raise");
    apply_action(&mut state, 2, PlayerAction::Call, &mut log).expect("call");

    // Лимпер вправе перерейзить: полный рейз снял его из набора.
    apply_action(&mut state, 0, PlayerAction::Raise(Chips::new(800)), &mut log)
        .expect("re-raise after full raise");
    assert_eq!(state.current_bet, Chips::new(800));
}

//
// ====================== ДОГОН УЛИЦ ======================
//

/// Оба в олл-ине на префлопе: борд досдаётся до пяти карт без
/// дальнейших действий, раздача завершается шоудауном.
#[test]
fn all_in_runout_cascades_to_showdown() {
    let mut state = hand(&[1_000, 1_000], 16);
    let mut log = EventLog::new();

    apply_action(&mut state, 0, PlayerAction::AllIn, &mut log).expect("shove");
    let outcome = apply_action(&mut state, 1, PlayerAction::Call, &mut log).expect("call all-in");

    let summary = match outcome {
        HandOutcome::Finished(s) => s,
        HandOutcome::Ongoing => panic!("раздача обязана завершиться"),
    };

    assert_eq!(state.street, Street::Showdown);
    assert_eq!(state.board.len(), 5, "борд догнан до пяти карт");
    assert_eq!(state.acting_pos, None);
    assert_eq!(summary.board.len(), 5);
    assert_eq!(summary.total_awarded, Chips::new(2_000));
    assert_eq!(state.total_chips(), Chips::new(2_000));

    let winners: Chips = summary.results.iter().map(|r| r.won).sum();
    assert_eq!(winners, Chips::new(2_000));
}

/// Каждая улица даёт ожидаемую длину борда: 3 → 4 → 5.
#[test]
fn board_length_follows_streets() {
    let mut state = hand(&[2_000, 2_000], 17);
    let mut log = EventLog::new();

    apply_action(&mut state, 0, PlayerAction::Call, &mut log).expect("limp");
    apply_action(&mut state, 1, PlayerAction::Check, &mut log).expect("check");
    assert_eq!((state.street, state.board.len()), (Street::Flop, 3));

    apply_action(&mut state, 1, PlayerAction::Check, &mut log).expect("check");
    apply_action(&mut state, 0, PlayerAction::Check, &mut log).expect("check");
    assert_eq!((state.street, state.board.len()), (Street::Turn, 4));

    apply_action(&mut state, 1, PlayerAction::Check, &mut log).expect("check");
    apply_action(&mut state, 0, PlayerAction::Check, &mut log).expect("check");
    assert_eq!((state.street, state.board.len()), (Street::River, 5));

    apply_action(&mut state, 1, PlayerAction::Check, &mut log).expect("check");
    let outcome = apply_action(&mut state, 0, PlayerAction::Check, &mut log).expect("check");
    assert!(matches!(outcome, HandOutcome::Finished(_)));
    assert_eq!(state.street, Street::Showdown);
    assert_eq!(state.board.len(), 5, "шоудаун карт не добавляет");
}
