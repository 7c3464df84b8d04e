//! Реконструкция `HandState` из строк хранилища и обратная проекция.
//!
//! `reconstruct_state_from_db` — единственная точка интеграции между
//! хранилищем и чистым движком: все остальные компоненты работают
//! только с `HandState` в памяти. Функция чистая и тотальная на
//! корректных данных: не трогает ни часы, ни рандом. Пропущенные или
//! NULL-колонки приводятся к нулю/false; невозможные данные (битые
//! карты, дубликаты, позиции вне стола) — `MalformedState`.

use std::collections::{BTreeSet, HashSet};

use crate::domain::card::{cards_from_string, cards_to_string, Card};
use crate::domain::chips::Chips;
use crate::domain::hand::{EngineConfig, HandState, Street};
use crate::domain::seat::{Seat, SeatIndex};
use crate::domain::seed::HandSeed;
use crate::engine::errors::EngineError;
use crate::infra::persistence::{HandRow, HandSnapshot, PotRow, SeatRow};

fn street_to_str(street: Street) -> &'static str {
    match street {
        Street::Preflop => "preflop",
        Street::Flop => "flop",
        Street::Turn => "turn",
        Street::River => "river",
        Street::Showdown => "showdown",
    }
}

fn street_from_str(s: &str) -> Option<Street> {
    match s {
        "preflop" => Some(Street::Preflop),
        "flop" => Some(Street::Flop),
        "turn" => Some(Street::Turn),
        "river" => Some(Street::River),
        "showdown" => Some(Street::Showdown),
        _ => None,
    }
}

/// CSV индексов мест → набор (мусорные токены игнорируются).
fn seats_from_csv(s: &str) -> BTreeSet<SeatIndex> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse::<SeatIndex>().ok())
        .collect()
}

fn seats_to_csv<'a>(seats: impl Iterator<Item = &'a SeatIndex>) -> String {
    seats
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Позиция из числовой колонки: NULL приводится к 0, отрицательное или
/// не влезающее в SeatIndex значение — невозможные данные.
fn coerce_pos(value: Option<i64>, what: &str) -> Result<SeatIndex, EngineError> {
    let v = value.unwrap_or(0);
    SeatIndex::try_from(v)
        .map_err(|_| EngineError::MalformedState(format!("{what} вне диапазона: {v}")))
}

/// Собрать `HandState` из строк хранилища.
pub fn reconstruct_state_from_db(
    config: &EngineConfig,
    hand_row: &HandRow,
    seat_rows: &[SeatRow],
    pot_rows: &[PotRow],
) -> Result<HandState, EngineError> {
    let street = match hand_row.street.as_deref() {
        None | Some("") => Street::Preflop,
        Some(s) => street_from_str(s)
            .ok_or_else(|| EngineError::MalformedState(format!("неизвестная улица {s:?}")))?,
    };

    let mut sorted: Vec<&SeatRow> = seat_rows.iter().collect();
    sorted.sort_by_key(|r| r.seat_pos);

    let mut seats = Vec::with_capacity(sorted.len());
    for row in sorted {
        let seat_pos = SeatIndex::try_from(row.seat_pos).map_err(|_| {
            EngineError::MalformedState(format!("индекс места вне диапазона: {}", row.seat_pos))
        })?;

        let hole = match row.hole.as_deref() {
            None | Some("") => None,
            Some(s) => {
                let cards = cards_from_string(s)
                    .map_err(|e| EngineError::MalformedState(format!("битые карты места: {e}")))?;
                match cards.as_slice() {
                    [a, b] => Some([*a, *b]),
                    _ => {
                        return Err(EngineError::MalformedState(format!(
                            "у места {seat_pos} не две карманные карты"
                        )))
                    }
                }
            }
        };

        seats.push(Seat {
            seat_pos,
            user_ref: row.user_ref.unwrap_or(0),
            stack: Chips(row.stack.unwrap_or(0)),
            bet: Chips(row.bet.unwrap_or(0)),
            total_contributed: Chips(row.total_contributed.unwrap_or(0)),
            in_hand: row.in_hand.unwrap_or(false),
            is_all_in: row.is_all_in.unwrap_or(false),
            hole,
        });
    }

    if seats.len() < 2 {
        return Err(EngineError::MalformedState(format!(
            "в раздаче {} мест, нужно минимум два",
            seats.len()
        )));
    }
    let known: BTreeSet<SeatIndex> = seats.iter().map(|s| s.seat_pos).collect();
    if known.len() != seats.len() {
        return Err(EngineError::MalformedState(
            "дублирующиеся индексы мест".to_string(),
        ));
    }

    let dealer_pos = coerce_pos(hand_row.dealer_pos, "позиция дилера")?;
    let small_blind_pos = coerce_pos(hand_row.small_blind_pos, "позиция малого блайнда")?;
    let big_blind_pos = coerce_pos(hand_row.big_blind_pos, "позиция большого блайнда")?;

    let acting_pos = match hand_row.acting_pos {
        None => None,
        Some(v) if v < 0 => None,
        Some(v) => {
            let pos = coerce_pos(Some(v), "позиция хода")?;
            if !known.contains(&pos) {
                return Err(EngineError::MalformedState(format!(
                    "ход у незанятого места {pos}"
                )));
            }
            Some(pos)
        }
    };

    let board = match hand_row.board.as_deref() {
        None | Some("") => Vec::new(),
        Some(s) => cards_from_string(s)
            .map_err(|e| EngineError::MalformedState(format!("битый борд: {e}")))?,
    };
    // Терминальные строки не проверяем на длину: fold-out завершает
    // раздачу с любым бордом.
    if street != Street::Showdown && board.len() != street.expected_board_len() {
        return Err(EngineError::MalformedState(format!(
            "борд из {} карт на улице {:?}",
            board.len(),
            street
        )));
    }

    let mut in_play: HashSet<Card> = HashSet::new();
    for card in board
        .iter()
        .chain(seats.iter().filter_map(|s| s.hole.as_ref()).flatten())
    {
        if !in_play.insert(*card) {
            return Err(EngineError::MalformedState(format!(
                "карта {card} встречается дважды"
            )));
        }
    }

    let seed = match hand_row.seed.as_deref() {
        None | Some("") => {
            return Err(EngineError::MalformedState(
                "строка раздачи без seed".to_string(),
            ))
        }
        Some(s) => HandSeed::from_hex(s)
            .map_err(|e| EngineError::MalformedState(format!("битый seed: {e}")))?,
    };

    let pots = pot_rows
        .iter()
        .map(|row| crate::domain::pot::Pot {
            amount: Chips(row.amount.unwrap_or(0)),
            eligible_seats: row
                .eligible
                .as_deref()
                .map(|s| seats_from_csv(s).into_iter().collect())
                .unwrap_or_default(),
        })
        .collect();

    Ok(HandState {
        hand_id: hand_row.hand_id,
        street,
        dealer_pos,
        small_blind_pos,
        big_blind_pos,
        acting_pos,
        current_bet: Chips(hand_row.current_bet.unwrap_or(0)),
        // Легаси-строка не может опустить минимальный рейз ниже BB стола.
        min_raise: config.big_blind.max(Chips(hand_row.min_raise.unwrap_or(0))),
        big_blind: config.big_blind,
        board,
        seats,
        pots,
        acted_this_street: hand_row
            .acted
            .as_deref()
            .map(seats_from_csv)
            .unwrap_or_default(),
        seed,
        version: hand_row.version.unwrap_or(0),
    })
}

/// Обратная проекция: `HandState` → строки для записи.
pub fn state_to_rows(state: &HandState) -> HandSnapshot {
    HandSnapshot {
        hand: HandRow {
            hand_id: state.hand_id,
            street: Some(street_to_str(state.street).to_string()),
            dealer_pos: Some(state.dealer_pos as i64),
            small_blind_pos: Some(state.small_blind_pos as i64),
            big_blind_pos: Some(state.big_blind_pos as i64),
            acting_pos: Some(state.acting_pos.map(|p| p as i64).unwrap_or(-1)),
            current_bet: Some(state.current_bet.0),
            min_raise: Some(state.min_raise.0),
            board: Some(cards_to_string(&state.board)),
            acted: Some(seats_to_csv(state.acted_this_street.iter())),
            seed: Some(state.seed.to_hex()),
            version: Some(state.version),
        },
        seats: state
            .seats
            .iter()
            .map(|s| SeatRow {
                seat_pos: s.seat_pos as i64,
                user_ref: Some(s.user_ref),
                stack: Some(s.stack.0),
                bet: Some(s.bet.0),
                total_contributed: Some(s.total_contributed.0),
                in_hand: Some(s.in_hand),
                is_all_in: Some(s.is_all_in),
                hole: s.hole.map(|h| cards_to_string(&h)),
            })
            .collect(),
        pots: state
            .pots
            .iter()
            .map(|p| PotRow {
                amount: Some(p.amount.0),
                eligible: Some(seats_to_csv(p.eligible_seats.iter())),
            })
            .collect(),
    }
}
