//! Резолв шоудауна: ранжирование оставшихся рук и распределение банков.

use std::collections::BTreeMap;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandState, HandSummary, SeatResult};
use crate::domain::seat::SeatIndex;
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, HandEventKind, ShowdownEntry};
use crate::engine::positions;
use crate::eval::{describe_hand, evaluate_best_hand, HandRank};

/// Разрезолвить шоудаун. Ожидает `street == Showdown` с полным бордом
/// и уже сметёнными ставками; каждый банк распределяется независимо
/// среди своих претендентов, оставшихся в раздаче.
pub fn resolve_showdown(
    state: &mut HandState,
    log: &mut EventLog,
) -> Result<HandSummary, EngineError> {
    if state.board.len() != 5 {
        return Err(EngineError::MalformedState(format!(
            "шоудаун с бордом из {} карт",
            state.board.len()
        )));
    }

    // Вскрываем и ранжируем все оставшиеся руки.
    let mut revealed: BTreeMap<SeatIndex, (HandRank, [Card; 2])> = BTreeMap::new();
    for seat in state.seats.iter().filter(|s| s.in_hand) {
        let hole = seat.hole.ok_or_else(|| {
            EngineError::MalformedState(format!("нет карманных карт у места {}", seat.seat_pos))
        })?;
        let rank = evaluate_best_hand(&hole, &state.board);
        log.push(HandEventKind::ShowdownReveal {
            seat: seat.seat_pos,
            cards: hole,
            rank,
            hand_desc: describe_hand(rank),
        });
        revealed.insert(seat.seat_pos, (rank, hole));
    }

    // Нечётные фишки сплита уходят первому победителю по часовой от дилера.
    let clockwise = positions::order_after(&state.seats, state.dealer_pos);

    let pots = std::mem::take(&mut state.pots);
    let total_awarded: Chips = pots.iter().map(|p| p.amount).sum();
    let mut won: BTreeMap<SeatIndex, Chips> = BTreeMap::new();

    for pot in &pots {
        let candidates: Vec<SeatIndex> = pot
            .eligible_seats
            .iter()
            .copied()
            .filter(|pos| revealed.contains_key(pos))
            .collect();
        if candidates.is_empty() {
            return Err(EngineError::MalformedState(
                "банк без претендентов на шоудауне".to_string(),
            ));
        }

        let best = candidates
            .iter()
            .filter_map(|pos| revealed.get(pos).map(|(rank, _)| *rank))
            .max()
            .unwrap_or(HandRank(0));
        let winners: Vec<SeatIndex> = candidates
            .into_iter()
            .filter(|pos| revealed.get(pos).map(|(rank, _)| *rank) == Some(best))
            .collect();

        let share = Chips(pot.amount.0 / winners.len() as u64);
        let remainder = Chips(pot.amount.0 % winners.len() as u64);

        let ordered: Vec<SeatIndex> = clockwise
            .iter()
            .copied()
            .filter(|pos| winners.contains(pos))
            .collect();
        for (i, pos) in ordered.iter().enumerate() {
            let prize = if i == 0 { share + remainder } else { share };
            if prize.is_zero() {
                continue;
            }
            if let Some(seat) = state.seat_mut(*pos) {
                seat.stack += prize;
            }
            *won.entry(*pos).or_insert(Chips::ZERO) += prize;
            log.push(HandEventKind::PotAwarded {
                seat: *pos,
                amount: prize,
            });
        }
    }

    let winners: Vec<ShowdownEntry> = won
        .iter()
        .filter_map(|(pos, amount)| {
            revealed.get(pos).map(|(rank, hole)| ShowdownEntry {
                seat: *pos,
                amount: *amount,
                cards: *hole,
                hand_desc: describe_hand(*rank),
            })
        })
        .collect();
    log.push(HandEventKind::ShowdownResults { winners });

    state.acting_pos = None;
    log.push(HandEventKind::HandFinished {
        hand_id: state.hand_id,
    });

    let results = state
        .seats
        .iter()
        .map(|s| SeatResult {
            seat_pos: s.seat_pos,
            user_ref: s.user_ref,
            won: won.get(&s.seat_pos).copied().unwrap_or(Chips::ZERO),
            hand_desc: revealed
                .get(&s.seat_pos)
                .map(|(rank, _)| describe_hand(*rank)),
        })
        .collect();

    Ok(HandSummary {
        hand_id: state.hand_id,
        board: state.board.clone(),
        total_awarded,
        results,
    })
}
