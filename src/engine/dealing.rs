//! Детерминированная сдача карт.
//!
//! Колода не хранится: перестановка регенерируется из seed раздачи,
//! из неё вычитаются карты, уже находящиеся в игре (все карманные +
//! текущий борд), и берутся следующие по порядку. Повторный вызов при
//! неизменном состоянии отдаёт ту же дельту — ретраи не пересдают карты.

use std::collections::HashSet;

use crate::domain::card::Card;
use crate::domain::deck;
use crate::domain::hand::HandState;
use crate::engine::errors::EngineError;

/// Следующие `need` карт борда для текущего состояния раздачи.
pub fn compute_board_delta(state: &HandState, need: usize) -> Result<Vec<Card>, EngineError> {
    let mut known: HashSet<Card> = state.board.iter().copied().collect();
    for seat in &state.seats {
        if let Some(hole) = seat.hole {
            known.extend(hole);
        }
    }

    let delta: Vec<Card> = deck::shuffled_for(&state.seed)
        .into_iter()
        .filter(|c| !known.contains(c))
        .take(need)
        .collect();

    if delta.len() < need {
        return Err(EngineError::InsufficientCards);
    }
    Ok(delta)
}
