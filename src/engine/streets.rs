//! Завершение раунда ставок и переход улиц.

use log::debug;

use crate::domain::chips::Chips;
use crate::domain::hand::{HandState, Street};
use crate::engine::dealing;
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, HandEventKind};
use crate::engine::positions;
use crate::engine::side_pots;

/// Раунд ставок завершён, если:
/// (а) в раздаче осталось не больше одного места, ИЛИ
/// (б) каждое место, обязанное действовать, уравняло максимальную
///     ставку улицы И уже действовало с последней границы улицы.
///
/// Половины теста (б) недостаточно ни одной по отдельности: место,
/// уравнявшее ставку раньше, обязано ответить на новый рейз, а большой
/// блайнд с уравненной ставкой ещё имеет право хода на префлопе.
/// Если действовать обязан никто (все оставшиеся в олл-ине), (б)
/// выполняется тривиально.
pub fn is_betting_round_complete(state: &HandState) -> bool {
    if state.in_hand_count() <= 1 {
        return true;
    }
    let high = state.table_high_bet();
    state
        .seats
        .iter()
        .filter(|s| s.is_active())
        .all(|s| s.bet == high && state.acted_this_street.contains(&s.seat_pos))
}

/// Переход на следующую улицу после завершения раунда:
/// - живые ставки сметаются в банки;
/// - открываются карты борда ({префлоп→3, флоп→1, тёрн→1});
/// - уровень ставок и набор «кто действовал» сбрасываются;
/// - ход получает первое обязанное действовать место по часовой
///   от дилера.
///
/// Если такого места нет (все оставшиеся в олл-ине), улицы ДОГОНЯЮТСЯ
/// до шоудауна — борд досдаётся на каждом шаге, раздача не зависает.
/// После ривера переход ведёт в `Showdown` без новых карт.
pub fn progress_street(state: &mut HandState, log: &mut EventLog) -> Result<(), EngineError> {
    loop {
        side_pots::sweep_bets(state);
        state.current_bet = Chips::ZERO;
        state.min_raise = state.big_blind;
        state.acted_this_street.clear();
        state.acting_pos = None;

        let next = state.street.next();
        if next == Street::Showdown {
            state.street = Street::Showdown;
            log.push(HandEventKind::StreetChanged {
                street: Street::Showdown,
            });
            return Ok(());
        }

        let delta = dealing::compute_board_delta(state, next.cards_dealt())?;
        state.board.extend(delta.iter().copied());
        state.street = next;
        log.push(HandEventKind::BoardDealt {
            street: next,
            cards: delta,
        });
        log.push(HandEventKind::StreetChanged { street: next });

        if state.active_count() == 0 {
            debug!(
                "раздача {}: действовать некому, догоняем улицу {:?}",
                state.hand_id, next
            );
            continue;
        }

        state.acting_pos = positions::next_active_after(&state.seats, state.dealer_pos);
        return Ok(());
    }
}
