use crate::domain::chips::Chips;
use crate::domain::hand::{HandState, Street};
use crate::domain::seat::Seat;
use crate::engine::actions::PlayerAction;
use crate::engine::errors::RuleViolation;

/// Сколько фишек месту нужно добавить, чтобы уравнять текущую ставку.
pub fn to_call(state: &HandState, seat: &Seat) -> Chips {
    state.current_bet.saturating_sub(seat.bet)
}

/// Проверка легальности действия. Нарушения отдаются в порядке правил:
/// сначала терминальность раздачи, затем статус места, затем само
/// действие. Принадлежность хода (`acting_pos`) проверяет вызывающий
/// слой, поэтому функция пригодна для симуляций без живой очереди.
pub fn validate_action(
    state: &HandState,
    seat: &Seat,
    action: PlayerAction,
) -> Result<(), RuleViolation> {
    if state.street == Street::Showdown {
        return Err(RuleViolation::HandOver);
    }
    if !seat.in_hand {
        return Err(RuleViolation::NotInHand);
    }
    if seat.is_all_in {
        return Err(RuleViolation::AlreadyAllIn);
    }

    let need = to_call(state, seat);

    match action {
        PlayerAction::Check => {
            if need.is_zero() {
                Ok(())
            } else {
                Err(RuleViolation::CheckFacingBet { to_call: need })
            }
        }

        PlayerAction::Call => {
            if need.is_zero() {
                Err(RuleViolation::NothingToCall)
            } else if seat.stack.is_zero() {
                Err(RuleViolation::NoChips)
            } else {
                // Нехватка стека на полный call — неявный олл-ин, не ошибка.
                Ok(())
            }
        }

        PlayerAction::Fold => Ok(()),

        PlayerAction::AllIn => {
            if seat.stack.is_zero() {
                Err(RuleViolation::NoChips)
            } else {
                Ok(())
            }
        }

        PlayerAction::Raise(target) => {
            // Полный рейз очищает набор действовавших; место, оставшееся
            // в наборе, смотрит на олл-ин ниже минимума и рейзить
            // повторно не вправе.
            if state.acted_this_street.contains(&seat.seat_pos) {
                return Err(RuleViolation::BettingNotReopened);
            }
            let max_total = seat.stack + seat.bet;
            if max_total <= state.current_bet {
                // Место вообще не может превысить текущую ставку.
                return Err(RuleViolation::NoChips);
            }
            if target <= state.current_bet {
                return Err(RuleViolation::RaiseBelowCurrent {
                    target,
                    current_bet: state.current_bet,
                });
            }
            let min_total = state.current_bet + state.min_raise;
            // Рейз ниже минимума легален только как олл-ин всем стеком.
            if target < min_total && target < max_total {
                return Err(RuleViolation::RaiseTooSmall { min_total });
            }
            Ok(())
        }
    }
}
