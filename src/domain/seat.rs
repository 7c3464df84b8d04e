use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::UserId;

/// Индекс места за столом (0..N-1, по кругу).
pub type SeatIndex = u8;

/// Участие игрока в одной раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    /// Стабильный индекс места.
    pub seat_pos: SeatIndex,
    /// Владелец места.
    pub user_ref: UserId,
    /// Фишки, ещё не поставленные на этой улице.
    pub stack: Chips,
    /// Ставка текущей улицы (обнуляется при переходе улицы).
    pub bet: Chips,
    /// Сколько всего внесено за раздачу (блайнды, анте, все улицы).
    /// По этим суммам строятся сайд-поты.
    pub total_contributed: Chips,
    /// false после фолда — место исключено из действий и шоудауна.
    pub in_hand: bool,
    /// true, когда стек дошёл до нуля через ставки: место больше не
    /// действует, но остаётся в раздаче и претендует на банки
    /// в пределах своего вклада.
    pub is_all_in: bool,
    /// Две карманные карты после сдачи. Наружу не отдаются —
    /// только во view владельца.
    pub hole: Option<[Card; 2]>,
}

impl Seat {
    pub fn new(seat_pos: SeatIndex, user_ref: UserId, stack: Chips) -> Self {
        Self {
            seat_pos,
            user_ref,
            stack,
            bet: Chips::ZERO,
            total_contributed: Chips::ZERO,
            in_hand: true,
            is_all_in: false,
            hole: None,
        }
    }

    /// Место обязано действовать: в раздаче и не в олл-ине.
    pub fn is_active(&self) -> bool {
        self.in_hand && !self.is_all_in
    }

    /// Вклад, уже сметённый в банки (без живой ставки текущей улицы).
    pub fn swept_contribution(&self) -> Chips {
        self.total_contributed - self.bet
    }
}
