use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::pot::Pot;
use crate::domain::seat::{Seat, SeatIndex};
use crate::domain::seed::HandSeed;
use crate::domain::{HandId, UserId};

/// Улица раздачи. Продвигается строго вперёд, назад не откатывается.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица.
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Сколько карт борда открывает ПЕРЕХОД на эту улицу.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Showdown => 0,
        }
    }

    /// Длина борда, соответствующая улице.
    pub fn expected_board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }
}

/// Конфигурация движка для стола: блайнды, анте, таймер хода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Классическое анте с каждого места; ZERO — без анте.
    pub ante: Chips,
    /// Сколько секунд даётся на ход (для коллаборатора-таймера).
    pub turn_timeout_secs: u64,
}

impl EngineConfig {
    pub fn new(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
            ante: Chips::ZERO,
            turn_timeout_secs: 60,
        }
    }
}

/// Авторитетное состояние одной раздачи — единственный мутируемый
/// разделяемый ресурс. Всё остальное (колода, очередь хода) выводится
/// из него и из seed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandState {
    pub hand_id: HandId,
    pub street: Street,
    /// Позиции, зафиксированные на всю раздачу.
    pub dealer_pos: SeatIndex,
    pub small_blind_pos: SeatIndex,
    pub big_blind_pos: SeatIndex,
    /// Чей ход ожидается; None — раздача завершена или идёт догон улиц.
    pub acting_pos: Option<SeatIndex>,
    /// Максимальная суммарная ставка любого места на этой улице.
    pub current_bet: Chips,
    /// Минимальный легальный шаг повышения над current_bet.
    pub min_raise: Chips,
    /// Большой блайнд стола: состояние самодостаточно для валидации.
    pub big_blind: Chips,
    /// Открытые общие карты, 0/3/4/5; только добавляются.
    pub board: Vec<Card>,
    /// Места, отсортированные по seat_pos.
    pub seats: Vec<Seat>,
    /// Сметённые банки (живые ставки улицы в них не входят).
    pub pots: Vec<Pot>,
    /// Кто уже действовал с последней границы улицы. Полный рейз
    /// очищает набор до рейзера, олл-ин ниже минимума — нет.
    pub acted_this_street: BTreeSet<SeatIndex>,
    /// Seed перестановки колоды этой раздачи.
    pub seed: HandSeed,
    /// Монотонный счётчик optimistic-конкурентности: +1 на каждое
    /// принятое действие.
    pub version: u64,
}

impl HandState {
    pub fn seat(&self, pos: SeatIndex) -> Option<&Seat> {
        self.seats.iter().find(|s| s.seat_pos == pos)
    }

    pub fn seat_mut(&mut self, pos: SeatIndex) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.seat_pos == pos)
    }

    /// Сколько мест ещё в раздаче (не сфолдили).
    pub fn in_hand_count(&self) -> usize {
        self.seats.iter().filter(|s| s.in_hand).count()
    }

    /// Сколько мест обязаны действовать (в раздаче и не в олл-ине).
    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_active()).count()
    }

    /// Максимальная ставка улицы среди мест в раздаче.
    pub fn table_high_bet(&self) -> Chips {
        self.seats
            .iter()
            .filter(|s| s.in_hand)
            .map(|s| s.bet)
            .max()
            .unwrap_or(Chips::ZERO)
    }

    /// Раздача терминальна: после fold-out или резолва шоудауна
    /// состояние больше не мутируется.
    pub fn is_finished(&self) -> bool {
        self.street == Street::Showdown
    }

    /// Все фишки раздачи: стеки + живые ставки + банки.
    /// Инвариант сохранения — сумма постоянна от старта до завершения.
    pub fn total_chips(&self) -> Chips {
        let seats: Chips = self.seats.iter().map(|s| s.stack + s.bet).sum();
        let pots: Chips = self.pots.iter().map(|p| p.amount).sum();
        seats + pots
    }
}

/// Итог одного места в завершённой раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatResult {
    pub seat_pos: SeatIndex,
    pub user_ref: UserId,
    /// Сколько выиграно из банков (0 для проигравших).
    pub won: Chips,
    /// Человекочитаемое описание руки, если место дошло до шоудауна.
    pub hand_desc: Option<String>,
}

/// Краткий отчёт по завершённой раздаче для следующего слоя (рендер, история).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub board: Vec<Card>,
    /// Сколько всего фишек разыграно из банков.
    pub total_awarded: Chips,
    pub results: Vec<SeatResult>,
}
