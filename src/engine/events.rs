use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::seat::SeatIndex;
use crate::domain::HandId;
use crate::engine::actions::PlayerAction;
use crate::eval::HandRank;

/// Победитель банка (или его доли) на шоудауне.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShowdownEntry {
    pub seat: SeatIndex,
    /// Сколько всего выиграно из всех банков.
    pub amount: Chips,
    pub cards: [Card; 2],
    pub hand_desc: String,
}

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { hand_id: HandId },

    /// Кнопка и блайнды (суммы — фактически уплаченные, короткий
    /// стек мог заплатить меньше номинала).
    BlindsPosted {
        dealer: SeatIndex,
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
        ante: Vec<(SeatIndex, Chips)>,
    },

    /// Место получило карманные карты.
    HoleCardsDealt { seat: SeatIndex, cards: [Card; 2] },

    /// Действие принято. to_call уже разрешён движком, чтобы
    /// наблюдателям не пришлось его пересчитывать.
    ActionApplied {
        seat: SeatIndex,
        action: PlayerAction,
        to_call: Chips,
        new_stack: Chips,
        new_bet: Chips,
    },

    /// Открыты новые карты борда (только дельта).
    BoardDealt { street: Street, cards: Vec<Card> },

    /// Переход на новую улицу.
    StreetChanged { street: Street },

    /// Вскрытие руки на шоудауне.
    ShowdownReveal {
        seat: SeatIndex,
        cards: [Card; 2],
        rank: HandRank,
        hand_desc: String,
    },

    /// Выплата из банка.
    PotAwarded { seat: SeatIndex, amount: Chips },

    /// Итоги шоудауна по победителям.
    ShowdownResults { winners: Vec<ShowdownEntry> },

    /// Раздача завершена.
    HandFinished { hand_id: HandId },
}

/// Событие с порядковым номером внутри раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Лог событий одной раздачи (или одного действия — зависит от вызова).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EventLog {
    pub events: Vec<HandEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let index = self.events.len() as u32;
        self.events.push(HandEvent { index, kind });
    }
}
