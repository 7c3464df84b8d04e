//! Порт таймера хода.
//!
//! Сам движок времени не знает: на каждом переходе хода коллаборатору
//! сообщается, какое место и сколько секунд может думать. По истечении
//! таймер вводит синтетическое действие через `HandService::expire_turn`
//! — с той же дисциплиной guard'ов, что и живые игроки.

use crate::domain::seat::SeatIndex;
use crate::domain::HandId;

pub trait TurnTimer {
    /// Взвести таймер: место должно походить за `timeout_secs`.
    fn arm(&mut self, hand_id: HandId, seat: SeatIndex, timeout_secs: u64);

    /// Снять таймер: хода никто не ждёт (раздача завершена или догоняется).
    fn cancel(&mut self, hand_id: HandId);
}

/// Реализация для тестов и dev-CLI: просто запоминает вызовы.
#[derive(Debug, Default)]
pub struct RecordingTimer {
    pub armed: Vec<(HandId, SeatIndex, u64)>,
    pub cancelled: Vec<HandId>,
}

impl TurnTimer for RecordingTimer {
    fn arm(&mut self, hand_id: HandId, seat: SeatIndex, timeout_secs: u64) {
        self.armed.push((hand_id, seat, timeout_secs));
    }

    fn cancel(&mut self, hand_id: HandId) {
        self.cancelled.push(hand_id);
    }
}
