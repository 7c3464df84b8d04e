//! Редактированные view для рассылки.
//!
//! После каждого принятого действия движок отдаёт по view на каждое
//! место плюс один для наблюдателей. View адресата НИКОГДА не содержит
//! чужих карманных карт; рендер, перевод и транспорт — забота
//! коллаборатора.

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandState, Street};
use crate::domain::seat::SeatIndex;
use crate::domain::{HandId, UserId};
use crate::engine::events::{HandEvent, HandEventKind};
use crate::engine::validation;

/// Адресат рассылки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recipient {
    Seat(SeatIndex),
    Observer,
}

/// Публичная часть места — одинаковая для всех адресатов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub seat_pos: SeatIndex,
    pub user_ref: UserId,
    pub stack: Chips,
    pub bet: Chips,
    pub in_hand: bool,
    pub is_all_in: bool,
}

/// Снимок раздачи для одного адресата.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandView {
    pub hand_id: HandId,
    pub street: Street,
    pub board: Vec<Card>,
    /// Банки плюс живые ставки улицы — то, что игрок называет «банком».
    pub pot_total: Chips,
    pub current_bet: Chips,
    /// Сколько адресату стоит call (наблюдателю — 0).
    pub to_call: Chips,
    pub acting_pos: Option<SeatIndex>,
    /// Версия для кнопок: действие обязано предъявить её обратно.
    pub version: u64,
    /// Карманные карты адресата; в view наблюдателя отсутствуют.
    pub hole: Option<[Card; 2]>,
    pub seats: Vec<SeatView>,
}

fn base_view(state: &HandState) -> HandView {
    let bets: Chips = state.seats.iter().map(|s| s.bet).sum();
    let pots: Chips = state.pots.iter().map(|p| p.amount).sum();
    HandView {
        hand_id: state.hand_id,
        street: state.street,
        board: state.board.clone(),
        pot_total: pots + bets,
        current_bet: state.current_bet,
        to_call: Chips::ZERO,
        acting_pos: state.acting_pos,
        version: state.version,
        hole: None,
        seats: state
            .seats
            .iter()
            .map(|s| SeatView {
                seat_pos: s.seat_pos,
                user_ref: s.user_ref,
                stack: s.stack,
                bet: s.bet,
                in_hand: s.in_hand,
                is_all_in: s.is_all_in,
            })
            .collect(),
    }
}

/// Построить view для каждого места и для наблюдателей.
pub fn build_views(state: &HandState) -> Vec<(Recipient, HandView)> {
    let mut out = Vec::with_capacity(state.seats.len() + 1);
    for seat in &state.seats {
        let mut view = base_view(state);
        view.hole = seat.hole;
        view.to_call = validation::to_call(state, seat);
        out.push((Recipient::Seat(seat.seat_pos), view));
    }
    out.push((Recipient::Observer, base_view(state)));
    out
}

/// Отфильтровать события для адресата: чужая сдача карманных карт
/// не уходит никому, кроме владельца. Вскрытия шоудауна публичны.
pub fn redact_events(events: &[HandEvent], recipient: Recipient) -> Vec<HandEvent> {
    events
        .iter()
        .filter(|e| match &e.kind {
            HandEventKind::HoleCardsDealt { seat, .. } => recipient == Recipient::Seat(*seat),
            _ => true,
        })
        .cloned()
        .collect()
}
