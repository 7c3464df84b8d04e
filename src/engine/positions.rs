use crate::domain::chips::Chips;
use crate::domain::seat::{Seat, SeatIndex};

/// Индексы всех мест по кругу, начиная СО СЛЕДУЮЩЕГО за `start`
/// (сам `start`, если это занятое место, оказывается последним).
/// `seats` отсортированы по seat_pos, индексы могут быть разреженными.
pub fn order_after(seats: &[Seat], start: SeatIndex) -> Vec<SeatIndex> {
    let mut positions: Vec<SeatIndex> = seats.iter().map(|s| s.seat_pos).collect();
    let split = positions.iter().position(|p| *p > start).unwrap_or(0);
    positions.rotate_left(split);
    positions
}

/// Следующее место, обязанное действовать, строго после `start` по кругу.
pub fn next_active_after(seats: &[Seat], start: SeatIndex) -> Option<SeatIndex> {
    order_after(seats, start)
        .into_iter()
        .find(|pos| seats.iter().any(|s| s.seat_pos == *pos && s.is_active()))
}

/// Позиция дилера для следующей раздачи: ближайшее по кругу место
/// с непустым стеком.
pub fn next_dealer_pos(seats: &[Seat], dealer: SeatIndex) -> Option<SeatIndex> {
    order_after(seats, dealer)
        .into_iter()
        .find(|pos| {
            seats
                .iter()
                .any(|s| s.seat_pos == *pos && s.stack > Chips::ZERO)
        })
}
