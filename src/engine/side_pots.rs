//! Слои банков по вкладам мест.
//!
//! Банки строятся из УЖЕ СМЕТЁННЫХ вкладов (живые ставки текущей улицы
//! в банках не лежат — этим держится инвариант сохранения фишек:
//! stacks + bets + pots = const). Потолки слоёв задают только олл-ины:
//! олл-ин ниже максимального вклада режет банк на ограниченный слой
//! (претенденты — все, кто дотянул до потолка) и остаток.

use crate::domain::chips::Chips;
use crate::domain::hand::HandState;
use crate::domain::pot::Pot;
use crate::domain::seat::{Seat, SeatIndex};

/// Смести живые ставки улицы в банки.
/// Вклады уже посчитаны в `total_contributed`, поэтому достаточно
/// обнулить ставки и перестроить слои.
pub fn sweep_bets(state: &mut HandState) {
    for seat in &mut state.seats {
        seat.bet = Chips::ZERO;
    }
    state.pots = build_pots(&state.seats);
}

/// Перестроить банки из сметённых вкладов.
pub fn build_pots(seats: &[Seat]) -> Vec<Pot> {
    // (место, сметённый вклад, в раздаче, олл-ин)
    let swept: Vec<(SeatIndex, u64, bool, bool)> = seats
        .iter()
        .filter(|s| !s.swept_contribution().is_zero())
        .map(|s| {
            (
                s.seat_pos,
                s.swept_contribution().0,
                s.in_hand,
                s.is_all_in,
            )
        })
        .collect();

    let max_level = match swept.iter().map(|e| e.1).max() {
        Some(m) => m,
        None => return Vec::new(),
    };

    // Потолки — вклады олл-ин мест ниже максимума, плюс сам максимум.
    let mut caps: Vec<u64> = swept
        .iter()
        .filter(|(_, amount, _, is_all_in)| *is_all_in && *amount < max_level)
        .map(|e| e.1)
        .collect();
    caps.sort_unstable();
    caps.dedup();
    caps.push(max_level);

    let mut pots: Vec<Pot> = Vec::new();
    let mut prev = 0u64;

    for level in caps {
        let amount: u64 = swept
            .iter()
            .map(|&(_, contributed, _, _)| contributed.min(level) - contributed.min(prev))
            .sum();
        prev = level;
        if amount == 0 {
            continue;
        }

        let eligible: Vec<SeatIndex> = swept
            .iter()
            .filter(|(_, contributed, in_hand, _)| *in_hand && *contributed >= level)
            .map(|e| e.0)
            .collect();

        if eligible.is_empty() {
            // Верхушка вклада осталась без претендентов (единственный
            // дотянувший сфолдил) — доливаем в предыдущий слой.
            match pots.last_mut() {
                Some(last) => last.amount += Chips(amount),
                None => pots.push(Pot::new(
                    Chips(amount),
                    seats
                        .iter()
                        .filter(|s| s.in_hand)
                        .map(|s| s.seat_pos)
                        .collect(),
                )),
            }
            continue;
        }

        match pots.last_mut() {
            Some(last) if last.eligible_seats == eligible => last.amount += Chips(amount),
            _ => pots.push(Pot::new(Chips(amount), eligible)),
        }
    }

    pots
}
