// tests/engine_sidepots_tests.rs

//! Тесты слоёв банков:
//! - равные вклады складываются в один общий банк;
//! - олл-ины на 100/200/300 режут банк на три слоя;
//! - вклад сфолдившего заполняет нижние слои, но не даёт претензий;
//! - верхушка вклада без претендентов доливается в предыдущий слой;
//! - без олл-инов сайд-поты не плодятся.

use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::pot::Pot;
use holdem_engine::domain::seat::{Seat, SeatIndex};
use holdem_engine::engine::side_pots::build_pots;

/// Место с уже сметённым вкладом (ставка улицы обнулена).
fn swept_seat(pos: SeatIndex, contributed: u64, in_hand: bool, is_all_in: bool) -> Seat {
    Seat {
        seat_pos: pos,
        user_ref: 100 + pos as u64,
        stack: Chips::ZERO,
        bet: Chips::ZERO,
        total_contributed: Chips::new(contributed),
        in_hand,
        is_all_in,
        hole: None,
    }
}

fn pot_info(p: &Pot) -> (u64, Vec<SeatIndex>) {
    (p.amount.0, p.eligible_seats.clone())
}

//
// ====================== БАЗОВЫЕ СЛОИ ======================
//

#[test]
fn equal_contributions_make_single_pot() {
    let seats = [
        swept_seat(0, 100, true, true),
        swept_seat(1, 100, true, true),
    ];

    let pots = build_pots(&seats);

    assert_eq!(pots.len(), 1, "должен быть один общий банк");
    assert_eq!(pot_info(&pots[0]), (200, vec![0, 1]));
}

#[test]
fn three_all_ins_100_200_300_make_three_layers() {
    let seats = [
        swept_seat(0, 100, true, true),
        swept_seat(1, 200, true, true),
        swept_seat(2, 300, true, true),
    ];

    let pots = build_pots(&seats);

    assert_eq!(pots.len(), 3, "ожидаем три слоя");
    assert_eq!(pot_info(&pots[0]), (300, vec![0, 1, 2]));
    assert_eq!(pot_info(&pots[1]), (200, vec![1, 2]));
    assert_eq!(pot_info(&pots[2]), (100, vec![2]));
}

#[test]
fn layer_amounts_conserve_contributions() {
    let seats = [
        swept_seat(0, 120, true, true),
        swept_seat(1, 430, true, true),
        swept_seat(2, 430, true, false),
        swept_seat(3, 55, false, false),
    ];

    let pots = build_pots(&seats);

    let total: u64 = pots.iter().map(|p| p.amount.0).sum();
    assert_eq!(total, 120 + 430 + 430 + 55, "фишки не теряются и не плодятся");
}

//
// ====================== ФОЛДЫ ======================
//

/// Сфолдивший внёс 100: его фишки лежат в банке, но претендентов
/// на них двое оставшихся.
#[test]
fn folded_contribution_fills_pot_without_claim() {
    let seats = [
        swept_seat(0, 100, false, false),
        swept_seat(1, 200, true, true),
        swept_seat(2, 200, true, false),
    ];

    let pots = build_pots(&seats);

    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (500, vec![1, 2]));
}

/// Сфолдивший переплатил всех: верхушка его вклада без претендентов
/// доливается в предыдущий слой, а не повисает.
#[test]
fn unclaimed_top_contribution_merges_down() {
    let seats = [
        swept_seat(0, 300, false, false),
        swept_seat(1, 200, true, true),
        swept_seat(2, 200, true, false),
    ];

    let pots = build_pots(&seats);

    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (700, vec![1, 2]));
}

//
// ====================== БЕЗ ОЛЛ-ИНОВ ======================
//

#[test]
fn no_all_ins_no_side_pots() {
    let seats = [
        swept_seat(0, 100, false, false),
        swept_seat(1, 300, true, false),
        swept_seat(2, 300, true, false),
    ];

    let pots = build_pots(&seats);

    assert_eq!(pots.len(), 1, "без олл-инов сайд-поты не нужны");
    assert_eq!(pot_info(&pots[0]), (700, vec![1, 2]));
}

#[test]
fn no_contributions_no_pots() {
    let seats = [
        swept_seat(0, 0, true, false),
        swept_seat(1, 0, true, false),
    ];

    assert!(build_pots(&seats).is_empty());
}
