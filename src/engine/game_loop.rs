//! Жизненный цикл раздачи: старт, применение действий, завершение.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::deck;
use crate::domain::hand::{EngineConfig, HandState, HandSummary, SeatResult, Street};
use crate::domain::seat::{Seat, SeatIndex};
use crate::domain::seed::HandSeed;
use crate::domain::{HandId, UserId};
use crate::engine::actions::PlayerAction;
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, HandEventKind};
use crate::engine::showdown;
use crate::engine::side_pots;
use crate::engine::streets;
use crate::engine::{positions, validation};

/// Участник новой раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub seat_pos: SeatIndex,
    pub user_ref: UserId,
    pub stack: Chips,
}

/// Статус раздачи после применения действия.
#[derive(Clone, Debug, PartialEq)]
pub enum HandOutcome {
    Ongoing,
    Finished(HandSummary),
}

/// Старт новой раздачи:
/// - постит анте и блайнды (в хедз-апе малый блайнд ставит дилер);
/// - сдаёт карманные карты из перестановки seed, по кругу слева от дилера;
/// - настраивает префлоп-торговлю: current_bet = BB, первым ходит
///   сосед большого блайнда.
///
/// Если блайнды посадили всех в олл-ин, улицы сразу догоняются до
/// шоудауна — возвращённый `HandOutcome` будет `Finished`.
pub fn start_hand(
    config: &EngineConfig,
    hand_id: HandId,
    seed: HandSeed,
    participants: &[Participant],
    dealer_pos: SeatIndex,
) -> Result<(HandState, EventLog, HandOutcome), EngineError> {
    if participants.len() < 2 {
        return Err(EngineError::MalformedState(
            "для раздачи нужно минимум два участника".to_string(),
        ));
    }
    if participants.len() > 10 {
        return Err(EngineError::MalformedState(format!(
            "слишком много участников: {}",
            participants.len()
        )));
    }
    let unique: BTreeSet<SeatIndex> = participants.iter().map(|p| p.seat_pos).collect();
    if unique.len() != participants.len() {
        return Err(EngineError::MalformedState(
            "дублирующиеся индексы мест".to_string(),
        ));
    }
    if participants.iter().any(|p| p.stack.is_zero()) {
        return Err(EngineError::MalformedState(
            "участник с пустым стеком".to_string(),
        ));
    }
    if !unique.contains(&dealer_pos) {
        return Err(EngineError::MalformedState(format!(
            "дилер на незанятом месте {dealer_pos}"
        )));
    }

    let mut seats: Vec<Seat> = participants
        .iter()
        .map(|p| Seat::new(p.seat_pos, p.user_ref, p.stack))
        .collect();
    seats.sort_by_key(|s| s.seat_pos);

    // Блайнды: в хедз-апе малый ставит дилер, иначе — два соседа кнопки.
    let after_dealer = positions::order_after(&seats, dealer_pos);
    let (sb_pos, bb_pos) = if seats.len() == 2 {
        (dealer_pos, after_dealer[0])
    } else {
        (after_dealer[0], after_dealer[1])
    };

    let mut state = HandState {
        hand_id,
        street: Street::Preflop,
        dealer_pos,
        small_blind_pos: sb_pos,
        big_blind_pos: bb_pos,
        acting_pos: None,
        current_bet: Chips::ZERO,
        min_raise: config.big_blind,
        big_blind: config.big_blind,
        board: Vec::new(),
        seats,
        pots: Vec::new(),
        acted_this_street: BTreeSet::new(),
        seed,
        version: 0,
    };

    let mut log = EventLog::new();
    log.push(HandEventKind::HandStarted { hand_id });

    // Анте (классическое, с каждого места).
    let mut ante_paid = Vec::new();
    if !config.ante.is_zero() {
        for seat in &mut state.seats {
            let paid = take_from_stack(seat, config.ante);
            seat.total_contributed += paid;
            ante_paid.push((seat.seat_pos, paid));
        }
    }

    let sb_paid = post_blind(&mut state, sb_pos, config.small_blind);
    let bb_paid = post_blind(&mut state, bb_pos, config.big_blind);
    state.current_bet = config.big_blind;
    state.min_raise = config.big_blind;

    log.push(HandEventKind::BlindsPosted {
        dealer: dealer_pos,
        small_blind: (sb_pos, sb_paid),
        big_blind: (bb_pos, bb_paid),
        ante: ante_paid,
    });

    // Карманные карты: первые 2N карт перестановки, по две в два круга.
    let perm = deck::shuffled_for(&state.seed);
    let order = positions::order_after(&state.seats, dealer_pos);
    let n = order.len();
    for (i, pos) in order.iter().enumerate() {
        let hole = [perm[i], perm[n + i]];
        if let Some(seat) = state.seat_mut(*pos) {
            seat.hole = Some(hole);
        }
        log.push(HandEventKind::HoleCardsDealt {
            seat: *pos,
            cards: hole,
        });
    }

    // Анте материализуются в банк сразу (живые ставки остаются ставками).
    state.pots = side_pots::build_pots(&state.seats);

    // Блайнды могли посадить всех в олл-ин — тогда раунд уже закрыт
    // и улицы догоняются немедленно.
    let outcome = advance_after_action(&mut state, bb_pos, &mut log)?;

    Ok((state, log, outcome))
}

/// Взять из стека не более `amount`.
fn take_from_stack(seat: &mut Seat, amount: Chips) -> Chips {
    let paid = amount.min(seat.stack);
    seat.stack -= paid;
    if seat.stack.is_zero() {
        seat.is_all_in = true;
    }
    paid
}

/// Поставить блайнд (короткий стек ставит сколько может).
fn post_blind(state: &mut HandState, pos: SeatIndex, amount: Chips) -> Chips {
    let seat = state
        .seat_mut(pos)
        .expect("позиция блайнда вычислена из занятых мест");
    let paid = take_from_stack(seat, amount);
    seat.bet += paid;
    seat.total_contributed += paid;
    paid
}

/// Применить действие места. Очередь хода (`acting_pos`) и версию
/// проверяет вызывающий слой ДО этого вызова; здесь — только правила
/// ставок. Нарушение не оставляет частичных изменений: все проверки
/// выполняются до первой мутации.
pub fn apply_action(
    state: &mut HandState,
    seat_pos: SeatIndex,
    action: PlayerAction,
    log: &mut EventLog,
) -> Result<HandOutcome, EngineError> {
    let (need, old_current, old_min_raise) = {
        let seat = state
            .seat(seat_pos)
            .ok_or_else(|| EngineError::MalformedState(format!("нет места {seat_pos}")))?;
        validation::validate_action(state, seat, action)?;
        (
            validation::to_call(state, seat),
            state.current_bet,
            state.min_raise,
        )
    };

    let (new_stack, new_bet) = {
        let seat = state
            .seat_mut(seat_pos)
            .expect("место проверено на существование выше");
        match action {
            PlayerAction::Check => {}
            PlayerAction::Fold => {
                seat.in_hand = false;
            }
            PlayerAction::Call => {
                // Нехватка стека на полный call — неявный олл-ин.
                let paid = need.min(seat.stack);
                seat.stack -= paid;
                seat.bet += paid;
                seat.total_contributed += paid;
                if seat.stack.is_zero() {
                    seat.is_all_in = true;
                }
            }
            PlayerAction::Raise(target) => {
                let target = target.min(seat.stack + seat.bet);
                let paid = target - seat.bet;
                seat.stack -= paid;
                seat.bet = target;
                seat.total_contributed += paid;
                if seat.stack.is_zero() {
                    seat.is_all_in = true;
                }
            }
            PlayerAction::AllIn => {
                let paid = seat.stack;
                seat.stack = Chips::ZERO;
                seat.bet += paid;
                seat.total_contributed += paid;
                seat.is_all_in = true;
            }
        }
        (seat.stack, seat.bet)
    };

    // Повышение уровня ставки улицы.
    if new_bet > old_current {
        let increment = new_bet - old_current;
        state.current_bet = new_bet;
        state.min_raise = state.big_blind.max(increment);
        if increment >= old_min_raise {
            // Полный рейз заново открывает торговлю для уравнявших.
            state.acted_this_street.clear();
        }
        // Олл-ин ниже минимального рейза торговлю НЕ переоткрывает:
        // набор «кто действовал» сохраняется.
    }

    state.acted_this_street.insert(seat_pos);
    state.version += 1;
    log.push(HandEventKind::ActionApplied {
        seat: seat_pos,
        action,
        to_call: need,
        new_stack,
        new_bet,
    });

    advance_after_action(state, seat_pos, log)
}

/// Общая развязка после принятого действия (и после постинга блайндов):
/// fold-out, завершение раунда с переходом улиц, либо передача хода.
fn advance_after_action(
    state: &mut HandState,
    from_pos: SeatIndex,
    log: &mut EventLog,
) -> Result<HandOutcome, EngineError> {
    if state.in_hand_count() == 1 {
        return settle_fold_out(state, log).map(HandOutcome::Finished);
    }

    if streets::is_betting_round_complete(state) {
        streets::progress_street(state, log)?;
        if state.street == Street::Showdown {
            let summary = showdown::resolve_showdown(state, log)?;
            return Ok(HandOutcome::Finished(summary));
        }
        return Ok(HandOutcome::Ongoing);
    }

    state.acting_pos = positions::next_active_after(&state.seats, from_pos);
    Ok(HandOutcome::Ongoing)
}

/// Завершение без шоудауна: все сфолдили, остался один.
/// Ранжирование рук пропускается, все банки уходят выжившему.
fn settle_fold_out(
    state: &mut HandState,
    log: &mut EventLog,
) -> Result<HandSummary, EngineError> {
    side_pots::sweep_bets(state);

    let winner_pos = state
        .seats
        .iter()
        .find(|s| s.in_hand)
        .map(|s| s.seat_pos)
        .ok_or_else(|| EngineError::MalformedState("fold-out без выжившего места".to_string()))?;

    let total: Chips = state.pots.iter().map(|p| p.amount).sum();
    state.pots.clear();
    if let Some(winner) = state.seat_mut(winner_pos) {
        winner.stack += total;
    }

    state.street = Street::Showdown;
    state.acting_pos = None;

    debug!(
        "раздача {}: fold-out, место {} забирает {}",
        state.hand_id, winner_pos, total
    );
    log.push(HandEventKind::PotAwarded {
        seat: winner_pos,
        amount: total,
    });
    log.push(HandEventKind::HandFinished {
        hand_id: state.hand_id,
    });

    let results = state
        .seats
        .iter()
        .map(|s| SeatResult {
            seat_pos: s.seat_pos,
            user_ref: s.user_ref,
            won: if s.seat_pos == winner_pos {
                total
            } else {
                Chips::ZERO
            },
            hand_desc: None,
        })
        .collect();

    Ok(HandSummary {
        hand_id: state.hand_id,
        board: state.board.clone(),
        total_awarded: total,
        results,
    })
}
