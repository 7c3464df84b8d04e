//! Поверхность приёма действий: load → guard'ы → движок → CAS-запись.

use log::{debug, error, warn};

use crate::api::errors::SubmitError;
use crate::api::timer::TurnTimer;
use crate::api::views::{build_views, HandView, Recipient};
use crate::domain::hand::{EngineConfig, HandState};
use crate::domain::seat::SeatIndex;
use crate::domain::seed::HandSeed;
use crate::domain::HandId;
use crate::engine::actions::PlayerAction;
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, HandEvent};
use crate::engine::game_loop::{self, HandOutcome, Participant};
use crate::engine::validation;
use crate::infra::persistence::{HandRepository, SaveOutcome};
use crate::infra::reconstruct::{reconstruct_state_from_db, state_to_rows};

/// Результат принятого действия (или старта раздачи).
#[derive(Debug)]
pub struct ApplyOk {
    /// Версия состояния после записи — её понесут новые кнопки.
    pub version: u64,
    pub outcome: HandOutcome,
    pub events: Vec<HandEvent>,
    pub views: Vec<(Recipient, HandView)>,
}

/// Адаптер над чистым движком: один воркер обрабатывает запрос от
/// начала до конца, все гонки срезаются парой guard'ов по одному
/// снапшоту и compare-and-swap записью.
pub struct HandService<R: HandRepository, T: TurnTimer> {
    repo: R,
    timer: T,
    config: EngineConfig,
}

impl<R: HandRepository, T: TurnTimer> HandService<R, T> {
    pub fn new(config: EngineConfig, repo: R, timer: T) -> Self {
        Self {
            repo,
            timer,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Создать и сохранить новую раздачу (версия 0).
    pub fn start_hand(
        &mut self,
        hand_id: HandId,
        seed: HandSeed,
        participants: &[Participant],
        dealer_pos: SeatIndex,
    ) -> Result<ApplyOk, SubmitError> {
        if self.repo.load_hand(hand_id).is_some() {
            return Err(SubmitError::HandAlreadyExists(hand_id));
        }

        let (state, log, outcome) =
            game_loop::start_hand(&self.config, hand_id, seed, participants, dealer_pos)?;

        match self
            .repo
            .save_hand(hand_id, None, state_to_rows(&state), &log.events)
        {
            SaveOutcome::Saved => {}
            SaveOutcome::Conflict { current_version } => {
                // Гонка создания: кто-то успел записать ту же раздачу.
                return Err(SubmitError::StaleVersion {
                    presented: 0,
                    current: current_version,
                });
            }
        }

        debug!("раздача {hand_id}: старт, дилер {dealer_pos}");
        self.sync_timer(&state);
        Ok(ApplyOk {
            version: state.version,
            outcome,
            events: log.events,
            views: build_views(&state),
        })
    }

    /// Принять действие места.
    ///
    /// Порядок строго такой: один load → guard версии → реконструкция →
    /// guard очереди → движок → CAS-запись. Отказ на любом шаге до
    /// записи не оставляет следов в хранилище.
    pub fn submit_action(
        &mut self,
        hand_id: HandId,
        seat_pos: SeatIndex,
        action: PlayerAction,
        presented_version: u64,
    ) -> Result<ApplyOk, SubmitError> {
        let snapshot = self
            .repo
            .load_hand(hand_id)
            .ok_or(SubmitError::HandNotFound(hand_id))?;

        let current = snapshot.version();
        if current != presented_version {
            warn!(
                "раздача {hand_id}: отбито устаревшее действие места {seat_pos} \
                 (кнопка v{presented_version}, в хранилище v{current})"
            );
            return Err(SubmitError::StaleVersion {
                presented: presented_version,
                current,
            });
        }

        let mut state =
            reconstruct_state_from_db(&self.config, &snapshot.hand, &snapshot.seats, &snapshot.pots)?;

        if state.acting_pos != Some(seat_pos) {
            return Err(SubmitError::NotYourTurn { seat: seat_pos });
        }

        let mut log = EventLog::new();
        let outcome = match game_loop::apply_action(&mut state, seat_pos, action, &mut log) {
            Ok(outcome) => outcome,
            Err(e) => {
                if !matches!(e, EngineError::Rule(_)) {
                    // Битое состояние или колода: раздача требует ручной сверки.
                    error!("раздача {hand_id}: фатальная ошибка движка: {e}");
                }
                return Err(e.into());
            }
        };

        match self.repo.save_hand(
            hand_id,
            Some(presented_version),
            state_to_rows(&state),
            &log.events,
        ) {
            SaveOutcome::Saved => {}
            SaveOutcome::Conflict { current_version } => {
                // Конкурент успел записаться между load и save.
                return Err(SubmitError::StaleVersion {
                    presented: presented_version,
                    current: current_version,
                });
            }
        }

        debug!(
            "раздача {hand_id}: место {seat_pos} → {action:?}, v{current} → v{}",
            state.version
        );
        self.sync_timer(&state);
        Ok(ApplyOk {
            version: state.version,
            outcome,
            events: log.events,
            views: build_views(&state),
        })
    }

    /// Синтетическое действие по истечении таймера хода: check, если
    /// он бесплатен, иначе fold. Идёт через те же guard'ы, что и
    /// действия живых игроков.
    pub fn expire_turn(
        &mut self,
        hand_id: HandId,
        seat_pos: SeatIndex,
        presented_version: u64,
    ) -> Result<ApplyOk, SubmitError> {
        let snapshot = self
            .repo
            .load_hand(hand_id)
            .ok_or(SubmitError::HandNotFound(hand_id))?;
        let state =
            reconstruct_state_from_db(&self.config, &snapshot.hand, &snapshot.seats, &snapshot.pots)?;

        let action = match state.seat(seat_pos) {
            Some(seat) if validation::to_call(&state, seat).is_zero() => PlayerAction::Check,
            _ => PlayerAction::Fold,
        };
        debug!("раздача {hand_id}: таймаут места {seat_pos}, синтетический {action:?}");
        self.submit_action(hand_id, seat_pos, action, presented_version)
    }

    fn sync_timer(&mut self, state: &HandState) {
        match state.acting_pos {
            Some(seat) => self
                .timer
                .arm(state.hand_id, seat, self.config.turn_timeout_secs),
            None => self.timer.cancel(state.hand_id),
        }
    }
}
