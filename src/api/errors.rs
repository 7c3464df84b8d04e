use thiserror::Error;

use crate::domain::seat::SeatIndex;
use crate::domain::HandId;
use crate::engine::errors::EngineError;

/// Отказ поверхности приёма действий. Вызывающий всегда получает
/// типизированную причину, никогда — обезличенную ошибку.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("раздача {0} не найдена")]
    HandNotFound(HandId),

    #[error("раздача {0} уже существует")]
    HandAlreadyExists(HandId),

    /// Guard очереди: запрос не от места, чей ход ожидается.
    #[error("сейчас не ход места {seat}")]
    NotYourTurn { seat: SeatIndex },

    /// Guard версии: кнопка отрендерена для уже ушедшего состояния.
    #[error("устаревшая версия: кнопка v{presented}, в хранилище v{current}")]
    StaleVersion { presented: u64, current: u64 },

    /// Ошибка движка (нарушение правил, битое состояние, колода).
    #[error(transparent)]
    Engine(#[from] EngineError),
}
