use thiserror::Error;

use crate::domain::chips::Chips;

/// Нарушенное правило ставок. Пользовательская ошибка: состояние
/// раздачи и версия при отказе не меняются.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("раздача уже завершена")]
    HandOver,

    #[error("место не участвует в раздаче")]
    NotInHand,

    #[error("место уже в олл-ине")]
    AlreadyAllIn,

    #[error("check невозможен: нужно уравнять {to_call}")]
    CheckFacingBet { to_call: Chips },

    #[error("call невозможен: нет ставки для уравнивания")]
    NothingToCall,

    #[error("нет фишек для этого действия")]
    NoChips,

    #[error("raise до {target} не превышает текущую ставку {current_bet}")]
    RaiseBelowCurrent { target: Chips, current_bet: Chips },

    #[error("raise слишком мал: минимум до {min_total}")]
    RaiseTooSmall { min_total: Chips },

    /// Олл-ин ниже минимального рейза не переоткрыл торговлю:
    /// уже действовавшие на этой улице могут только call или fold.
    #[error("торговля не переоткрыта: raise недоступен")]
    BettingNotReopened,
}

/// Ошибки движка.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("недопустимое действие: {0}")]
    Rule(#[from] RuleViolation),

    /// Перестановка колоды не может выдать нужное число свежих карт.
    /// Это баг учёта (seed/раскрытые карты), раздача фатально испорчена.
    #[error("в перестановке колоды не хватает карт")]
    InsufficientCards,

    /// Невозможные данные: без вмешательства оператора не чинится.
    #[error("несогласованное состояние раздачи: {0}")]
    MalformedState(String),
}
