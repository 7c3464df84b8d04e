use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Действие игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerAction {
    /// Пропустить ход (легально только без живой ставки против места).
    Check,
    /// Уравнять текущую ставку. Нехватка стека превращается
    /// в неявный олл-ин, а не в ошибку.
    Call,
    /// Сбросить карты и выйти из раздачи.
    Fold,
    /// Повысить ДО указанной суммарной ставки улицы.
    Raise(Chips),
    /// Поставить весь оставшийся стек.
    AllIn,
}
