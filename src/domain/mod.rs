//! Доменная модель раздачи: карты, фишки, места, банки, seed, состояние.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod pot;
pub mod seat;
pub mod seed;

/// Идентификатор раздачи (присваивается при создании, далее неизменен).
pub type HandId = u64;

/// Непрозрачная ссылка на игрока-владельца места.
/// Раздача не владеет личностью игрока — только «одалживает» её.
pub type UserId = u64;

pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use pot::*;
pub use seat::*;
pub use seed::*;
