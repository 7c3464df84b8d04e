//! Покерный движок: действия, улицы, сайд-поты, шоудаун.
//!
//! Движок — чистые функции над `HandState`:
//!   - `start_hand` — собрать раздачу: блайнды, анте, карманные карты;
//!   - `apply_action` — провалидировать и применить действие игрока;
//!   - `progress_street` — закрыть раунд ставок и открыть следующую улицу
//!     (с догоном улиц до шоудауна, когда действовать некому);
//!   - `resolve_showdown` — ранжировать руки и раздать банки.
//!
//! Очередь хода и optimistic-версия проверяются НЕ здесь, а на границе
//! `api` — поэтому движок пригоден и для симуляций/тестов без живого стола.

pub mod actions;
pub mod dealing;
pub mod errors;
pub mod events;
pub mod game_loop;
pub mod positions;
pub mod showdown;
pub mod side_pots;
pub mod streets;
pub mod validation;

pub use actions::PlayerAction;
pub use errors::{EngineError, RuleViolation};
pub use events::{EventLog, HandEvent, HandEventKind, ShowdownEntry};
pub use game_loop::{apply_action, start_hand, HandOutcome, Participant};
