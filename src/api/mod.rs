//! Внешняя поверхность движка.
//!
//! Здесь живут guard'ы конкурентности: несколько чат-клиентов могут
//! одновременно жать кнопки одной раздачи (double-tap, ретрай сети,
//! устаревшая inline-клавиатура). Оба guard'а проверяются ДО вызова
//! движка, по одному консистентному снапшоту:
//! - guard версии: кнопка несёт версию состояния на момент рендера;
//! - guard очереди: действовать может только `acting_pos`.
//!
//! Отказ ни того ни другого не мутирует хранилище и не двигает версию.

pub mod errors;
pub mod service;
pub mod timer;
pub mod views;

pub use errors::SubmitError;
pub use service::{ApplyOk, HandService};
pub use timer::{RecordingTimer, TurnTimer};
pub use views::{build_views, redact_events, HandView, Recipient, SeatView};
