//! Ядро покерного движка для чат-бота: детерминированная state-machine
//! одной раздачи техасского холдема.
//!
//! Слои (сверху вниз по зависимостям):
//! - `api`    — поверхность приёма действий: guard'ы конкурентности
//!              (версия + очередь хода), рассылка редактированных view;
//! - `infra`  — строки хранилища, репозиторий с compare-and-swap,
//!              реконструкция `HandState` из строк;
//! - `engine` — валидация и применение действий, переход улиц,
//!              сайд-поты, шоудаун;
//! - `eval`   — оценка силы рук (5 лучших карт из 7);
//! - `domain` — карты, фишки, места, банки, seed, `HandState`.
//!
//! Движок чистый и синхронный: вся конкурентность решается на границе
//! `api` через optimistic-версию строки раздачи.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
