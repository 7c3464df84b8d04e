//! Оценка силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate_best_hand(hole, board) -> HandRank`
//!   `describe_hand(rank) -> String`

pub mod evaluator;
pub mod hand_rank;

pub use evaluator::evaluate_best_hand;
pub use hand_rank::{describe_hand, HandCategory, HandRank};
