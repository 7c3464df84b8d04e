//! Инфраструктурный слой вокруг движка:
//! - строки хранилища и репозиторий раздач с compare-and-swap;
//! - реконструкция `HandState` из строк (и обратная проекция).

pub mod persistence;
pub mod reconstruct;

pub use persistence::{
    HandRepository, HandRow, HandSnapshot, InMemoryHandRepository, PotRow, SaveOutcome, SeatRow,
};
pub use reconstruct::{reconstruct_state_from_db, state_to_rows};
