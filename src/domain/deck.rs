use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::seed::HandSeed;

/// Стандартная 52-карточная колода в каноническом порядке:
/// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
pub fn standard_52() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

/// Полная перестановка колоды для раздачи — чистая функция seed.
///
/// Порядок сдачи = порядок в векторе (индекс 0 сдаётся первым).
/// Одинаковый seed всегда даёт одинаковую перестановку: на этом держится
/// восстановление «оставшейся колоды» из (seed, уже раскрытые карты).
pub fn shuffled_for(seed: &HandSeed) -> Vec<Card> {
    let mut rng = StdRng::from_seed(seed.bytes);
    let mut cards = standard_52();
    cards.shuffle(&mut rng);
    cards
}
