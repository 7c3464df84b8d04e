use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Категория руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Сила руки, упакованная в u32 так, что обычный `Ord` сравнивает
/// руки корректно:
///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
/// r0..r4 — определяющие ранги от старшего к младшему (значения 2..14),
/// неиспользуемые хвостовые позиции забиты двойкой и на сравнение
/// не влияют.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

impl HandRank {
    pub fn pack(category: HandCategory, ranks: [Rank; 5]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, r) in ranks.iter().enumerate() {
            value |= (*r as u32) << (16 - 4 * i);
        }
        HandRank(value)
    }

    pub fn category(&self) -> HandCategory {
        match (self.0 >> 20) & 0x0F {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }

    /// Определяющие ранги от старшего к младшему.
    pub fn ranks(&self) -> [Rank; 5] {
        let nibble = |shift: u32| {
            let v = ((self.0 >> shift) & 0x0F) as u8;
            Rank::from_value(v).unwrap_or(Rank::Two)
        };
        [nibble(16), nibble(12), nibble(8), nibble(4), nibble(0)]
    }
}

fn rank_name(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "Two",
        Rank::Three => "Three",
        Rank::Four => "Four",
        Rank::Five => "Five",
        Rank::Six => "Six",
        Rank::Seven => "Seven",
        Rank::Eight => "Eight",
        Rank::Nine => "Nine",
        Rank::Ten => "Ten",
        Rank::Jack => "Jack",
        Rank::Queen => "Queen",
        Rank::King => "King",
        Rank::Ace => "Ace",
    }
}

fn rank_plural(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "Twos",
        Rank::Three => "Threes",
        Rank::Four => "Fours",
        Rank::Five => "Fives",
        Rank::Six => "Sixes",
        Rank::Seven => "Sevens",
        Rank::Eight => "Eights",
        Rank::Nine => "Nines",
        Rank::Ten => "Tens",
        Rank::Jack => "Jacks",
        Rank::Queen => "Queens",
        Rank::King => "Kings",
        Rank::Ace => "Aces",
    }
}

/// Человекочитаемое описание руки для сообщений шоудауна.
pub fn describe_hand(rank: HandRank) -> String {
    let ranks = rank.ranks();
    match rank.category() {
        HandCategory::HighCard => format!("High card, {}", rank_name(ranks[0])),
        HandCategory::OnePair => format!("Pair of {}", rank_plural(ranks[0])),
        HandCategory::TwoPair => format!(
            "Two pair, {} and {}",
            rank_plural(ranks[0]),
            rank_plural(ranks[1])
        ),
        HandCategory::ThreeOfAKind => {
            format!("Three of a kind, {}", rank_plural(ranks[0]))
        }
        HandCategory::Straight => format!("Straight, {} high", rank_name(ranks[0])),
        HandCategory::Flush => format!("Flush, {} high", rank_name(ranks[0])),
        HandCategory::FullHouse => format!(
            "Full house, {} over {}",
            rank_plural(ranks[0]),
            rank_plural(ranks[1])
        ),
        HandCategory::FourOfAKind => {
            format!("Four of a kind, {}", rank_plural(ranks[0]))
        }
        HandCategory::StraightFlush => {
            if ranks[0] == Rank::Ace {
                "Royal flush".to_string()
            } else {
                format!("Straight flush, {} high", rank_name(ranks[0]))
            }
        }
    }
}
