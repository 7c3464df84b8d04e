use crate::domain::card::{Card, Rank, Suit};

use super::hand_rank::{HandCategory, HandRank};

/// Битовая маска рангов: бит 0 — двойка, бит 12 — туз.
type RankMask = u16;

fn rank_bit(rank: Rank) -> RankMask {
    1u16 << ((rank as u8) - 2)
}

fn suit_index(suit: Suit) -> usize {
    match suit {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// Лучшая 5-карточная рука из hole + board.
///
/// Ожидается суммарно 5–7 карт; оценка идёт напрямую по счётчикам
/// рангов/мастей, без перебора 5-карточных комбинаций.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // индексы 2..14
    let mut suit_counts = [0u8; 4];
    let mut suit_masks = [0 as RankMask; 4];
    let mut rank_mask: RankMask = 0;

    for card in hole.iter().chain(board.iter()) {
        let s = suit_index(card.suit);
        suit_counts[s] += 1;
        suit_masks[s] |= rank_bit(card.rank);
        rank_counts[card.rank as usize] += 1;
        rank_mask |= rank_bit(card.rank);
    }

    // Стрит-флеш: стрит ищем по маске флешевой масти.
    // С 7 карт флешевой может быть максимум одна масть.
    let flush_suit = (0..4).find(|&s| suit_counts[s] >= 5);
    if let Some(s) = flush_suit {
        if let Some(high) = straight_high(suit_masks[s]) {
            return HandRank::pack(HandCategory::StraightFlush, straight_ranks(high));
        }
    }

    if let Some(quad) = highest_with_count(&rank_counts, 4) {
        let kicker = ranks_desc(rank_mask)
            .into_iter()
            .find(|r| *r != quad)
            .unwrap_or(Rank::Two);
        return HandRank::pack(
            HandCategory::FourOfAKind,
            [quad, kicker, Rank::Two, Rank::Two, Rank::Two],
        );
    }

    // Фулл-хаус: старший сет + старшая пара среди остальных рангов
    // (вторая тройка тоже считается парой).
    if let Some(trips) = highest_with_count(&rank_counts, 3) {
        let pair = ranks_desc(rank_mask)
            .into_iter()
            .find(|r| *r != trips && rank_counts[*r as usize] >= 2);
        if let Some(pair) = pair {
            return HandRank::pack(
                HandCategory::FullHouse,
                [trips, pair, Rank::Two, Rank::Two, Rank::Two],
            );
        }
    }

    if let Some(s) = flush_suit {
        return HandRank::pack(HandCategory::Flush, top_five(suit_masks[s]));
    }

    if let Some(high) = straight_high(rank_mask) {
        return HandRank::pack(HandCategory::Straight, straight_ranks(high));
    }

    if let Some(trips) = highest_with_count(&rank_counts, 3) {
        let mut kickers = ranks_desc(rank_mask)
            .into_iter()
            .filter(|r| *r != trips);
        let k1 = kickers.next().unwrap_or(Rank::Two);
        let k2 = kickers.next().unwrap_or(Rank::Two);
        return HandRank::pack(
            HandCategory::ThreeOfAKind,
            [trips, k1, k2, Rank::Two, Rank::Two],
        );
    }

    let pairs: Vec<Rank> = ranks_desc(rank_mask)
        .into_iter()
        .filter(|r| rank_counts[*r as usize] >= 2)
        .collect();

    if pairs.len() >= 2 {
        // С 7 карт возможны три пары: третья конкурирует как кикер.
        let kicker = ranks_desc(rank_mask)
            .into_iter()
            .find(|r| *r != pairs[0] && *r != pairs[1])
            .unwrap_or(Rank::Two);
        return HandRank::pack(
            HandCategory::TwoPair,
            [pairs[0], pairs[1], kicker, Rank::Two, Rank::Two],
        );
    }

    if let Some(&pair) = pairs.first() {
        let mut kickers = ranks_desc(rank_mask).into_iter().filter(|r| *r != pair);
        let k1 = kickers.next().unwrap_or(Rank::Two);
        let k2 = kickers.next().unwrap_or(Rank::Two);
        let k3 = kickers.next().unwrap_or(Rank::Two);
        return HandRank::pack(HandCategory::OnePair, [pair, k1, k2, k3, Rank::Two]);
    }

    HandRank::pack(HandCategory::HighCard, top_five(rank_mask))
}

/// Старшая карта стрита в маске рангов, если стрит есть.
/// Wheel (A2345) возвращает пятёрку.
fn straight_high(mask: RankMask) -> Option<Rank> {
    for high in (6u8..=14).rev() {
        let window = 0b1_1111u16 << (high - 6);
        if mask & window == window {
            return Rank::from_value(high);
        }
    }
    let wheel = rank_bit(Rank::Ace) | 0b1111;
    if mask & wheel == wheel {
        return Some(Rank::Five);
    }
    None
}

/// Пять рангов стрита от старшей карты вниз (wheel — особый случай).
fn straight_ranks(high: Rank) -> [Rank; 5] {
    if high == Rank::Five {
        return [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace];
    }
    let h = high as u8;
    let at = |delta: u8| Rank::from_value(h - delta).unwrap_or(Rank::Two);
    [high, at(1), at(2), at(3), at(4)]
}

/// Старший ранг, встречающийся ровно `count` раз (для каре — 4, сета — 3).
/// Для сета ищем `>= 3`: с 7 карт каре уже отсечено раньше.
fn highest_with_count(rank_counts: &[u8; 15], count: u8) -> Option<Rank> {
    (2u8..=14)
        .rev()
        .find(|v| rank_counts[*v as usize] >= count)
        .and_then(Rank::from_value)
}

/// Ранги маски по убыванию.
fn ranks_desc(mask: RankMask) -> Vec<Rank> {
    (2u8..=14)
        .rev()
        .filter(|v| mask & (1u16 << (v - 2)) != 0)
        .filter_map(Rank::from_value)
        .collect()
}

/// Пять старших рангов маски (маска содержит минимум пять).
fn top_five(mask: RankMask) -> [Rank; 5] {
    let desc = ranks_desc(mask);
    let mut out = [Rank::Two; 5];
    for (i, r) in desc.into_iter().take(5).enumerate() {
        out[i] = r;
    }
    out
}
