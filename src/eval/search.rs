//! Перебор комбинаций в руке.
//!
//! Рука – не больше 13 карт, поэтому полный перебор подмножеств (2^13)
//! дёшев; отсекаем только заведомо лишнее.

use crate::domain::card::{Card, Rank};
use crate::domain::combination::CardCombination;

use super::chat::can_cut;
use super::combination::{
    can_beat_combination, detect_combination, MAX_CONSECUTIVE_PAIRS, MAX_STRAIGHT_LEN,
};
use super::rank_mask::runs_with_min_count;

/// Самая длинная возможная комбинация (12 карт: sảnh 3..A или 6 đôi thông).
const MAX_COMBINATION_LEN: usize = if MAX_STRAIGHT_LEN > MAX_CONSECUTIVE_PAIRS * 2 {
    MAX_STRAIGHT_LEN
} else {
    MAX_CONSECUTIVE_PAIRS * 2
};

/// Все комбинации, которые можно составить из карт руки.
pub fn all_combinations(hand: &[Card]) -> Vec<CardCombination> {
    let mut out = enumerate_subsets(hand, None);
    sort_combinations(&mut out);
    out
}

/// Все комбинации руки, содержащие конкретную карту.
///
/// Используется для первого хода первой партии (обязана быть 3♠).
/// Если карты в руке нет – пустой список.
pub fn find_combinations_containing(hand: &[Card], card: Card) -> Vec<CardCombination> {
    if !hand.contains(&card) {
        return Vec::new();
    }
    let mut out = enumerate_subsets(hand, Some(card));
    sort_combinations(&mut out);
    out
}

/// Все комбинации руки, которыми можно ответить на `last`:
/// обычным перебиванием или chặt. Если `last` нет – все комбинации.
pub fn find_beating_combinations(
    hand: &[Card],
    last: Option<&CardCombination>,
) -> Vec<CardCombination> {
    let mut out = enumerate_subsets(hand, None);
    if let Some(last) = last {
        out.retain(|c| can_beat_combination(c, last) || can_cut(c, last).is_some());
    }
    sort_combinations(&mut out);
    out
}

fn enumerate_subsets(hand: &[Card], required: Option<Card>) -> Vec<CardCombination> {
    let n = hand.len();
    if n == 0 || n > 20 {
        return Vec::new();
    }

    let required_bit = required.and_then(|r| hand.iter().position(|c| *c == r));

    let mut out = Vec::new();
    let mut subset = Vec::with_capacity(MAX_COMBINATION_LEN);
    for mask in 1u32..(1u32 << n) {
        if let Some(bit) = required_bit {
            if mask & (1 << bit) == 0 {
                continue;
            }
        }
        if mask.count_ones() as usize > MAX_COMBINATION_LEN {
            continue;
        }

        subset.clear();
        subset.extend((0..n).filter(|i| mask & (1 << i) != 0).map(|i| hand[i]));
        if let Some(combo) = detect_combination(&subset) {
            out.push(combo);
        }
    }
    out
}

fn sort_combinations(combos: &mut [CardCombination]) {
    combos.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| a.len().cmp(&b.len()))
            .then_with(|| a.highest_value().cmp(&b.highest_value()))
            .then_with(|| a.cards.cmp(&b.cards))
    });
}

/// Найти hàng в руке жадным непересекающимся покрытием.
///
/// Порядок: сначала tứ quý, затем окна по 4 пары подряд, затем по 3 пары.
/// Карта, вошедшая в одну hàng, во вторую уже не попадёт.
pub fn find_hang_in_hand(hand: &[Card]) -> Vec<CardCombination> {
    let mut by_rank: Vec<Vec<Card>> = vec![Vec::new(); Rank::ALL.len()];
    for card in hand {
        by_rank[card.rank.order() as usize].push(*card);
    }
    for cards in by_rank.iter_mut() {
        cards.sort_by_key(Card::value);
        cards.dedup();
    }

    let mut found = Vec::new();

    for rank_cards in by_rank.iter_mut() {
        if rank_cards.len() == 4 {
            if let Some(combo) = detect_combination(rank_cards) {
                found.push(combo);
            }
            rank_cards.clear();
        }
    }

    for window in [4u8, 3u8] {
        loop {
            let mut counts = [0u8; 13];
            for (i, cards) in by_rank.iter().enumerate() {
                counts[i] = cards.len().min(u8::MAX as usize) as u8;
            }
            let Some(&low) = runs_with_min_count(&counts, window, 2).first() else {
                break;
            };

            let mut cards = Vec::with_capacity(window as usize * 2);
            for r in low..low + window {
                let rank_cards = &mut by_rank[r as usize];
                cards.extend(rank_cards.drain(..2));
            }
            match detect_combination(&cards) {
                Some(combo) => found.push(combo),
                None => break,
            }
        }
    }

    found
}
