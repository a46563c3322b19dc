use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::card::Card;
use crate::domain::combination::{CardCombination, CombinationType};
use crate::engine::EngineError;

use super::rank_mask::{consecutive_run, mask_of_cards, rank_counts};

pub const MIN_STRAIGHT_LEN: usize = 3;
pub const MAX_STRAIGHT_LEN: usize = 12;
pub const MIN_CONSECUTIVE_PAIRS: usize = 3;
pub const MAX_CONSECUTIVE_PAIRS: usize = 6;

/// Определить комбинацию по точному набору карт.
///
/// Формы проверяются в порядке single → pair → triple → straight →
/// consecutive_pairs → four_of_kind, возвращается первая подошедшая.
/// Неподходящий набор (в том числе с повторами карт) – просто `None`.
pub fn detect_combination(cards: &[Card]) -> Option<CardCombination> {
    if cards.is_empty() || has_duplicates(cards) {
        return None;
    }

    detect_single(cards)
        .or_else(|| detect_pair(cards))
        .or_else(|| detect_triple(cards))
        .or_else(|| detect_straight(cards))
        .or_else(|| detect_consecutive_pairs(cards))
        .or_else(|| detect_four_of_kind(cards))
}

fn has_duplicates(cards: &[Card]) -> bool {
    let mut seen = HashSet::with_capacity(cards.len());
    cards.iter().any(|c| !seen.insert(*c))
}

fn all_same_rank(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].rank == w[1].rank)
}

fn detect_single(cards: &[Card]) -> Option<CardCombination> {
    (cards.len() == 1).then(|| CardCombination::new(CombinationType::Single, cards.to_vec()))
}

fn detect_pair(cards: &[Card]) -> Option<CardCombination> {
    (cards.len() == 2 && all_same_rank(cards))
        .then(|| CardCombination::new(CombinationType::Pair, cards.to_vec()))
}

fn detect_triple(cards: &[Card]) -> Option<CardCombination> {
    (cards.len() == 3 && all_same_rank(cards))
        .then(|| CardCombination::new(CombinationType::Triple, cards.to_vec()))
}

/// Sảnh: 3–12 разных рангов подряд, двойка запрещена.
fn detect_straight(cards: &[Card]) -> Option<CardCombination> {
    if !(MIN_STRAIGHT_LEN..=MAX_STRAIGHT_LEN).contains(&cards.len()) {
        return None;
    }
    let mask = mask_of_cards(cards);
    if mask.count_ones() as usize != cards.len() {
        return None;
    }
    consecutive_run(mask)?;
    Some(CardCombination::new(CombinationType::Straight, cards.to_vec()))
}

/// Đôi thông: ровно по две карты на каждый из 3–6 подряд идущих рангов, без двоек.
fn detect_consecutive_pairs(cards: &[Card]) -> Option<CardCombination> {
    if cards.len() % 2 != 0 {
        return None;
    }
    let pairs = cards.len() / 2;
    if !(MIN_CONSECUTIVE_PAIRS..=MAX_CONSECUTIVE_PAIRS).contains(&pairs) {
        return None;
    }
    let counts = rank_counts(cards);
    if counts.iter().any(|&c| c != 0 && c != 2) {
        return None;
    }
    let (_, len) = consecutive_run(mask_of_cards(cards))?;
    if len as usize != pairs {
        return None;
    }
    Some(CardCombination::new(
        CombinationType::ConsecutivePairs,
        cards.to_vec(),
    ))
}

fn detect_four_of_kind(cards: &[Card]) -> Option<CardCombination> {
    (cards.len() == 4 && all_same_rank(cards))
        .then(|| CardCombination::new(CombinationType::FourOfKind, cards.to_vec()))
}

/// Сравнить две комбинации одного типа.
///
/// - sảnh / đôi thông: сначала длина (длиннее старше), затем старшая карта;
/// - tứ quý: по рангу;
/// - single / pair / triple: по старшей карте.
///
/// Разные типы сравнивать нельзя – это ошибка вызывающей стороны.
pub fn compare_combinations(
    a: &CardCombination,
    b: &CardCombination,
) -> Result<Ordering, EngineError> {
    if a.kind != b.kind {
        return Err(EngineError::CombinationTypeMismatch {
            left: a.kind,
            right: b.kind,
        });
    }

    let ord = match a.kind {
        CombinationType::Straight | CombinationType::ConsecutivePairs => a
            .len()
            .cmp(&b.len())
            .then_with(|| a.highest_value().cmp(&b.highest_value())),
        CombinationType::FourOfKind => a.top_rank().cmp(&b.top_rank()),
        CombinationType::Single | CombinationType::Pair | CombinationType::Triple => {
            a.highest_value().cmp(&b.highest_value())
        }
    };
    Ok(ord)
}

/// `x` бьёт `y` обычным ходом (тот же тип и строго старше).
///
/// Для разных типов – `false`: перебивание другим типом возможно только через chặt.
pub fn can_beat_combination(x: &CardCombination, y: &CardCombination) -> bool {
    matches!(compare_combinations(x, y), Ok(Ordering::Greater))
}
