use crate::domain::card::{Card, Rank};

/// Битовая маска рангов.
///
/// Используем 13 бит (от 3 до 2):
/// бит 0 = тройка, бит 11 = туз, бит 12 = двойка.
pub type RankMask = u16;

/// Маска двойки: в sảnh и đôi thông она запрещена.
pub const HEO_MASK: RankMask = rank_to_bit(Rank::Two);

/// Маска всех рангов 3..A ("sảnh rồng" – по карте каждого ранга).
pub const DRAGON_MASK: RankMask = HEO_MASK - 1;

/// Получить битовую маску для одного ранга.
pub const fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << rank.order()
}

/// Маска рангов, присутствующих среди карт.
pub fn mask_of_cards(cards: &[Card]) -> RankMask {
    cards.iter().fold(0, |m, c| m | rank_to_bit(c.rank))
}

/// Сколько карт каждого ранга (индекс = `Rank::order()`).
pub fn rank_counts(cards: &[Card]) -> [u8; 13] {
    let mut counts = [0u8; 13];
    for card in cards {
        counts[card.rank.order() as usize] += 1;
    }
    counts
}

/// Маска из `len` подряд идущих рангов, начиная с `low`.
pub const fn run_mask(low: u8, len: u8) -> RankMask {
    (((1u32 << len) - 1) << low) as RankMask
}

/// Маска образует непрерывную цепочку рангов без двойки.
///
/// Возвращает (младший ранг, длина), если это так.
pub fn consecutive_run(mask: RankMask) -> Option<(u8, u8)> {
    if mask == 0 || mask & HEO_MASK != 0 {
        return None;
    }
    let low = mask.trailing_zeros() as u8;
    let len = mask.count_ones() as u8;
    if run_mask(low, len) == mask {
        Some((low, len))
    } else {
        None
    }
}

/// Все окна из `len` подряд идущих рангов 3..A, где в каждом ранге
/// не меньше `min_count` карт. Возвращает младший ранг каждого окна.
pub fn runs_with_min_count(counts: &[u8; 13], len: u8, min_count: u8) -> Vec<u8> {
    let mut lows = Vec::new();
    if len == 0 || len > 12 {
        return lows;
    }
    // Двойка (индекс 12) в цепочки не входит, поэтому окна заканчиваются на тузе.
    let last_low = 12u8.saturating_sub(len);
    for low in 0..=last_low {
        if (low..low + len).all(|r| counts[r as usize] >= min_count) {
            lows.push(low);
        }
    }
    lows
}
