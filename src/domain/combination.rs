use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};

/// Тип комбинации карт.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CombinationType {
    Single,
    Pair,
    Triple,
    /// Sảnh: 3–12 карт подряд, без двоек.
    Straight,
    /// Đôi thông: 3–6 пар подряд, без двоек.
    ConsecutivePairs,
    /// Tứ quý: четыре карты одного ранга (двойки тоже).
    FourOfKind,
}

impl CombinationType {
    pub const fn code(self) -> &'static str {
        match self {
            CombinationType::Single => "single",
            CombinationType::Pair => "pair",
            CombinationType::Triple => "triple",
            CombinationType::Straight => "straight",
            CombinationType::ConsecutivePairs => "consecutive_pairs",
            CombinationType::FourOfKind => "four_of_kind",
        }
    }
}

impl fmt::Display for CombinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Комбинация карт, выложенная (или выкладываемая) игроком.
///
/// Карты всегда отсортированы по возрастанию `value()`.
/// Строится через `eval::detect_combination`, которая гарантирует форму.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CardCombination {
    #[serde(rename = "type")]
    pub kind: CombinationType,
    pub cards: Vec<Card>,
}

impl CardCombination {
    pub(crate) fn new(kind: CombinationType, mut cards: Vec<Card>) -> Self {
        cards.sort_by_key(Card::value);
        Self { kind, cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Старшая карта комбинации.
    pub fn highest_card(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Значение старшей карты (0, если комбинация пуста).
    pub fn highest_value(&self) -> u8 {
        self.highest_card().map_or(0, |c| c.value())
    }

    /// Количество пар в đôi thông (для остальных типов 0).
    pub fn pair_count(&self) -> usize {
        match self.kind {
            CombinationType::ConsecutivePairs => self.cards.len() / 2,
            _ => 0,
        }
    }

    /// Одиночная двойка.
    pub fn is_single_heo(&self) -> bool {
        self.kind == CombinationType::Single && self.cards.iter().all(Card::is_heo)
    }

    /// Пара двоек.
    pub fn is_heo_pair(&self) -> bool {
        self.kind == CombinationType::Pair && self.cards.iter().all(Card::is_heo)
    }

    /// Сколько heo в комбинации.
    pub fn heo_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_heo()).count()
    }

    /// "Hàng": 3 или 4 пары подряд либо tứ quý.
    pub fn is_hang(&self) -> bool {
        match self.kind {
            CombinationType::FourOfKind => true,
            CombinationType::ConsecutivePairs => matches!(self.pair_count(), 3 | 4),
            _ => false,
        }
    }

    /// Ранг tứ quý / тройки / пары (ранг старшей карты).
    pub fn top_rank(&self) -> Option<Rank> {
        self.highest_card().map(|c| c.rank)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

impl fmt::Display for CardCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}
