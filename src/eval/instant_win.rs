//! Tới trắng: автоматическая победа по только что розданной руке.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::HAND_SIZE;

use super::rank_mask::{mask_of_cards, rank_counts, runs_with_min_count, RankMask, DRAGON_MASK};

/// Вид автоматической победы. Сериализуется стабильными кодами.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InstantWinType {
    /// Четыре тройки.
    TuQuy3,
    /// Четыре двойки.
    TuQuyHeo,
    /// 4 пары подряд от тройки, с 3♠.
    BonDoiThong3Bich,
    /// 3 пары подряд от тройки, с 3♠.
    BaDoiThong3Bich,
    /// Три tứ quý (без двоек).
    BaTuQuy,
    /// Четыре тройки карт одного ранга.
    BonSamCo,
    /// Три тройки карт одного ранга.
    BaSamCo,
    /// 5 пар подряд и тройка.
    NamDoiThongMotSam,
    /// 5 любых пар и тройка.
    NamDoiMotSam,
    /// 5 пар подряд.
    NamDoiThong,
    /// 6 любых пар.
    SauDoi,
    /// Вся рука одного цвета.
    DongMau,
    /// Все ранги от 3 до туза.
    SanhRong,
}

impl InstantWinType {
    pub const fn code(self) -> &'static str {
        match self {
            InstantWinType::TuQuy3 => "tu_quy_3",
            InstantWinType::TuQuyHeo => "tu_quy_heo",
            InstantWinType::BonDoiThong3Bich => "bon_doi_thong_3_bich",
            InstantWinType::BaDoiThong3Bich => "ba_doi_thong_3_bich",
            InstantWinType::BaTuQuy => "ba_tu_quy",
            InstantWinType::BonSamCo => "bon_sam_co",
            InstantWinType::BaSamCo => "ba_sam_co",
            InstantWinType::NamDoiThongMotSam => "nam_doi_thong_mot_sam",
            InstantWinType::NamDoiMotSam => "nam_doi_mot_sam",
            InstantWinType::NamDoiThong => "nam_doi_thong",
            InstantWinType::SauDoi => "sau_doi",
            InstantWinType::DongMau => "dong_mau",
            InstantWinType::SanhRong => "sanh_rong",
        }
    }
}

impl fmt::Display for InstantWinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Результат проверки руки на tới trắng.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstantWinResult {
    pub has_instant_win: bool,
    #[serde(rename = "type")]
    pub kind: Option<InstantWinType>,
}

impl InstantWinResult {
    pub const NONE: InstantWinResult = InstantWinResult {
        has_instant_win: false,
        kind: None,
    };

    fn win(kind: InstantWinType) -> Self {
        Self {
            has_instant_win: true,
            kind: Some(kind),
        }
    }
}

/// Правила первой партии сессии, в порядке приоритета.
const OPENING_RULES: [InstantWinType; 9] = [
    InstantWinType::TuQuy3,
    InstantWinType::TuQuyHeo,
    InstantWinType::BonDoiThong3Bich,
    InstantWinType::BaDoiThong3Bich,
    InstantWinType::BaTuQuy,
    InstantWinType::BonSamCo,
    InstantWinType::BaSamCo,
    InstantWinType::NamDoiThongMotSam,
    InstantWinType::NamDoiMotSam,
];

/// Правила остальных партий, в порядке приоритета.
const REGULAR_RULES: [InstantWinType; 5] = [
    InstantWinType::TuQuyHeo,
    InstantWinType::NamDoiThong,
    InstantWinType::SauDoi,
    InstantWinType::DongMau,
    InstantWinType::SanhRong,
];

/// Проверить руку на tới trắng.
///
/// Рука не из 13 карт никогда не выигрывает. `opening_round` выбирает
/// набор правил: первая партия сессии или остальные.
pub fn detect_instant_win(hand: &[Card], opening_round: bool) -> InstantWinResult {
    if hand.len() != HAND_SIZE {
        return InstantWinResult::NONE;
    }
    let shape = HandShape::of(hand);

    let rules: &[InstantWinType] = if opening_round {
        &OPENING_RULES
    } else {
        &REGULAR_RULES
    };

    rules
        .iter()
        .copied()
        .find(|kind| shape.satisfies(*kind))
        .map_or(InstantWinResult::NONE, InstantWinResult::win)
}

/// Сводка по руке, на которой работают правила.
struct HandShape {
    counts: [u8; 13],
    ranks: RankMask,
    has_three_of_spades: bool,
    monochrome: bool,
}

impl HandShape {
    fn of(hand: &[Card]) -> Self {
        let reds = hand.iter().filter(|c| c.is_red()).count();
        Self {
            counts: rank_counts(hand),
            ranks: mask_of_cards(hand),
            has_three_of_spades: hand.contains(&Card::THREE_OF_SPADES),
            monochrome: reds == 0 || reds == hand.len(),
        }
    }

    fn satisfies(&self, kind: InstantWinType) -> bool {
        match kind {
            InstantWinType::TuQuy3 => self.count(Rank::Three) == 4,
            InstantWinType::TuQuyHeo => self.count(Rank::Two) == 4,
            InstantWinType::BonDoiThong3Bich => {
                self.has_three_of_spades && self.pairs_from_three(4)
            }
            InstantWinType::BaDoiThong3Bich => {
                self.has_three_of_spades && self.pairs_from_three(3)
            }
            InstantWinType::BaTuQuy => self.quads_without_heo() >= 3,
            InstantWinType::BonSamCo => self.triples() >= 4,
            InstantWinType::BaSamCo => self.triples() >= 3,
            InstantWinType::NamDoiThongMotSam => self.five_run_and_triple(),
            InstantWinType::NamDoiMotSam => self.five_pairs_and_triple(),
            InstantWinType::NamDoiThong => !runs_with_min_count(&self.counts, 5, 2).is_empty(),
            InstantWinType::SauDoi => self.pairs_excluding(None) >= 6,
            InstantWinType::DongMau => self.monochrome,
            // 12 разных рангов 3..A, тринадцатая карта любая.
            InstantWinType::SanhRong => (self.ranks & DRAGON_MASK) == DRAGON_MASK,
        }
    }

    fn count(&self, rank: Rank) -> u8 {
        self.counts[rank.order() as usize]
    }

    /// `len` пар подряд, начиная с тройки.
    fn pairs_from_three(&self, len: usize) -> bool {
        self.counts[..len].iter().all(|&c| c >= 2)
    }

    fn quads_without_heo(&self) -> usize {
        self.counts[..12].iter().filter(|&&c| c == 4).count()
    }

    fn triples(&self) -> usize {
        self.counts.iter().filter(|&&c| c >= 3).count()
    }

    /// Сколько пар можно набрать (tứ quý = две пары), не трогая `skip`.
    fn pairs_excluding(&self, skip: Option<usize>) -> usize {
        self.counts
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .map(|(_, &c)| (c / 2) as usize)
            .sum()
    }

    fn triple_ranks(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c >= 3)
            .map(|(i, _)| i)
    }

    fn five_run_and_triple(&self) -> bool {
        runs_with_min_count(&self.counts, 5, 2).into_iter().any(|low| {
            let run = low as usize..low as usize + 5;
            self.triple_ranks().any(|t| !run.contains(&t))
        })
    }

    fn five_pairs_and_triple(&self) -> bool {
        self.triple_ranks()
            .any(|t| self.pairs_excluding(Some(t)) >= 5)
    }
}
