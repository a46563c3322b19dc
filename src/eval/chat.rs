//! Правила chặt: какая "hàng" может перерубить heo или другую hàng.

use serde::{Deserialize, Serialize};

use crate::domain::combination::{CardCombination, CombinationType};

use super::combination::can_beat_combination;

/// Что именно рубят.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CutTarget {
    /// Одиночная двойка (или серия одиночных двоек подряд).
    SingleHeo,
    /// Пара двоек.
    HeoPair,
    /// 3/4 đôi thông или tứ quý.
    Hang,
}

/// Можно ли вообще рубить эту комбинацию.
pub fn cut_target(defence: &CardCombination) -> Option<CutTarget> {
    if defence.is_single_heo() {
        Some(CutTarget::SingleHeo)
    } else if defence.is_heo_pair() {
        Some(CutTarget::HeoPair)
    } else if defence.is_hang() {
        Some(CutTarget::Hang)
    } else {
        None
    }
}

/// Рубит ли `attack` комбинацию `defence`.
///
/// - одиночную heo: любая hàng;
/// - пару heo: tứ quý или 4 đôi thông;
/// - 3 đôi thông: старшие 3 đôi thông, tứ quý, 4 đôi thông;
/// - tứ quý: старший tứ quý, 4 đôi thông;
/// - 4 đôi thông: старшие 4 đôi thông.
pub fn can_cut(attack: &CardCombination, defence: &CardCombination) -> Option<CutTarget> {
    if !attack.is_hang() {
        return None;
    }
    let target = cut_target(defence)?;

    let allowed = match target {
        CutTarget::SingleHeo => true,
        CutTarget::HeoPair => {
            attack.kind == CombinationType::FourOfKind || attack.pair_count() == 4
        }
        CutTarget::Hang => {
            can_beat_combination(attack, defence)
                || (attack.kind == CombinationType::FourOfKind && defence.pair_count() == 3)
                || (attack.pair_count() == 4 && defence.kind == CombinationType::FourOfKind)
        }
    };

    allowed.then_some(target)
}
