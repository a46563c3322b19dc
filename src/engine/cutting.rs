//! Chặt: цепочка перебиваний в круге и учёт одиночных heo подряд.

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::combination::CardCombination;
use crate::domain::points::Points;
use crate::domain::SeatIndex;

/// Один chặt в цепочке.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CutEntry {
    /// Кого перебили.
    pub cut_player_index: SeatIndex,
    /// Кто перебил.
    pub cutting_player_index: SeatIndex,
    pub penalty_points: Points,
    pub heo_count: u32,
    /// Жертва сразу вышла после chặt: цепочка аннулируется.
    #[serde(default)]
    pub finished_after_cut: bool,
}

/// Цепочка chặt текущего круга, новые записи в начале.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CuttingChainState {
    pub entries: Vec<CutEntry>,
}

/// Кто кому сколько платит по итогам цепочки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChainSettlement {
    pub payer: SeatIndex,
    pub receiver: SeatIndex,
    pub amount: Points,
}

impl CuttingChainState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Последний chặt.
    pub fn head(&self) -> Option<&CutEntry> {
        self.entries.first()
    }

    pub fn total(&self) -> Points {
        self.entries.iter().map(|e| e.penalty_points).sum()
    }

    pub fn is_voided(&self) -> bool {
        self.head().is_some_and(|e| e.finished_after_cut)
    }
}

/// Добавить chặt в начало цепочки.
pub fn add_cut(chain: &CuttingChainState, entry: CutEntry) -> CuttingChainState {
    let mut entries = Vec::with_capacity(chain.entries.len() + 1);
    entries.push(entry);
    entries.extend_from_slice(&chain.entries);
    CuttingChainState { entries }
}

/// Отметить, что место `seat` вышло. Если это последняя жертва,
/// вся цепочка аннулируется.
pub fn mark_finished_after_cut(chain: &CuttingChainState, seat: SeatIndex) -> CuttingChainState {
    let mut next = chain.clone();
    if let Some(head) = next.entries.first_mut() {
        if head.cut_player_index == seat {
            head.finished_after_cut = true;
        }
    }
    next
}

/// Итог цепочки: последняя жертва платит последнему перебившему
/// сумму всех штрафов. `None` для пустой или аннулированной цепочки.
pub fn resolve_cutting_chain(chain: &CuttingChainState) -> Option<ChainSettlement> {
    let head = chain.head()?;
    if head.finished_after_cut {
        return None;
    }
    let amount = chain.total();
    if amount.is_zero() {
        return None;
    }
    Some(ChainSettlement {
        payer: head.cut_player_index,
        receiver: head.cutting_player_index,
        amount,
    })
}

/// Одиночные heo, сыгранные в круге подряд.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SingleHeoTrackingState {
    pub heo: Vec<Card>,
}

impl SingleHeoTrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.heo.len()
    }
}

/// Учесть сыгранную комбинацию: одиночная heo продолжает серию,
/// любая другая комбинация её обрывает. Пасы серию не трогают.
pub fn track_single_heo(
    state: &SingleHeoTrackingState,
    combination: &CardCombination,
) -> SingleHeoTrackingState {
    if combination.is_single_heo() {
        let mut heo = state.heo.clone();
        heo.extend_from_slice(&combination.cards);
        SingleHeoTrackingState { heo }
    } else {
        SingleHeoTrackingState::new()
    }
}
