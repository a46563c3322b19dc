//! Оценка комбинаций Tiến Lên.
//!
//! Основные функции:
//!   `detect_combination(cards) -> Option<CardCombination>`
//!   `compare_combinations(a, b) -> Result<Ordering, EngineError>`
//!   `can_cut(attack, defence) -> Option<CutTarget>`
//!   `detect_instant_win(hand, opening_round) -> InstantWinResult`

pub mod chat;
pub mod combination;
pub mod instant_win;
pub mod rank_mask;
pub mod search;

pub use chat::{can_cut, cut_target, CutTarget};
pub use combination::{can_beat_combination, compare_combinations, detect_combination};
pub use instant_win::{detect_instant_win, InstantWinResult, InstantWinType};
pub use search::{
    all_combinations, find_beating_combinations, find_combinations_containing, find_hang_in_hand,
};
