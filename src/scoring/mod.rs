//! Подсчёт штрафов и итогов партии.

pub mod game_score;
pub mod penalties;

pub use game_score::{
    calculate_game_scores, calculate_instant_win_scores, finishing_order, GameScoreResult,
    SeatScore,
};
pub use penalties::{
    calculate_chat_penalty, calculate_cong_penalties, calculate_den_bai, calculate_thui,
    thui_receiver, toi_trang_amount, CongPenaltyResult, DenBaiEvidence, DenBaiResult,
    GamePenaltyState, PlayerPenalties, ThuiPenaltyResult, HANG_PENALTY,
};
