use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::points::Points;
use crate::domain::{GameId, SeatIndex};
use crate::eval::InstantWinType;
use crate::scoring::{
    CongPenaltyResult, DenBaiResult, GamePenaltyState, GameScoreResult, ThuiPenaltyResult,
};

/// Итог завершённой партии. Удобно для истории и сохранения оркестратором.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub game_id: GameId,
    pub winner: SeatIndex,
    /// Победитель первый, về bét последний.
    pub finishing_order: Vec<SeatIndex>,
    /// Руки мест на момент окончания партии.
    pub final_hands: Vec<Vec<Card>>,
    /// Вид tới trắng, если партия закончилась им.
    pub instant_win: Option<InstantWinType>,
    pub rounds_played: u32,
    pub cong: CongPenaltyResult,
    /// `None` в tới trắng, если thúi там не начисляется.
    pub thui: Option<ThuiPenaltyResult>,
    pub den_bai: DenBaiResult,
    pub penalties: GamePenaltyState,
    pub scores: GameScoreResult,
}

impl GameOutcome {
    pub fn is_instant_win(&self) -> bool {
        self.instant_win.is_some()
    }

    pub fn score_of(&self, seat: SeatIndex) -> Points {
        self.scores.total_of(seat)
    }

    /// Место về bét.
    pub fn ve_bet(&self) -> Option<SeatIndex> {
        self.finishing_order.last().copied()
    }
}
