//! Итог партии по местам.

use serde::{Deserialize, Serialize};

use crate::domain::points::Points;
use crate::domain::seat::SeatState;
use crate::domain::SeatIndex;

use super::penalties::{
    toi_trang_amount, CongPenaltyResult, DenBaiResult, GamePenaltyState, ThuiPenaltyResult,
};

/// Разбивка счёта одного места за партию.
///
/// Каждая составляющая = получено − отдано, поэтому сумма по всем местам 0.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatScore {
    pub seat: SeatIndex,
    pub remaining_cards: u32,
    pub cards: Points,
    pub cong: Points,
    pub chat: Points,
    pub thui: Points,
    pub den_bai: Points,
    pub instant_win: Points,
    pub total: Points,
}

impl SeatScore {
    fn new(seat: SeatIndex) -> Self {
        Self {
            seat,
            ..Self::default()
        }
    }

    fn finish(mut self) -> Self {
        self.total =
            self.cards + self.cong + self.chat + self.thui + self.den_bai + self.instant_win;
        self
    }
}

/// Итог партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameScoreResult {
    pub winner: SeatIndex,
    pub instant_win: bool,
    pub seats: Vec<SeatScore>,
}

impl GameScoreResult {
    pub fn total_of(&self, seat: SeatIndex) -> Points {
        self.seats
            .get(seat as usize)
            .map_or(Points::ZERO, |s| s.total)
    }

    pub fn totals(&self) -> Vec<Points> {
        self.seats.iter().map(|s| s.total).collect()
    }

    /// Сумма по всем местам равна нулю.
    pub fn is_zero_sum(&self) -> bool {
        self.seats.iter().map(|s| s.total).sum::<Points>().is_zero()
    }
}

/// Порядок мест по итогам партии.
///
/// Победитель первый; остальные по возрастанию оставшихся карт, при
/// равенстве раньше тот, кто ходит раньше после победителя.
pub fn finishing_order(seats: &[SeatState], winner: SeatIndex) -> Vec<SeatIndex> {
    let n = seats.len();
    let mut others: Vec<(usize, usize, SeatIndex)> = seats
        .iter()
        .filter(|s| s.seat != winner)
        .map(|s| {
            let distance = (s.seat as usize + n - winner as usize) % n.max(1);
            (s.remaining(), distance, s.seat)
        })
        .collect();
    others.sort();

    let mut order = Vec::with_capacity(n);
    order.push(winner);
    order.extend(others.into_iter().map(|(_, _, seat)| seat));
    order
}

/// Счёт обычной партии.
pub fn calculate_game_scores(
    seats: &[SeatState],
    winner: SeatIndex,
    penalties: &GamePenaltyState,
    cong: &CongPenaltyResult,
    thui: &ThuiPenaltyResult,
    den_bai: &DenBaiResult,
) -> GameScoreResult {
    let mut scores: Vec<SeatScore> = seats.iter().map(|s| SeatScore::new(s.seat)).collect();

    for seat in seats {
        let remaining = seat.remaining() as u32;
        let score = &mut scores[seat.seat as usize];
        score.remaining_cards = remaining;
        score.chat = penalties.received(seat.seat) - penalties.paid(seat.seat);

        if seat.seat == winner {
            continue;
        }
        let cards = Points(remaining as i32);
        score.cards -= cards;
        scores[winner as usize].cards += cards;

        let cong_penalty = cong.penalty_of(seat.seat);
        scores[seat.seat as usize].cong -= cong_penalty;
        scores[winner as usize].cong += cong_penalty;
    }

    if !thui.is_empty() {
        scores[thui.payer as usize].thui -= thui.total;
        scores[thui.receiver as usize].thui += thui.total;
    }

    if let (true, Some(payer), Some(receiver)) = (den_bai.applies, den_bai.payer, den_bai.receiver) {
        scores[payer as usize].den_bai -= den_bai.amount;
        scores[receiver as usize].den_bai += den_bai.amount;
    }

    GameScoreResult {
        winner,
        instant_win: false,
        seats: scores.into_iter().map(SeatScore::finish).collect(),
    }
}

/// Счёт партии, закончившейся tới trắng.
///
/// Карты, cóng и chặt не считаются; каждый проигравший платит 13 × n,
/// thúi добавляется, если передан.
pub fn calculate_instant_win_scores(
    num_players: usize,
    winner: SeatIndex,
    remaining_cards: &[u32],
    thui: Option<&ThuiPenaltyResult>,
) -> GameScoreResult {
    let amount = toi_trang_amount(num_players);
    let mut scores: Vec<SeatScore> = (0..num_players)
        .map(|i| {
            let mut s = SeatScore::new(i as SeatIndex);
            s.remaining_cards = remaining_cards.get(i).copied().unwrap_or(0);
            s
        })
        .collect();

    for seat in 0..num_players {
        if seat == winner as usize {
            continue;
        }
        scores[seat].instant_win -= amount;
        scores[winner as usize].instant_win += amount;
    }

    if let Some(thui) = thui.filter(|t| !t.is_empty()) {
        scores[thui.payer as usize].thui -= thui.total;
        scores[thui.receiver as usize].thui += thui.total;
    }

    GameScoreResult {
        winner,
        instant_win: true,
        seats: scores.into_iter().map(SeatScore::finish).collect(),
    }
}
