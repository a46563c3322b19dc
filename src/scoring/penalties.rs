//! Штрафы партии: chặt, cóng, đền bài, thúi.
//!
//! Все функции чистые: принимают состояние/руки и возвращают новый
//! результат, ничего не мутируя.

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::combination::CardCombination;
use crate::domain::points::Points;
use crate::domain::seat::SeatState;
use crate::domain::{SeatIndex, HAND_SIZE};
use crate::eval::find_hang_in_hand;

/// Фиксированная цена chặt любой hàng и одной hàng в thúi.
pub const HANG_PENALTY: i32 = 4;

/// Максимум одиночных heo подряд, учитываемых в chặt.
pub const MAX_TRACKED_HEO: usize = 4;

/// Сколько место отдало и получило штрафов за партию.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPenalties {
    pub penalties_paid: Points,
    pub penalties_received: Points,
}

impl PlayerPenalties {
    pub fn net(&self) -> Points {
        self.penalties_received - self.penalties_paid
    }
}

/// Штрафы chặt, накопленные за партию (по одному элементу на место).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GamePenaltyState {
    pub players: Vec<PlayerPenalties>,
}

impl GamePenaltyState {
    pub fn new(num_players: usize) -> Self {
        Self {
            players: vec![PlayerPenalties::default(); num_players],
        }
    }

    /// Новое состояние с переводом `amount` от `payer` к `receiver`.
    pub fn with_transfer(&self, payer: SeatIndex, receiver: SeatIndex, amount: Points) -> Self {
        let mut next = self.clone();
        if let Some(p) = next.players.get_mut(payer as usize) {
            p.penalties_paid += amount;
        }
        if let Some(r) = next.players.get_mut(receiver as usize) {
            r.penalties_received += amount;
        }
        next
    }

    pub fn paid(&self, seat: SeatIndex) -> Points {
        self.players
            .get(seat as usize)
            .map_or(Points::ZERO, |p| p.penalties_paid)
    }

    pub fn received(&self, seat: SeatIndex) -> Points {
        self.players
            .get(seat as usize)
            .map_or(Points::ZERO, |p| p.penalties_received)
    }
}

/// Штраф за chặt комбинации `defence`.
///
/// `tracked_heo` – одиночные heo, сыгранные подряд в этом круге
/// (из `SingleHeoTrackingState`). Пара heo стоит сумму обеих карт,
/// любая hàng фиксированно `HANG_PENALTY`. Остальное не штрафуется.
pub fn calculate_chat_penalty(defence: &CardCombination, tracked_heo: &[Card]) -> Points {
    if defence.is_single_heo() {
        let heo: Vec<Card> = if tracked_heo.is_empty() {
            defence.cards.clone()
        } else {
            tracked_heo.iter().rev().take(MAX_TRACKED_HEO).copied().collect()
        };
        return heo_chat_points(&heo);
    }
    if defence.is_heo_pair() {
        return heo_chat_points(&defence.cards);
    }
    if defence.is_hang() {
        return Points(HANG_PENALTY);
    }
    Points::ZERO
}

fn heo_chat_points(cards: &[Card]) -> Points {
    cards.iter().map(|c| Points(c.heo_chat_value() as i32)).sum()
}

/// Штраф "tới trắng": 13 × число игроков.
pub fn toi_trang_amount(num_players: usize) -> Points {
    Points((HAND_SIZE * num_players) as i32)
}

/// Результат подсчёта cóng.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CongPenaltyResult {
    /// Места, не сыгравшие за партию ни одной карты (кроме победителя).
    pub cong_seats: Vec<SeatIndex>,
    pub penalty_per_seat: Points,
    pub total: Points,
}

impl CongPenaltyResult {
    pub fn is_cong(&self, seat: SeatIndex) -> bool {
        self.cong_seats.contains(&seat)
    }

    pub fn penalty_of(&self, seat: SeatIndex) -> Points {
        if self.is_cong(seat) {
            self.penalty_per_seat
        } else {
            Points::ZERO
        }
    }
}

/// Найти cóng: каждое непобедившее место без сыгранных карт платит 13 × n.
pub fn calculate_cong_penalties(seats: &[SeatState], winner: SeatIndex) -> CongPenaltyResult {
    let penalty_per_seat = toi_trang_amount(seats.len());
    let cong_seats: Vec<SeatIndex> = seats
        .iter()
        .filter(|s| s.seat != winner && !s.has_played())
        .map(|s| s.seat)
        .take(seats.len().saturating_sub(1))
        .collect();
    let total = penalty_per_seat * cong_seats.len() as i32;

    CongPenaltyResult {
        cong_seats,
        penalty_per_seat,
        total,
    }
}

/// Данные о том, был ли у места законный ход, от которого оно отказалось.
///
/// Сам движок такого учёта не ведёт; данные может передать оркестратор.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DenBaiEvidence {
    pub seat: SeatIndex,
    pub had_legal_move_and_passed: bool,
}

/// Результат đền bài.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DenBaiResult {
    pub applies: bool,
    pub payer: Option<SeatIndex>,
    pub receiver: Option<SeatIndex>,
    pub amount: Points,
}

impl DenBaiResult {
    pub const NONE: DenBaiResult = DenBaiResult {
        applies: false,
        payer: None,
        receiver: None,
        amount: Points::ZERO,
    };
}

/// Đền bài: только 4 игрока и ровно 3 cóng. Оставшееся непобедившее место,
/// у которого был ход и которое спасовало, платит победителю сумму
/// всех трёх cóng сверх самих cóng.
///
/// Без `evidence` đền bài не применяется.
pub fn calculate_den_bai(
    cong: &CongPenaltyResult,
    winner: SeatIndex,
    num_players: usize,
    evidence: Option<&DenBaiEvidence>,
) -> DenBaiResult {
    if num_players != 4 || cong.cong_seats.len() != 3 {
        return DenBaiResult::NONE;
    }
    let Some(evidence) = evidence else {
        return DenBaiResult::NONE;
    };
    if !evidence.had_legal_move_and_passed
        || evidence.seat == winner
        || evidence.seat as usize >= num_players
    {
        return DenBaiResult::NONE;
    }

    DenBaiResult {
        applies: true,
        payer: Some(evidence.seat),
        receiver: Some(winner),
        amount: cong.total,
    }
}

/// Результат thúi для места về bét.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThuiPenaltyResult {
    pub payer: SeatIndex,
    pub receiver: SeatIndex,
    /// Оставшиеся на руке heo.
    pub heo_cards: Vec<Card>,
    /// Оставшиеся hàng (без heo, непересекающиеся).
    pub hang: Vec<CardCombination>,
    pub heo_points: Points,
    pub hang_points: Points,
    pub total: Points,
}

impl ThuiPenaltyResult {
    pub fn is_empty(&self) -> bool {
        self.total.is_zero()
    }
}

/// Посчитать thúi по руке места về bét.
///
/// heo считаются по chặt-стоимости, каждая hàng стоит `HANG_PENALTY`.
/// Hàng ищется среди не-heo карт, поэтому heo не учитываются дважды:
/// tứ quý двоек стоит сумму своих heo (6), а не `HANG_PENALTY`.
pub fn calculate_thui(hand: &[Card], payer: SeatIndex, receiver: SeatIndex) -> ThuiPenaltyResult {
    let heo_cards: Vec<Card> = hand.iter().filter(|c| c.is_heo()).copied().collect();
    let rest: Vec<Card> = hand.iter().filter(|c| !c.is_heo()).copied().collect();
    let hang = find_hang_in_hand(&rest);

    let heo_points = heo_chat_points(&heo_cards);
    let hang_points = Points(HANG_PENALTY * hang.len() as i32);

    ThuiPenaltyResult {
        payer,
        receiver,
        heo_cards,
        hang,
        heo_points,
        hang_points,
        total: heo_points + hang_points,
    }
}

/// Кто получает thúi.
///
/// Победитель, если партия закончилась tới trắng или về bét сам cóng;
/// иначе место, финишировавшее сразу над về bét.
pub fn thui_receiver(
    finishing_order: &[SeatIndex],
    winner: SeatIndex,
    instant_win: bool,
    ve_bet_is_cong: bool,
) -> SeatIndex {
    if instant_win || ve_bet_is_cong || finishing_order.len() < 2 {
        return winner;
    }
    finishing_order[finishing_order.len() - 2]
}
