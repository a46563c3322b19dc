//! Состояние круга: пасы, последняя комбинация, решение о конце круга.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::combination::CardCombination;
use crate::domain::{validate_seat, SeatIndex};
use crate::engine::positions::next_seat;
use crate::engine::EngineError;

/// Состояние одного круга. На переходе заменяется новым, номер растёт.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    pub round_number: u32,
    pub last_play: Option<CardCombination>,
    pub last_player_index: Option<SeatIndex>,
    /// Кто пасовал в этом круге (до конца круга).
    pub passed_players: BTreeSet<SeatIndex>,
    /// Места в порядке их пасов.
    pub pass_order: Vec<SeatIndex>,
    pub round_winner: Option<SeatIndex>,
    pub first_player_index: SeatIndex,
    pub num_players: u8,
}

/// Почему круг закончился.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundEndReason {
    /// Место выложило последнюю карту: конец круга и партии.
    PlayerFinished,
    /// Три паса подряд по очереди ходов.
    ThreeConsecutivePasses,
    /// Спасовали все, кроме одного.
    AllOthersPassed,
}

/// Решение о конце круга.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoundEndDecision {
    pub ended: bool,
    pub reason: Option<RoundEndReason>,
    pub winner: Option<SeatIndex>,
    /// Кто начнёт следующий круг. `None`, если закончилась партия.
    pub next_leader: Option<SeatIndex>,
}

impl RoundEndDecision {
    pub const CONTINUE: RoundEndDecision = RoundEndDecision {
        ended: false,
        reason: None,
        winner: None,
        next_leader: None,
    };

    pub fn is_game_over(&self) -> bool {
        self.reason == Some(RoundEndReason::PlayerFinished)
    }
}

pub fn create_round_state(round_number: u32, first_player_index: SeatIndex, num_players: u8) -> RoundState {
    RoundState {
        round_number,
        last_play: None,
        last_player_index: None,
        passed_players: BTreeSet::new(),
        pass_order: Vec::new(),
        round_winner: None,
        first_player_index,
        num_players,
    }
}

/// Записать сыгранную комбинацию.
pub fn record_play(
    state: &RoundState,
    seat: SeatIndex,
    combination: CardCombination,
) -> Result<RoundState, EngineError> {
    validate_seat(seat as usize, state.num_players as usize)?;
    Ok(RoundState {
        last_play: Some(combination),
        last_player_index: Some(seat),
        ..state.clone()
    })
}

/// Записать пас. Повторный пас в том же круге – ошибка.
pub fn record_pass(state: &RoundState, seat: SeatIndex) -> Result<RoundState, EngineError> {
    validate_seat(seat as usize, state.num_players as usize)?;
    if state.passed_players.contains(&seat) {
        return Err(EngineError::AlreadyPassed {
            seat,
            round: state.round_number,
        });
    }
    let mut next = state.clone();
    next.passed_players.insert(seat);
    next.pass_order.push(seat);
    Ok(next)
}

/// Три последних паса идут строго друг за другом по очереди ходов.
pub fn passes_are_turn_order_adjacent(pass_order: &[SeatIndex], num_players: u8) -> bool {
    pass_order.len() == 3
        && pass_order
            .windows(2)
            .all(|w| w[1] == next_seat(w[0], num_players))
}

/// Победитель круга: последний сыгравший, иначе начинавший круг.
pub fn round_winner(state: &RoundState) -> SeatIndex {
    state.last_player_index.unwrap_or(state.first_player_index)
}

/// Решить, закончился ли круг после действия места `acting_seat`.
///
/// Порядок проверок важен, срабатывает первая.
pub fn check_round_end(state: &RoundState, acting_seat: SeatIndex, hand_empty: bool) -> RoundEndDecision {
    if hand_empty {
        return RoundEndDecision {
            ended: true,
            reason: Some(RoundEndReason::PlayerFinished),
            winner: Some(acting_seat),
            next_leader: None,
        };
    }

    let reason = if passes_are_turn_order_adjacent(&state.pass_order, state.num_players) {
        RoundEndReason::ThreeConsecutivePasses
    } else if state.passed_players.len() + 1 == state.num_players as usize {
        RoundEndReason::AllOthersPassed
    } else {
        return RoundEndDecision::CONTINUE;
    };

    let winner = round_winner(state);
    RoundEndDecision {
        ended: true,
        reason: Some(reason),
        winner: Some(winner),
        next_leader: Some(next_seat(winner, state.num_players)),
    }
}

/// Новый круг после победы `winner`: начинает место справа от победителя.
pub fn transition_round(state: &RoundState, winner: SeatIndex) -> RoundState {
    let leader = next_seat(winner, state.num_players);
    create_round_state(state.round_number + 1, leader, state.num_players)
}
