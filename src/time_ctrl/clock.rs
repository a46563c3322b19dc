// src/time_ctrl/clock.rs
//! Таймер хода текущего места.
//!
//! Таймер только отвечает на вопросы "вышло ли время" и "сколько осталось".
//! Сам он ничего не делает: пас/ход по таймауту присылает хост.

use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;
use crate::engine::positions::TurnOrderState;

use super::TurnTimeRules;

/// Состояние таймера текущего хода.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnClock {
    pub seat: SeatIndex,
    /// Когда начался ход (Unix ms).
    pub started_at_ms: u64,
    pub timeout_ms: u64,
}

impl TurnClock {
    pub fn start(seat: SeatIndex, now_ms: u64, rules: &TurnTimeRules) -> Self {
        Self {
            seat,
            started_at_ms: now_ms,
            timeout_ms: rules.turn_timeout_ms,
        }
    }

    /// Таймер текущего хода; `None`, если ход ещё не запускали.
    pub fn for_turn(turn: &TurnOrderState, rules: &TurnTimeRules) -> Option<Self> {
        turn.turn_start_time
            .map(|started| Self::start(turn.current_player_index, started, rules))
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.timeout_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    pub fn is_timed_out(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) >= self.timeout_ms
    }
}
