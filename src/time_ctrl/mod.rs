// src/time_ctrl/mod.rs
//! Контроль времени хода.
//!
//! Здесь собираем:
//! - правила (`TurnTimeRules`);
//! - таймер хода (`TurnClock`);
//! - `check_timeout`, который подсказывает хосту, что пора сделать авто-действие.

pub mod clock;
pub mod time_rules;

pub use clock::TurnClock;
pub use time_rules::{TimeProfile, TurnTimeRules, DEFAULT_TURN_TIMEOUT_MS};

use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;
use crate::engine::positions::TurnOrderState;

/// Что хосту нужно сделать по таймеру.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AutoActionDecision {
    /// Время не вышло (или таймер не запущен).
    None,
    /// Время вышло. Если `must_lead`, место ведёт круг и пасовать не может:
    /// хост должен сыграть за него; иначе достаточно паса.
    TimedOut { seat: SeatIndex, must_lead: bool },
}

/// Проверить таймаут текущего хода.
pub fn check_timeout(
    turn: &TurnOrderState,
    rules: &TurnTimeRules,
    now_ms: u64,
    must_lead: bool,
) -> AutoActionDecision {
    match TurnClock::for_turn(turn, rules) {
        Some(clock) if clock.is_timed_out(now_ms) => AutoActionDecision::TimedOut {
            seat: clock.seat,
            must_lead,
        },
        _ => AutoActionDecision::None,
    }
}
