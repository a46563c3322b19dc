// src/domain/session.rs
//! Сессия: фиксированная серия из 16 или 32 партий с накопительным счётом.

use serde::{Deserialize, Serialize};

use crate::domain::points::Points;
use crate::domain::{validate_player_count, validate_session_length, SeatIndex};
use crate::engine::EngineError;
use crate::scoring::GameScoreResult;

/// Накопленный счёт сессии.
///
/// `game_scores[seat]` – итог каждой сыгранной партии для места,
/// `totals[seat]` – их сумма.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionScoreState {
    pub num_players: u8,
    pub total_games: u32,
    pub game_scores: Vec<Vec<Points>>,
    pub totals: Vec<Points>,
}

/// Строка итоговой таблицы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStanding {
    /// Место в итоговой таблице, начиная с 1.
    pub place: u8,
    pub seat: SeatIndex,
    pub total: Points,
}

impl SessionScoreState {
    pub fn games_played(&self) -> u32 {
        self.game_scores.first().map_or(0, |g| g.len() as u32)
    }

    pub fn remaining_games(&self) -> u32 {
        self.total_games.saturating_sub(self.games_played())
    }

    pub fn is_complete(&self) -> bool {
        self.games_played() >= self.total_games
    }

    pub fn total_of(&self, seat: SeatIndex) -> Option<Points> {
        self.totals.get(seat as usize).copied()
    }
}

/// Начать сессию.
pub fn create_session(num_players: u8, total_games: u32) -> Result<SessionScoreState, EngineError> {
    validate_player_count(num_players as usize)?;
    validate_session_length(total_games)?;

    let n = num_players as usize;
    Ok(SessionScoreState {
        num_players,
        total_games,
        game_scores: vec![Vec::with_capacity(total_games as usize); n],
        totals: vec![Points::ZERO; n],
    })
}

/// Добавить итоги одной партии (по одному значению на место).
pub fn record_game_scores(
    state: &SessionScoreState,
    scores: &[Points],
) -> Result<SessionScoreState, EngineError> {
    if state.is_complete() {
        return Err(EngineError::SessionComplete {
            total_games: state.total_games,
        });
    }
    let expected = state.num_players as usize;
    if scores.len() != expected {
        return Err(EngineError::ScoreCountMismatch {
            expected,
            actual: scores.len(),
        });
    }

    let mut next = state.clone();
    for (seat, score) in scores.iter().enumerate() {
        next.game_scores[seat].push(*score);
        next.totals[seat] += *score;
    }
    Ok(next)
}

/// Добавить итоги партии из `GameScoreResult`.
pub fn record_game_result(
    state: &SessionScoreState,
    result: &GameScoreResult,
) -> Result<SessionScoreState, EngineError> {
    let scores: Vec<Points> = result.seats.iter().map(|s| s.total).collect();
    record_game_scores(state, &scores)
}

/// Итоговая таблица: по убыванию суммы, при равенстве выше младшее место.
pub fn final_ranking(state: &SessionScoreState) -> Vec<SessionStanding> {
    let mut seats: Vec<(SeatIndex, Points)> = state
        .totals
        .iter()
        .enumerate()
        .map(|(i, total)| (i as SeatIndex, *total))
        .collect();
    seats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    seats
        .into_iter()
        .enumerate()
        .map(|(i, (seat, total))| SessionStanding {
            place: (i + 1) as u8,
            seat,
            total,
        })
        .collect()
}
