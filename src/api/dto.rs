use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::combination::CardCombination;
use crate::domain::game::GameOutcome;
use crate::domain::session::SessionStanding;
use crate::domain::{GameId, SeatIndex, SessionId, TableId};

/// DTO места в партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatViewDto {
    pub seat: SeatIndex,
    pub cards_left: u32,
    pub cards_played: u32,
    pub has_passed: bool,
    /// Карты на руке – только для "героя".
    pub cards: Option<Vec<Card>>,
}

/// DTO партии с точки зрения одного места (или зрителя).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameViewDto {
    pub table_id: TableId,
    pub game_id: GameId,
    pub round_number: u32,
    pub current_seat: Option<SeatIndex>,
    /// Текущее место ведёт круг и не может пасовать.
    pub is_leading: bool,
    pub last_play: Option<CardCombination>,
    pub last_player: Option<SeatIndex>,
    pub seats: Vec<SeatViewDto>,
    pub finished: bool,
    pub winner: Option<SeatIndex>,
    /// Законные ходы героя (если сейчас его ход).
    pub legal_plays: Vec<CardCombination>,
}

/// Таблица сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStandingsDto {
    pub table_id: TableId,
    pub session_id: Option<SessionId>,
    pub games_played: u32,
    pub total_games: u32,
    pub complete: bool,
    pub standings: Vec<SessionStanding>,
}

/// Краткая информация о столе (для лобби).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableSummaryDto {
    pub table_id: TableId,
    pub name: String,
    pub num_players: u8,
    pub session_games: u32,
    pub game_in_progress: bool,
}

/// События, которые оркестратор рассылает по своему транспорту.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum OutboundEvent {
    /// Публичное состояние партии (без чужих карт).
    GameStateUpdate(GameViewDto),
    TurnStarted {
        table_id: TableId,
        seat: SeatIndex,
        started_at_ms: u64,
        timeout_ms: u64,
    },
    RoundEnded {
        table_id: TableId,
        round: u32,
        winner: SeatIndex,
        next_leader: Option<SeatIndex>,
    },
    GameEnded {
        table_id: TableId,
        outcome: Box<GameOutcome>,
    },
    SessionEnded(SessionStandingsDto),
}

impl OutboundEvent {
    /// Имя события на проводе.
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::GameStateUpdate(_) => "game-state-update",
            OutboundEvent::TurnStarted { .. } => "turn-started",
            OutboundEvent::RoundEnded { .. } => "round-ended",
            OutboundEvent::GameEnded { .. } => "game-ended",
            OutboundEvent::SessionEnded(_) => "session-ended",
        }
    }
}
