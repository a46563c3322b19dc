use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::table::TableConfig;
use crate::domain::{SeatIndex, SessionId, TableId};
use crate::engine::{GameEventKind, GameStatus, PlayerAction, RandomSource, TableManager};

use super::dto::OutboundEvent;
use super::errors::ApiError;
use super::queries::{build_game_view, build_session_standings};

/// Команда верхнего уровня: всё, что меняет состояние столов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Создать новый стол.
    CreateTable(TableConfig),

    /// Начать сессию (16/32 партий) на столе.
    StartSession { table_id: TableId },

    /// Раздать и начать следующую партию сессии.
    StartGame { table_id: TableId },

    /// Выложить карты. Карты передаются кодами ("3s", "10h").
    SubmitCombination {
        table_id: TableId,
        seat: SeatIndex,
        cards: Vec<String>,
    },

    /// Пас.
    Pass { table_id: TableId, seat: SeatIndex },
}

/// Результат команды: затронутый стол и события для рассылки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandResponse {
    pub table_id: TableId,
    pub session_id: Option<SessionId>,
    pub events: Vec<OutboundEvent>,
}

/// Выполнить команду против менеджера столов.
///
/// При ошибке менеджер не меняется (кроме счётчиков ID).
pub fn execute_command<R: RandomSource>(
    manager: &mut TableManager,
    rng: &mut R,
    command: Command,
    now_ms: u64,
) -> Result<CommandResponse, ApiError> {
    match command {
        Command::CreateTable(config) => {
            let table_id = manager.create_table(config)?;
            Ok(CommandResponse {
                table_id,
                session_id: None,
                events: Vec::new(),
            })
        }
        Command::StartSession { table_id } => {
            let session_id = manager.start_session(table_id)?;
            Ok(CommandResponse {
                table_id,
                session_id: Some(session_id),
                events: Vec::new(),
            })
        }
        Command::StartGame { table_id } => {
            let status = manager.start_game(table_id, rng, now_ms)?;
            Ok(respond(manager, table_id, &status, 0))
        }
        Command::SubmitCombination {
            table_id,
            seat,
            cards,
        } => {
            let cards = parse_card_codes(&cards)?;
            let before = history_len(manager, table_id);
            let status = manager.apply_action(table_id, PlayerAction::play(seat, cards), now_ms)?;
            Ok(respond(manager, table_id, &status, before))
        }
        Command::Pass { table_id, seat } => {
            let before = history_len(manager, table_id);
            let status = manager.apply_action(table_id, PlayerAction::pass(seat), now_ms)?;
            Ok(respond(manager, table_id, &status, before))
        }
    }
}

/// Разобрать коды карт ("3s", "10h", "Td").
pub fn parse_card_codes(codes: &[String]) -> Result<Vec<Card>, ApiError> {
    codes
        .iter()
        .map(|code| code.parse::<Card>().map_err(ApiError::BadRequest))
        .collect()
}

fn history_len(manager: &TableManager, table_id: TableId) -> usize {
    manager.game(table_id).map_or(0, |g| g.history.len())
}

/// События после перехода: новые конец круга, состояние, чей ход, конец партии/сессии.
fn respond(
    manager: &TableManager,
    table_id: TableId,
    status: &GameStatus,
    history_before: usize,
) -> CommandResponse {
    let mut events = Vec::new();

    if let Some(game) = manager.game(table_id) {
        for event in game.history.events.iter().skip(history_before) {
            if let GameEventKind::RoundEnded {
                round,
                winner,
                next_leader,
                ..
            } = &event.kind
            {
                events.push(OutboundEvent::RoundEnded {
                    table_id,
                    round: *round,
                    winner: *winner,
                    next_leader: *next_leader,
                });
            }
        }

        events.push(OutboundEvent::GameStateUpdate(build_game_view(table_id, game, None)));

        if let (GameStatus::InProgress, Some(started_at_ms)) = (status, game.turn.turn_start_time) {
            events.push(OutboundEvent::TurnStarted {
                table_id,
                seat: game.current_seat(),
                started_at_ms,
                timeout_ms: manager
                    .config(table_id)
                    .map_or(0, |c| c.time.turn_timeout_ms),
            });
        }
    }

    if let GameStatus::Finished(outcome) = status {
        events.push(OutboundEvent::GameEnded {
            table_id,
            outcome: outcome.clone(),
        });
        if let Ok(standings) = build_session_standings(manager, table_id) {
            if standings.complete {
                events.push(OutboundEvent::SessionEnded(standings));
            }
        }
    }

    CommandResponse {
        table_id,
        session_id: manager.session_id(table_id),
        events,
    }
}
