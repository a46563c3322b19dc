use serde::{Deserialize, Serialize};

use crate::domain::game::GameOutcome;
use crate::domain::session::final_ranking;
use crate::domain::{SeatIndex, TableId};
use crate::engine::{legal_plays, GameState, TableManager};

use super::dto::{GameViewDto, SeatViewDto, SessionStandingsDto, TableSummaryDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Состояние партии глазами места `seat` (или зрителя, если `None`).
    GetGame {
        table_id: TableId,
        seat: Option<SeatIndex>,
    },

    /// Таблица текущей сессии.
    GetSession { table_id: TableId },

    /// Итог последней завершённой партии.
    GetLastOutcome { table_id: TableId },

    /// Список столов (для лобби).
    ListTables,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Game(GameViewDto),
    Session(SessionStandingsDto),
    Outcome(Box<GameOutcome>),
    Tables(Vec<TableSummaryDto>),
}

/// Выполнить запрос против менеджера столов.
pub fn execute_query(manager: &TableManager, query: Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetGame { table_id, seat } => {
            ensure_table(manager, table_id)?;
            let game = manager.game(table_id).ok_or_else(|| {
                ApiError::InvalidCommand(format!("table {table_id} has no game"))
            })?;
            Ok(QueryResponse::Game(build_game_view(table_id, game, seat)))
        }
        Query::GetSession { table_id } => {
            ensure_table(manager, table_id)?;
            build_session_standings(manager, table_id).map(QueryResponse::Session)
        }
        Query::GetLastOutcome { table_id } => {
            ensure_table(manager, table_id)?;
            manager
                .last_outcome(table_id)
                .map(|o| QueryResponse::Outcome(Box::new(o.clone())))
                .ok_or_else(|| {
                    ApiError::InvalidCommand(format!("table {table_id} has no finished game"))
                })
        }
        Query::ListTables => Ok(QueryResponse::Tables(
            manager
                .table_ids()
                .into_iter()
                .filter_map(|id| {
                    manager.config(id).map(|config| TableSummaryDto {
                        table_id: id,
                        name: config.name.clone(),
                        num_players: config.num_players,
                        session_games: config.session_games,
                        game_in_progress: manager.has_active_game(id),
                    })
                })
                .collect(),
        )),
    }
}

fn ensure_table(manager: &TableManager, table_id: TableId) -> Result<(), ApiError> {
    if manager.has_table(table_id) {
        Ok(())
    } else {
        Err(ApiError::TableNotFound(table_id))
    }
}

/// Сформировать DTO партии. Карты показываем только герою `hero`.
pub fn build_game_view(table_id: TableId, game: &GameState, hero: Option<SeatIndex>) -> GameViewDto {
    let seats = game
        .seats
        .iter()
        .map(|s| SeatViewDto {
            seat: s.seat,
            cards_left: s.remaining() as u32,
            cards_played: s.cards_played,
            has_passed: game.round.passed_players.contains(&s.seat),
            cards: (hero == Some(s.seat)).then(|| s.hand.clone()),
        })
        .collect();

    let legal = hero.map(|seat| legal_plays(game, seat)).unwrap_or_default();

    GameViewDto {
        table_id,
        game_id: game.game_id,
        round_number: game.round.round_number,
        current_seat: (!game.finished).then(|| game.current_seat()),
        is_leading: game.is_leading(),
        last_play: game.round.last_play.clone(),
        last_player: game.round.last_player_index,
        seats,
        finished: game.finished,
        winner: game.winner,
        legal_plays: legal,
    }
}

/// Таблица сессии стола.
pub fn build_session_standings(
    manager: &TableManager,
    table_id: TableId,
) -> Result<SessionStandingsDto, ApiError> {
    let session = manager.session(table_id).ok_or_else(|| {
        ApiError::InvalidCommand(format!("table {table_id} has no session"))
    })?;
    Ok(SessionStandingsDto {
        table_id,
        session_id: manager.session_id(table_id),
        games_played: session.games_played(),
        total_games: session.total_games,
        complete: session.is_complete(),
        standings: final_ranking(session),
    })
}
