// src/engine/table_manager.rs

use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::card::Card;
use crate::domain::game::GameOutcome;
use crate::domain::session::{create_session, record_game_result, SessionScoreState};
use crate::domain::table::TableConfig;
use crate::domain::{SeatIndex, SessionId, TableId};
use crate::engine::game_loop::{self, GameSetup, GameState, GameStatus};
use crate::engine::{EngineError, PlayerAction, RandomSource};
use crate::infra::IdGenerator;
use crate::time_ctrl::AutoActionDecision;

/// Ошибки уровня менеджера столов (над движком одной партии).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error("На столе {0} не запущена сессия")]
    NoActiveSession(TableId),

    #[error("На столе {0} нет активной партии")]
    NoActiveGame(TableId),

    #[error("На столе {0} партия ещё идёт")]
    GameInProgress(TableId),

    #[error("Сессия на столе {0} уже сыграна")]
    SessionComplete(TableId),

    /// Проброшенная ошибка из движка (EngineError).
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Внутренний объект: один стол, его сессия и текущая партия.
#[derive(Debug)]
struct ManagedTable {
    config: TableConfig,
    session_id: Option<SessionId>,
    session: Option<SessionScoreState>,
    game: Option<GameState>,
    last_outcome: Option<GameOutcome>,
}

impl ManagedTable {
    fn new(config: TableConfig) -> Self {
        Self {
            config,
            session_id: None,
            session: None,
            game: None,
            last_outcome: None,
        }
    }

    fn game_in_progress(&self) -> bool {
        self.game.as_ref().is_some_and(|g| !g.finished)
    }
}

/// Менеджер столов:
/// - хранит несколько независимых столов по TableId;
/// - на каждом столе сессия (16/32 партий) и текущая партия;
/// - завершённые партии сам добавляет в счёт сессии.
#[derive(Debug, Default)]
pub struct TableManager {
    tables: HashMap<TableId, ManagedTable>,
    ids: IdGenerator,
}

impl TableManager {
    /// Создать пустой менеджер.
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            ids: IdGenerator::new(),
        }
    }

    /// Создать стол по конфигу. ID выдаёт `IdGenerator`.
    pub fn create_table(&mut self, config: TableConfig) -> Result<TableId, ManagerError> {
        config.validate()?;
        let id = self.ids.next_table_id();
        info!(table_id = id, name = %config.name, num_players = config.num_players, "Table created");
        self.tables.insert(id, ManagedTable::new(config));
        Ok(id)
    }

    /// Есть ли стол с таким id.
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.tables.contains_key(&table_id)
    }

    pub fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self.tables.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn config(&self, table_id: TableId) -> Option<&TableConfig> {
        self.tables.get(&table_id).map(|mt| &mt.config)
    }

    /// Текущая (или последняя завершённая) партия стола.
    pub fn game(&self, table_id: TableId) -> Option<&GameState> {
        self.tables.get(&table_id).and_then(|mt| mt.game.as_ref())
    }

    pub fn session(&self, table_id: TableId) -> Option<&SessionScoreState> {
        self.tables.get(&table_id).and_then(|mt| mt.session.as_ref())
    }

    pub fn session_id(&self, table_id: TableId) -> Option<SessionId> {
        self.tables.get(&table_id).and_then(|mt| mt.session_id)
    }

    pub fn last_outcome(&self, table_id: TableId) -> Option<&GameOutcome> {
        self.tables
            .get(&table_id)
            .and_then(|mt| mt.last_outcome.as_ref())
    }

    /// Есть ли на столе незавершённая партия.
    pub fn has_active_game(&self, table_id: TableId) -> bool {
        self.tables
            .get(&table_id)
            .is_some_and(ManagedTable::game_in_progress)
    }

    /// Чей сейчас ход на столе (если партия идёт).
    pub fn current_seat(&self, table_id: TableId) -> Option<SeatIndex> {
        self.tables
            .get(&table_id)
            .filter(|mt| mt.game_in_progress())
            .and_then(|mt| mt.game.as_ref())
            .map(GameState::current_seat)
    }

    /// Начать новую сессию на столе (старая отбрасывается).
    pub fn start_session(&mut self, table_id: TableId) -> Result<SessionId, ManagerError> {
        let mt = self
            .tables
            .get_mut(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;
        if mt.game_in_progress() {
            return Err(ManagerError::GameInProgress(table_id));
        }

        let session = create_session(mt.config.num_players, mt.config.session_games)?;
        let session_id = self.ids.next_session_id();
        mt.session = Some(session);
        mt.session_id = Some(session_id);
        mt.game = None;
        mt.last_outcome = None;

        info!(table_id, session_id, games = mt.config.session_games, "Session started");
        Ok(session_id)
    }

    /// Запустить новую партию сессии: тасуем и раздаём.
    pub fn start_game<R: RandomSource>(
        &mut self,
        table_id: TableId,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<GameStatus, ManagerError> {
        let setup = self.next_setup(table_id)?;
        let started = game_loop::start_game(&setup, rng, now_ms)?;
        self.store_game(table_id, started)
    }

    /// Запустить партию с заранее розданными руками.
    pub fn start_game_with_hands(
        &mut self,
        table_id: TableId,
        hands: Vec<Vec<Card>>,
        now_ms: u64,
    ) -> Result<GameStatus, ManagerError> {
        let setup = self.next_setup(table_id)?;
        let started = game_loop::start_game_with_hands(&setup, hands, now_ms)?;
        self.store_game(table_id, started)
    }

    /// Параметры следующей партии сессии.
    fn next_setup(&mut self, table_id: TableId) -> Result<GameSetup, ManagerError> {
        let game_id = self.ids.next_game_id();
        let mt = self
            .tables
            .get(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;
        if mt.game_in_progress() {
            return Err(ManagerError::GameInProgress(table_id));
        }
        let session = mt
            .session
            .as_ref()
            .ok_or(ManagerError::NoActiveSession(table_id))?;
        if session.is_complete() {
            return Err(ManagerError::SessionComplete(table_id));
        }

        let first_game = session.games_played() == 0;
        Ok(GameSetup {
            game_id,
            num_players: mt.config.num_players,
            first_game,
            previous_winner: if first_game {
                None
            } else {
                mt.last_outcome.as_ref().map(|o| o.winner)
            },
            scoring: mt.config.scoring,
        })
    }

    fn store_game(
        &mut self,
        table_id: TableId,
        (game, status): (GameState, GameStatus),
    ) -> Result<GameStatus, ManagerError> {
        let mt = self
            .tables
            .get_mut(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;
        mt.game = Some(game);
        if let GameStatus::Finished(outcome) = &status {
            fold_outcome(table_id, mt, outcome)?;
        }
        Ok(status)
    }

    /// Применить действие игрока на конкретном столе.
    ///
    /// При ошибке состояние стола не меняется.
    pub fn apply_action(
        &mut self,
        table_id: TableId,
        action: PlayerAction,
        now_ms: u64,
    ) -> Result<GameStatus, ManagerError> {
        let mt = self
            .tables
            .get_mut(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;

        let game = mt
            .game
            .as_ref()
            .filter(|g| !g.finished)
            .ok_or(ManagerError::NoActiveGame(table_id))?;

        let seat = action.seat;
        let (next, status) = match game_loop::apply_action(game, action, now_ms) {
            Ok(result) => result,
            Err(err) => {
                warn!(table_id, seat, error = %err, "Action rejected");
                return Err(err.into());
            }
        };

        mt.game = Some(next);
        if let GameStatus::Finished(outcome) = &status {
            fold_outcome(table_id, mt, outcome)?;
        }
        Ok(status)
    }

    /// Подсказка по таймеру текущего хода.
    pub fn check_timeout(&self, table_id: TableId, now_ms: u64) -> Result<AutoActionDecision, ManagerError> {
        let mt = self
            .tables
            .get(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;
        let game = mt
            .game
            .as_ref()
            .ok_or(ManagerError::NoActiveGame(table_id))?;
        Ok(game_loop::check_turn_timeout(game, &mt.config.time, now_ms))
    }
}

/// Добавить завершённую партию в счёт сессии.
fn fold_outcome(
    table_id: TableId,
    mt: &mut ManagedTable,
    outcome: &GameOutcome,
) -> Result<(), ManagerError> {
    let session = mt
        .session
        .as_ref()
        .ok_or(ManagerError::NoActiveSession(table_id))?;
    let updated = record_game_result(session, &outcome.scores)?;

    if updated.is_complete() {
        info!(
            table_id,
            games = updated.games_played(),
            "Session completed"
        );
    }
    mt.session = Some(updated);
    mt.last_outcome = Some(outcome.clone());
    Ok(())
}
