//! Движок партии Tiến Lên: очередь ходов, круги, vòng, chặt, конец партии.
//!
//! Высокоуровневый объект: `GameState`
//! Основные операции:
//!   - `start_game` – раздать и запустить новую партию
//!   - `apply_action` – применить ход или пас
//!   - `check_turn_timeout` – подсказка хосту по таймеру хода

pub mod actions;
pub mod cutting;
pub mod errors;
pub mod game_history;
pub mod game_loop;
pub mod positions;
pub mod round;
pub mod table_manager;
pub mod validation;
pub mod vong;

pub use actions::{PlayerAction, PlayerActionKind};
pub use cutting::{ChainSettlement, CutEntry, CuttingChainState, SingleHeoTrackingState};
pub use errors::{EngineError, ErrorCategory, ErrorContext};
pub use game_history::{GameEvent, GameEventKind, GameHistory};
pub use game_loop::{
    apply_action, check_turn_timeout, start_game, start_game_with_hands, GameSetup, GameState,
    GameStatus,
};
pub use positions::{advance_turn, next_seat, prev_seat, TurnOrderState};
pub use round::{RoundEndDecision, RoundEndReason, RoundState};
pub use validation::legal_plays;
pub use vong::VongState;

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

pub use table_manager::{ManagerError, TableManager};
