//! Доменная модель Tiến Lên: карты, комбинации, колода, места, партии, сессии.

pub mod card;
pub mod combination;
pub mod deck;
pub mod game;
pub mod points;
pub mod seat;
pub mod session;
pub mod table;

use crate::engine::EngineError;

// Базовые идентификаторы (раздаёт infra::IdGenerator).
pub type TableId = u64;
pub type GameId = u64;
pub type SessionId = u64;

/// Карт в колоде.
pub const DECK_SIZE: usize = 52;
/// Карт в руке после раздачи.
pub const HAND_SIZE: usize = 13;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Допустимая длина сессии (в партиях).
pub const SESSION_LENGTHS: [u32; 2] = [16, 32];

/// Проверить число игроков (2..=4).
pub fn validate_player_count(num_players: usize) -> Result<(), EngineError> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
        Ok(())
    } else {
        Err(EngineError::InvalidPlayerCount { count: num_players })
    }
}

/// Проверить длину сессии (16 или 32 партии).
pub fn validate_session_length(total_games: u32) -> Result<(), EngineError> {
    if SESSION_LENGTHS.contains(&total_games) {
        Ok(())
    } else {
        Err(EngineError::InvalidSessionLength { games: total_games })
    }
}

/// Проверить, что место существует за столом на `num_players`.
pub fn validate_seat(seat: usize, num_players: usize) -> Result<(), EngineError> {
    if seat < num_players {
        Ok(())
    } else {
        Err(EngineError::InvalidSeat { seat, num_players })
    }
}

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use combination::*;
pub use deck::*;
pub use game::*;
pub use points::*;
pub use seat::*;
pub use session::*;
pub use table::*;
