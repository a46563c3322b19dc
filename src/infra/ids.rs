use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{GameId, SessionId, TableId};

/// Простая генерация ID на основе монотонных счётчиков.
///
/// Оркестратор может раздавать и свои ID; этот генератор нужен
/// `TableManager` и тестам.
#[derive(Debug)]
pub struct IdGenerator {
    table_counter: AtomicU64,
    session_counter: AtomicU64,
    game_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            table_counter: AtomicU64::new(1),
            session_counter: AtomicU64::new(1),
            game_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_table_id(&self) -> TableId {
        self.table_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_session_id(&self) -> SessionId {
        self.session_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_game_id(&self) -> GameId {
        self.game_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
