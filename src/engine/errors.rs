use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::combination::CombinationType;
use crate::domain::SeatIndex;

/// Категория ошибки движка.
///
/// Ядро не делает I/O, поэтому "временных" ошибок у него нет:
/// всё, что может вернуться, это нарушение контракта вызывающей стороной.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
}

/// Структурированный контекст ошибки: что именно было не так и что допустимо.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorContext {
    /// Имя поля/параметра.
    pub field: String,
    /// Переданное значение.
    pub value: String,
    /// Допустимый диапазон (если он есть).
    pub valid_range: Option<String>,
}

impl ErrorContext {
    fn new(field: &str, value: impl ToString, valid_range: Option<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            valid_range,
        }
    }
}

/// Ошибки движка Tiến Lên.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Недопустимое число игроков: {count} (допустимо 2..=4)")]
    InvalidPlayerCount { count: usize },

    #[error("Место {seat} не существует за столом на {num_players} игроков")]
    InvalidSeat { seat: usize, num_players: usize },

    #[error("Некорректная колода ({size} карт): {reason}")]
    InvalidDeck { size: usize, reason: String },

    #[error("Рука должна содержать {expected} карт, получено {size}")]
    InvalidHandSize { size: usize, expected: usize },

    #[error("Нельзя сравнивать комбинации разных типов: {left} и {right}")]
    CombinationTypeMismatch {
        left: CombinationType,
        right: CombinationType,
    },

    #[error("Игрок на месте {seat} уже пасовал в круге {round}")]
    AlreadyPassed { seat: SeatIndex, round: u32 },

    #[error("Все {num_players} мест пропущены – некому передать ход")]
    NoSeatAvailable { num_players: usize },

    #[error("Сессия должна состоять из 16 или 32 партий, получено {games}")]
    InvalidSessionLength { games: u32 },

    #[error("Сессия из {total_games} партий уже завершена")]
    SessionComplete { total_games: u32 },

    #[error("Ожидалось {expected} результатов (по одному на место), получено {actual}")]
    ScoreCountMismatch { expected: usize, actual: usize },

    #[error("Партия уже завершена")]
    GameFinished,

    #[error("Сейчас ход места {current}, а не места {seat}")]
    NotPlayersTurn { seat: SeatIndex, current: SeatIndex },

    #[error("Карты {card} нет в руке места {seat}")]
    CardNotInHand { seat: SeatIndex, card: Card },

    #[error("Карта {card} указана несколько раз")]
    DuplicateCard { card: Card },

    #[error("Карты ({count} шт.) не образуют допустимую комбинацию")]
    InvalidCombination { count: usize },

    #[error("Первый ход первой партии должен содержать 3♠")]
    MissingThreeOfSpades,

    #[error("Комбинация {played} не бьёт {last}")]
    CannotBeat {
        played: CombinationType,
        last: CombinationType,
    },

    #[error("Место {seat} не может chặt: vòng ещё не открыт для него")]
    CutNotAllowed { seat: SeatIndex },

    #[error("Место {seat} ведёт круг и не может пасовать")]
    CannotPassOnLead { seat: SeatIndex },

    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Все ошибки ядра – нарушения контракта входных данных.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::InvalidInput
    }

    /// Структурированный контекст для отчёта оркестратору.
    pub fn context(&self) -> ErrorContext {
        match self {
            EngineError::InvalidPlayerCount { count } => {
                ErrorContext::new("num_players", count, Some("2..=4".into()))
            }
            EngineError::InvalidSeat { seat, num_players } => ErrorContext::new(
                "seat",
                seat,
                Some(format!("0..{num_players}")),
            ),
            EngineError::InvalidDeck { size, reason } => {
                ErrorContext::new("deck", format!("{size} cards: {reason}"), Some("52 unique cards".into()))
            }
            EngineError::InvalidHandSize { size, expected } => {
                ErrorContext::new("hand", size, Some(expected.to_string()))
            }
            EngineError::CombinationTypeMismatch { left, right } => ErrorContext::new(
                "combination_type",
                right,
                Some(left.to_string()),
            ),
            EngineError::AlreadyPassed { seat, .. } => ErrorContext::new("seat", seat, None),
            EngineError::NoSeatAvailable { num_players } => ErrorContext::new(
                "skip_set",
                num_players,
                Some(format!("fewer than {num_players} seats")),
            ),
            EngineError::InvalidSessionLength { games } => {
                ErrorContext::new("total_games", games, Some("16 | 32".into()))
            }
            EngineError::SessionComplete { total_games } => {
                ErrorContext::new("games_played", total_games, Some(format!("0..{total_games}")))
            }
            EngineError::ScoreCountMismatch { expected, actual } => {
                ErrorContext::new("scores", actual, Some(expected.to_string()))
            }
            EngineError::GameFinished => ErrorContext::new("game", "finished", None),
            EngineError::NotPlayersTurn { seat, current } => {
                ErrorContext::new("seat", seat, Some(current.to_string()))
            }
            EngineError::CardNotInHand { card, .. } => ErrorContext::new("card", card, None),
            EngineError::DuplicateCard { card } => ErrorContext::new("card", card, None),
            EngineError::InvalidCombination { count } => ErrorContext::new("cards", count, None),
            EngineError::MissingThreeOfSpades => {
                ErrorContext::new("cards", "no 3s", Some("must contain 3s".into()))
            }
            EngineError::CannotBeat { played, last } => {
                ErrorContext::new("combination", played, Some(format!("beats {last}")))
            }
            EngineError::CutNotAllowed { seat } => ErrorContext::new("seat", seat, None),
            EngineError::CannotPassOnLead { seat } => ErrorContext::new("seat", seat, None),
            EngineError::InvalidConfig(reason) => ErrorContext::new("config", reason, None),
        }
    }
}
