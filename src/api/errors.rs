use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TableId;
use crate::engine::{EngineError, ErrorContext, ManagerError};

/// Ошибки внешнего API (то, что отдаём оркестратору / клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый код карты).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Стол не найден.
    #[error("table {0} not found")]
    TableNotFound(TableId),

    /// Команда не может быть выполнена в текущем состоянии стола.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Ошибка движка: нарушение правил или контракта.
    #[error("engine error: {message}")]
    EngineError {
        message: String,
        context: ErrorContext,
    },
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::EngineError {
            message: err.to_string(),
            context: err.context(),
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TableNotFound(id) => ApiError::TableNotFound(id),
            ManagerError::Engine(e) => e.into(),
            other => ApiError::InvalidCommand(other.to_string()),
        }
    }
}
