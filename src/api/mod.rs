//! Внешний API движка Tiến Lên.
//!
//! Здесь описываются:
//! - команды (commands.rs) – всё, что меняет состояние (стол, сессия, партия, ход);
//! - запросы (queries.rs) – только чтение;
//! - DTO и исходящие события (dto.rs) – то, что оркестратор рассылает клиентам;
//! - ошибки (errors.rs) – то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
