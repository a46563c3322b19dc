//! Движок правил Tiến Lên Miền Nam.
//!
//! Чистое ядро без I/O: карты и комбинации, круги и chặt, tới trắng,
//! штрафы и счёт сессии. Транспорт и хранение остаются оркестратору,
//! он общается с ядром через `api::Command` / `api::Query`.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod scoring;
pub mod time_ctrl;
