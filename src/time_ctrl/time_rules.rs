// src/time_ctrl/time_rules.rs
//! Конфигурация тайминга хода.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретному столу.

use serde::{Deserialize, Serialize};

/// Таймаут по умолчанию: 30 секунд на ход.
pub const DEFAULT_TURN_TIMEOUT_MS: u64 = 30_000;

/// Профиль тайминга.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeProfile {
    /// 30 сек на ход.
    Standard,
    /// 15 сек на ход.
    Fast,
}

/// Правила тайминга для одного стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnTimeRules {
    /// Сколько миллисекунд даётся на ход.
    pub turn_timeout_ms: u64,
}

impl TurnTimeRules {
    pub const fn new(turn_timeout_ms: u64) -> Self {
        Self { turn_timeout_ms }
    }

    pub const fn standard() -> Self {
        Self::new(DEFAULT_TURN_TIMEOUT_MS)
    }

    pub const fn from_profile(profile: TimeProfile) -> Self {
        match profile {
            TimeProfile::Standard => Self::standard(),
            TimeProfile::Fast => Self::new(DEFAULT_TURN_TIMEOUT_MS / 2),
        }
    }
}

impl Default for TurnTimeRules {
    fn default() -> Self {
        Self::standard()
    }
}
