use serde::{Deserialize, Serialize};

use crate::domain::{validate_player_count, validate_session_length};
use crate::engine::EngineError;
use crate::time_ctrl::TurnTimeRules;

/// Индекс места за столом (0..num_players-1).
pub type SeatIndex = u8;

/// Правила подсчёта, которые различаются между столами.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoringRules {
    /// Начислять ли thúi в партии, закончившейся tới trắng.
    pub apply_thui_on_instant_win: bool,
}

impl ScoringRules {
    pub const fn standard() -> Self {
        Self {
            apply_thui_on_instant_win: true,
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Конфиг стола: сколько мест, длина сессии, тайминг и правила подсчёта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Имя стола (для лобби).
    #[serde(default = "default_table_name")]
    pub name: String,
    /// Количество игроков (2–4).
    pub num_players: u8,
    /// Сколько партий в сессии (16 или 32).
    #[serde(default = "default_session_games")]
    pub session_games: u32,
    #[serde(default)]
    pub time: TurnTimeRules,
    #[serde(default)]
    pub scoring: ScoringRules,
}

fn default_table_name() -> String {
    "Tiến Lên".to_string()
}

fn default_session_games() -> u32 {
    16
}

impl TableConfig {
    /// Стандартный стол: 16 партий, 30 секунд на ход.
    pub fn standard(num_players: u8) -> Self {
        Self {
            name: default_table_name(),
            num_players,
            session_games: default_session_games(),
            time: TurnTimeRules::standard(),
            scoring: ScoringRules::standard(),
        }
    }

    /// Жёсткая валидация конфига.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_player_count(self.num_players as usize)?;
        validate_session_length(self.session_games)?;
        if self.time.turn_timeout_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "TableConfig: turn_timeout_ms = 0".into(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(EngineError::InvalidConfig("TableConfig: name is empty".into()));
        }
        Ok(())
    }

    /// Прочитать и проверить конфиг из JSON.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: TableConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidConfig(format!("TableConfig JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
