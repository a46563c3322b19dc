use serde::{Deserialize, Serialize};

use crate::domain::{validate_player_count, validate_seat, SeatIndex};
use crate::engine::EngineError;

/// Очерёдность ходов в партии. Живёт через все круги партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TurnOrderState {
    pub current_player_index: SeatIndex,
    pub num_players: u8,
    /// Начало текущего хода (Unix ms), если таймер запущен.
    pub turn_start_time: Option<u64>,
}

/// Следующее место по кругу: (i + 1) mod n.
pub fn next_seat(seat: SeatIndex, num_players: u8) -> SeatIndex {
    if num_players == 0 {
        return 0;
    }
    ((seat as u16 + 1) % num_players as u16) as SeatIndex
}

/// Предыдущее место по кругу (обратное к `next_seat`).
pub fn prev_seat(seat: SeatIndex, num_players: u8) -> SeatIndex {
    if num_players == 0 {
        return 0;
    }
    ((seat as u16 + num_players as u16 - 1) % num_players as u16) as SeatIndex
}

/// Создать очерёдность, начиная с места `first`.
pub fn create_turn_order(num_players: u8, first: SeatIndex) -> Result<TurnOrderState, EngineError> {
    validate_player_count(num_players as usize)?;
    validate_seat(first as usize, num_players as usize)?;
    Ok(TurnOrderState {
        current_player_index: first,
        num_players,
        turn_start_time: None,
    })
}

/// Передать ход следующему месту не из `skip`.
///
/// Ошибка, если `skip` покрывает все места.
pub fn advance_turn(state: &TurnOrderState, skip: &[SeatIndex]) -> Result<TurnOrderState, EngineError> {
    let n = state.num_players;
    let mut seat = state.current_player_index;
    for _ in 0..n {
        seat = next_seat(seat, n);
        if !skip.contains(&seat) {
            return Ok(TurnOrderState {
                current_player_index: seat,
                turn_start_time: None,
                ..state.clone()
            });
        }
    }
    Err(EngineError::NoSeatAvailable {
        num_players: n as usize,
    })
}

/// Поставить ход на конкретное место (новый круг).
pub fn set_current_seat(state: &TurnOrderState, seat: SeatIndex) -> Result<TurnOrderState, EngineError> {
    validate_seat(seat as usize, state.num_players as usize)?;
    Ok(TurnOrderState {
        current_player_index: seat,
        turn_start_time: None,
        ..state.clone()
    })
}

/// Запустить таймер текущего хода.
pub fn start_turn_timer(state: &TurnOrderState, now_ms: u64) -> TurnOrderState {
    TurnOrderState {
        turn_start_time: Some(now_ms),
        ..state.clone()
    }
}
