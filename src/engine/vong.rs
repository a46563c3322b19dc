use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;

/// Vòng: после первой сыгранной комбинации круга остальные места могут chặt.
///
/// Место, начавшее круг, chặt в этом круге не может.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VongState {
    pub has_any_player_played: bool,
    pub first_player_index: SeatIndex,
    pub num_players: u8,
}

pub fn create_vong_state(first_player_index: SeatIndex, num_players: u8) -> VongState {
    VongState {
        has_any_player_played: false,
        first_player_index,
        num_players,
    }
}

/// Отметить, что в круге сыграна комбинация (не пас).
pub fn record_vong_play(state: &VongState) -> VongState {
    VongState {
        has_any_player_played: true,
        ..state.clone()
    }
}

/// Может ли место chặt прямо сейчас.
pub fn can_cut_in_vong(state: &VongState, seat: SeatIndex) -> bool {
    state.has_any_player_played && seat != state.first_player_index
}
