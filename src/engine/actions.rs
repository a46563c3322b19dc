use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::SeatIndex;

/// Тип действия игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    /// Выложить карты (комбинацию определяет движок).
    Play(Vec<Card>),
    /// Пас до конца круга.
    Pass,
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// На каком месте сидит игрок (0..num_players-1).
    pub seat: SeatIndex,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn play(seat: SeatIndex, cards: Vec<Card>) -> Self {
        Self {
            seat,
            kind: PlayerActionKind::Play(cards),
        }
    }

    pub fn pass(seat: SeatIndex) -> Self {
        Self {
            seat,
            kind: PlayerActionKind::Pass,
        }
    }
}
