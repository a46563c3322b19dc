use serde::{Deserialize, Serialize};

use crate::domain::card::{sort_cards, Card};
use crate::domain::SeatIndex;

/// Состояние места в текущей партии: рука и сколько карт уже сыграно.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatState {
    pub seat: SeatIndex,
    /// Карты на руке, по возрастанию value.
    pub hand: Vec<Card>,
    /// Сколько карт место выложило за партию (0 в конце = cóng).
    pub cards_played: u32,
}

impl SeatState {
    pub fn new(seat: SeatIndex, mut hand: Vec<Card>) -> Self {
        sort_cards(&mut hand);
        Self {
            seat,
            hand,
            cards_played: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.hand.len()
    }

    /// Рука пуста – место вышло из партии.
    pub fn is_out(&self) -> bool {
        self.hand.is_empty()
    }

    pub fn has_played(&self) -> bool {
        self.cards_played > 0
    }

    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    /// Убрать сыгранные карты из руки. Наличие карт проверяет валидация.
    pub fn remove_cards(&mut self, cards: &[Card]) {
        self.hand.retain(|c| !cards.contains(c));
        self.cards_played += cards.len() as u32;
    }

    /// Сумма `Card::points()` оставшихся карт.
    pub fn hand_points(&self) -> u32 {
        self.hand.iter().map(|c| c.points() as u32).sum()
    }
}
