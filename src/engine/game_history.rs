use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::combination::CardCombination;
use crate::domain::points::Points;
use crate::domain::{GameId, SeatIndex};
use crate::engine::round::RoundEndReason;
use crate::eval::{CutTarget, InstantWinType};

/// Тип события в партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameEventKind {
    /// Новая партия началась.
    GameStarted {
        game_id: GameId,
        leader: SeatIndex,
        opening_round: bool,
    },

    /// Место получило карты.
    HandDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    /// Tới trắng – партия закончилась без ходов.
    InstantWin {
        seat: SeatIndex,
        kind: InstantWinType,
    },

    /// Место выложило комбинацию.
    Played {
        seat: SeatIndex,
        combination: CardCombination,
        cards_left: u32,
    },

    /// Выложенная комбинация была chặt.
    Cut {
        seat: SeatIndex,
        victim: SeatIndex,
        target: CutTarget,
        penalty: Points,
    },

    /// Место спасовало.
    Passed {
        seat: SeatIndex,
    },

    /// Цепочка chặt рассчитана.
    CutChainSettled {
        payer: SeatIndex,
        receiver: SeatIndex,
        amount: Points,
    },

    /// Жертва chặt сразу вышла – цепочка аннулирована.
    CutChainVoided,

    /// Круг закончился.
    RoundEnded {
        round: u32,
        reason: RoundEndReason,
        winner: SeatIndex,
        next_leader: Option<SeatIndex>,
    },

    /// Партия завершена.
    GameFinished {
        game_id: GameId,
        winner: SeatIndex,
    },
}

/// Событие в партии с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEvent {
    pub index: u32,
    pub kind: GameEventKind,
}

/// Полная история партии.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameHistory {
    pub events: Vec<GameEvent>,
}

impl GameHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: GameEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(GameEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }
}
