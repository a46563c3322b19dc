use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::{validate_player_count, DECK_SIZE, HAND_SIZE};
use crate::engine::{EngineError, RandomSource};

/// Колода карт. В домене – просто упорядоченный список карт.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

/// Результат раздачи: по 13 карт на место и неиспользованный остаток.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealtHands {
    pub hands: Vec<Vec<Card>>,
    pub unused: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке value:
    /// 3♠ 3♣ 3♦ 3♥ 4♠ ... 2♥.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Колода годится для раздачи: ровно 52 уникальные карты.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.cards.len() != DECK_SIZE {
            return Err(EngineError::InvalidDeck {
                size: self.cards.len(),
                reason: format!("expected {DECK_SIZE} cards"),
            });
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for card in &self.cards {
            if !seen.insert(*card) {
                return Err(EngineError::InvalidDeck {
                    size: self.cards.len(),
                    reason: format!("duplicate card {card}"),
                });
            }
        }
        Ok(())
    }
}

/// Сгенерировать свежую колоду.
pub fn generate_deck() -> Deck {
    Deck::standard_52()
}

/// Перемешать колоду (Fisher–Yates через `RandomSource`).
///
/// Исходная колода не меняется, возвращается новая.
pub fn shuffle_deck<R: RandomSource>(deck: &Deck, rng: &mut R) -> Deck {
    let mut cards = deck.cards.clone();
    rng.shuffle(&mut cards);
    Deck { cards }
}

/// Раздать по 13 карт каждому месту по кругу: карта i уходит месту i mod n.
pub fn deal_cards(deck: &Deck, num_players: usize) -> Result<DealtHands, EngineError> {
    validate_player_count(num_players)?;
    deck.validate()?;

    let dealt = HAND_SIZE * num_players;
    let mut hands = vec![Vec::with_capacity(HAND_SIZE); num_players];
    for (i, card) in deck.cards.iter().take(dealt).enumerate() {
        hands[i % num_players].push(*card);
    }

    Ok(DealtHands {
        hands,
        unused: deck.cards[dealt..].to_vec(),
    })
}
