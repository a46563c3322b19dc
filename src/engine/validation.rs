use std::collections::HashSet;

use crate::domain::card::Card;
use crate::domain::combination::CardCombination;
use crate::domain::{validate_seat, SeatIndex};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::GameState;
use crate::engine::vong::can_cut_in_vong;
use crate::eval::{all_combinations, can_beat_combination, can_cut, detect_combination, CutTarget};

/// Проверенный ход: комбинация и, если это chặt со штрафом, что перебили.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedPlay {
    pub combination: CardCombination,
    pub cut: Option<CutTarget>,
}

/// Общие проверки для хода и паса: партия идёт, место существует,
/// сейчас его ход и оно не пасовало.
fn validate_turn(state: &GameState, seat: SeatIndex) -> Result<(), EngineError> {
    if state.finished {
        return Err(EngineError::GameFinished);
    }
    validate_seat(seat as usize, state.num_players as usize)?;

    let current = state.turn.current_player_index;
    if seat != current {
        return Err(EngineError::NotPlayersTurn { seat, current });
    }
    if state.round.passed_players.contains(&seat) {
        return Err(EngineError::AlreadyPassed {
            seat,
            round: state.round.round_number,
        });
    }
    Ok(())
}

/// Проверка, может ли место выложить эти карты при текущем состоянии круга.
pub fn validate_play(
    state: &GameState,
    seat: SeatIndex,
    cards: &[Card],
) -> Result<ValidatedPlay, EngineError> {
    validate_turn(state, seat)?;

    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(*card) {
            return Err(EngineError::DuplicateCard { card: *card });
        }
    }

    let hand = &state.seats[seat as usize];
    if let Some(card) = cards.iter().find(|c| !hand.holds(**c)) {
        return Err(EngineError::CardNotInHand { seat, card: *card });
    }

    let combination = detect_combination(cards).ok_or(EngineError::InvalidCombination {
        count: cards.len(),
    })?;

    check_against_round(state, seat, combination)
}

/// Проверка комбинации против последней сыгранной в круге.
fn check_against_round(
    state: &GameState,
    seat: SeatIndex,
    combination: CardCombination,
) -> Result<ValidatedPlay, EngineError> {
    if state.opening_play_pending && !combination.contains(Card::THREE_OF_SPADES) {
        return Err(EngineError::MissingThreeOfSpades);
    }

    let Some(last) = state.round.last_play.as_ref() else {
        return Ok(ValidatedPlay {
            combination,
            cut: None,
        });
    };

    if let Some(target) = can_cut(&combination, last) {
        if can_cut_in_vong(&state.vong, seat) {
            return Ok(ValidatedPlay {
                combination,
                cut: Some(target),
            });
        }
        // Без vòng разрешено только обычное перебивание того же типа.
        if can_beat_combination(&combination, last) {
            return Ok(ValidatedPlay {
                combination,
                cut: None,
            });
        }
        return Err(EngineError::CutNotAllowed { seat });
    }

    if can_beat_combination(&combination, last) {
        Ok(ValidatedPlay {
            combination,
            cut: None,
        })
    } else {
        Err(EngineError::CannotBeat {
            played: combination.kind,
            last: last.kind,
        })
    }
}

/// Проверка паса: ведущий круг пасовать не может.
pub fn validate_pass(state: &GameState, seat: SeatIndex) -> Result<(), EngineError> {
    validate_turn(state, seat)?;
    if state.round.last_play.is_none() {
        return Err(EngineError::CannotPassOnLead { seat });
    }
    Ok(())
}

/// Все комбинации, которые место может законно выложить прямо сейчас.
///
/// Пусто, если сейчас не ход места или партия окончена.
pub fn legal_plays(state: &GameState, seat: SeatIndex) -> Vec<CardCombination> {
    if validate_turn(state, seat).is_err() {
        return Vec::new();
    }
    all_combinations(&state.seats[seat as usize].hand)
        .into_iter()
        .filter(|combo| check_against_round(state, seat, combo.clone()).is_ok())
        .collect()
}
