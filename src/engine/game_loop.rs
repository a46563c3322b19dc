use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::card::Card;
use crate::domain::deck::{deal_cards, generate_deck, shuffle_deck};
use crate::domain::game::GameOutcome;
use crate::domain::points::Points;
use crate::domain::seat::SeatState;
use crate::domain::table::ScoringRules;
use crate::domain::{validate_player_count, GameId, SeatIndex, HAND_SIZE};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::cutting::{
    add_cut, mark_finished_after_cut, resolve_cutting_chain, track_single_heo, CutEntry,
    CuttingChainState, SingleHeoTrackingState,
};
use crate::engine::errors::EngineError;
use crate::engine::game_history::{GameEventKind, GameHistory};
use crate::engine::positions::{
    advance_turn, create_turn_order, set_current_seat, start_turn_timer, TurnOrderState,
};
use crate::engine::round::{
    check_round_end, create_round_state, record_pass, record_play, transition_round,
    RoundEndDecision, RoundEndReason, RoundState,
};
use crate::engine::validation::{validate_pass, validate_play};
use crate::engine::vong::{create_vong_state, record_vong_play, VongState};
use crate::engine::RandomSource;
use crate::eval::{detect_instant_win, InstantWinType};
use crate::scoring::{
    calculate_chat_penalty, calculate_cong_penalties, calculate_den_bai, calculate_game_scores,
    calculate_instant_win_scores, calculate_thui, finishing_order, thui_receiver,
    CongPenaltyResult, DenBaiResult, GamePenaltyState,
};
use crate::time_ctrl::{check_timeout, AutoActionDecision, TurnTimeRules};

/// Статус партии для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished(Box<GameOutcome>),
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Finished(_))
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        match self {
            GameStatus::Finished(outcome) => Some(outcome),
            GameStatus::InProgress => None,
        }
    }
}

/// Параметры запуска партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSetup {
    pub game_id: GameId,
    pub num_players: u8,
    /// Первая партия сессии: первый ход обязан содержать 3♠,
    /// tới trắng проверяется по правилам первой партии.
    pub first_game: bool,
    /// Победитель прошлой партии: он начинает следующую.
    pub previous_winner: Option<SeatIndex>,
    #[serde(default)]
    pub scoring: ScoringRules,
}

impl GameSetup {
    /// Первая партия сессии со стандартными правилами.
    pub fn first(game_id: GameId, num_players: u8) -> Self {
        Self {
            game_id,
            num_players,
            first_game: true,
            previous_winner: None,
            scoring: ScoringRules::standard(),
        }
    }

    /// Очередная партия сессии после победы `previous_winner`.
    pub fn next(game_id: GameId, num_players: u8, previous_winner: SeatIndex) -> Self {
        Self {
            game_id,
            num_players,
            first_game: false,
            previous_winner: Some(previous_winner),
            scoring: ScoringRules::standard(),
        }
    }
}

/// Состояние партии.
///
/// Каждый переход (`apply_action`) возвращает новое состояние,
/// старое не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: GameId,
    pub num_players: u8,
    pub seats: Vec<SeatState>,
    pub turn: TurnOrderState,
    pub round: RoundState,
    pub vong: VongState,
    pub cutting_chain: CuttingChainState,
    pub single_heo: SingleHeoTrackingState,
    pub penalties: GamePenaltyState,
    pub first_game: bool,
    /// Первый ход партии ещё не сделан и обязан содержать 3♠.
    pub opening_play_pending: bool,
    pub scoring: ScoringRules,
    pub finished: bool,
    pub winner: Option<SeatIndex>,
    pub history: GameHistory,
}

impl GameState {
    pub fn current_seat(&self) -> SeatIndex {
        self.turn.current_player_index
    }

    pub fn seat(&self, seat: SeatIndex) -> Option<&SeatState> {
        self.seats.get(seat as usize)
    }

    pub fn hand_of(&self, seat: SeatIndex) -> Option<&[Card]> {
        self.seat(seat).map(|s| s.hand.as_slice())
    }

    /// Текущее место ведёт круг (пасовать нельзя).
    pub fn is_leading(&self) -> bool {
        self.round.last_play.is_none()
    }
}

/// Старт новой партии:
/// - тасует и раздаёт колоду;
/// - выбирает, кто начинает;
/// - проверяет tới trắng.
pub fn start_game<R: RandomSource>(
    setup: &GameSetup,
    rng: &mut R,
    now_ms: u64,
) -> Result<(GameState, GameStatus), EngineError> {
    validate_player_count(setup.num_players as usize)?;
    let deck = shuffle_deck(&generate_deck(), rng);
    let dealt = deal_cards(&deck, setup.num_players as usize)?;
    start_game_with_hands(setup, dealt.hands, now_ms)
}

/// Старт партии с заранее розданными руками (реплей, тесты).
pub fn start_game_with_hands(
    setup: &GameSetup,
    hands: Vec<Vec<Card>>,
    now_ms: u64,
) -> Result<(GameState, GameStatus), EngineError> {
    let n = setup.num_players;
    validate_player_count(n as usize)?;
    validate_hands(&hands, n as usize)?;

    let seats: Vec<SeatState> = hands
        .into_iter()
        .enumerate()
        .map(|(i, hand)| SeatState::new(i as SeatIndex, hand))
        .collect();

    let leader = choose_leader(&seats, setup)?;
    let three_of_spades_dealt = seats.iter().any(|s| s.holds(Card::THREE_OF_SPADES));

    let mut history = GameHistory::new();
    history.push(GameEventKind::GameStarted {
        game_id: setup.game_id,
        leader,
        opening_round: setup.first_game,
    });
    for seat in &seats {
        history.push(GameEventKind::HandDealt {
            seat: seat.seat,
            cards: seat.hand.clone(),
        });
    }

    let turn = start_turn_timer(&create_turn_order(n, leader)?, now_ms);
    let state = GameState {
        game_id: setup.game_id,
        num_players: n,
        seats,
        turn,
        round: create_round_state(1, leader, n),
        vong: create_vong_state(leader, n),
        cutting_chain: CuttingChainState::new(),
        single_heo: SingleHeoTrackingState::new(),
        penalties: GamePenaltyState::new(n as usize),
        first_game: setup.first_game,
        opening_play_pending: setup.first_game && three_of_spades_dealt,
        scoring: setup.scoring,
        finished: false,
        winner: None,
        history,
    };

    info!(
        game_id = setup.game_id,
        num_players = n,
        leader,
        first_game = setup.first_game,
        "Game started"
    );

    // Tới trắng: первое место по очереди от ведущего.
    for offset in 0..n {
        let seat = (leader + offset) % n;
        let check = detect_instant_win(&state.seats[seat as usize].hand, setup.first_game);
        if let Some(kind) = check.kind {
            let (state, outcome) = finish_instant_win(&state, seat, kind);
            return Ok((state, GameStatus::Finished(Box::new(outcome))));
        }
    }

    Ok((state, GameStatus::InProgress))
}

fn validate_hands(hands: &[Vec<Card>], num_players: usize) -> Result<(), EngineError> {
    if hands.len() != num_players {
        return Err(EngineError::InvalidPlayerCount { count: hands.len() });
    }
    let mut seen = HashSet::with_capacity(HAND_SIZE * num_players);
    for hand in hands {
        if hand.len() != HAND_SIZE {
            return Err(EngineError::InvalidHandSize {
                size: hand.len(),
                expected: HAND_SIZE,
            });
        }
        for card in hand {
            if !seen.insert(*card) {
                return Err(EngineError::DuplicateCard { card: *card });
            }
        }
    }
    Ok(())
}

/// Кто начинает партию.
///
/// Первая партия: владелец 3♠ (или самой младшей карты, если 3♠ не роздана).
/// Дальше: победитель прошлой партии.
fn choose_leader(seats: &[SeatState], setup: &GameSetup) -> Result<SeatIndex, EngineError> {
    if !setup.first_game {
        if let Some(winner) = setup.previous_winner {
            if (winner as usize) < seats.len() {
                return Ok(winner);
            }
            return Err(EngineError::InvalidSeat {
                seat: winner as usize,
                num_players: seats.len(),
            });
        }
    }

    seats
        .iter()
        .filter_map(|s| s.hand.iter().min().map(|c| (*c, s.seat)))
        .min()
        .map(|(_, seat)| seat)
        .ok_or(EngineError::InvalidPlayerCount { count: seats.len() })
}

/// Применить действие игрока. Возвращает новое состояние и статус партии.
pub fn apply_action(
    state: &GameState,
    action: PlayerAction,
    now_ms: u64,
) -> Result<(GameState, GameStatus), EngineError> {
    match action.kind {
        PlayerActionKind::Play(cards) => apply_play(state, action.seat, &cards, now_ms),
        PlayerActionKind::Pass => apply_pass(state, action.seat, now_ms),
    }
}

fn apply_play(
    state: &GameState,
    seat: SeatIndex,
    cards: &[Card],
    now_ms: u64,
) -> Result<(GameState, GameStatus), EngineError> {
    let play = validate_play(state, seat, cards)?;
    let combination = play.combination;

    let mut next = state.clone();
    next.seats[seat as usize].remove_cards(&combination.cards);
    let cards_left = next.seats[seat as usize].remaining() as u32;
    let went_out = cards_left == 0;

    // Последняя жертва chặt вышла любым ходом: цепочка аннулируется.
    if went_out {
        next.cutting_chain = mark_finished_after_cut(&state.cutting_chain, seat);
    }

    if let (Some(target), Some(last), Some(victim)) = (
        play.cut,
        state.round.last_play.as_ref(),
        state.round.last_player_index,
    ) {
        let penalty = calculate_chat_penalty(last, &state.single_heo.heo);
        if !next.cutting_chain.is_voided() {
            next.cutting_chain = add_cut(
                &next.cutting_chain,
                CutEntry {
                    cut_player_index: victim,
                    cutting_player_index: seat,
                    penalty_points: penalty,
                    heo_count: last.heo_count().max(state.single_heo.count()) as u32,
                    finished_after_cut: false,
                },
            );
        }
        next.history.push(GameEventKind::Cut {
            seat,
            victim,
            target,
            penalty,
        });
        debug!(game_id = state.game_id, seat, victim, ?target, penalty = penalty.value(), "Cut");
    }

    debug!(
        game_id = state.game_id,
        seat,
        combination = %combination,
        cards_left,
        "Play"
    );

    next.single_heo = track_single_heo(&state.single_heo, &combination);
    next.vong = record_vong_play(&state.vong);
    next.opening_play_pending = false;
    next.history.push(GameEventKind::Played {
        seat,
        combination: combination.clone(),
        cards_left,
    });
    next.round = record_play(&state.round, seat, combination)?;

    let decision = check_round_end(&next.round, seat, went_out);
    if decision.is_game_over() {
        next.history.push(GameEventKind::RoundEnded {
            round: next.round.round_number,
            reason: RoundEndReason::PlayerFinished,
            winner: seat,
            next_leader: None,
        });
        let (finished, outcome) = finish_game(&next, seat);
        return Ok((finished, GameStatus::Finished(Box::new(outcome))));
    }

    let skip: Vec<SeatIndex> = next.round.passed_players.iter().copied().collect();
    next.turn = start_turn_timer(&advance_turn(&next.turn, &skip)?, now_ms);
    Ok((next, GameStatus::InProgress))
}

fn apply_pass(
    state: &GameState,
    seat: SeatIndex,
    now_ms: u64,
) -> Result<(GameState, GameStatus), EngineError> {
    validate_pass(state, seat)?;

    let mut next = state.clone();
    next.round = record_pass(&state.round, seat)?;
    next.history.push(GameEventKind::Passed { seat });
    debug!(game_id = state.game_id, seat, "Pass");

    let decision = check_round_end(&next.round, seat, false);
    if decision.ended {
        next = end_round(&next, decision)?;
        next.turn = start_turn_timer(&next.turn, now_ms);
        return Ok((next, GameStatus::InProgress));
    }

    let skip: Vec<SeatIndex> = next.round.passed_players.iter().copied().collect();
    next.turn = start_turn_timer(&advance_turn(&next.turn, &skip)?, now_ms);
    Ok((next, GameStatus::InProgress))
}

/// Рассчитать цепочку chặt в штрафы партии.
fn settle_cutting_chain(state: &mut GameState) {
    if state.cutting_chain.is_voided() {
        state.history.push(GameEventKind::CutChainVoided);
        debug!(game_id = state.game_id, "Cut chain voided");
    } else if let Some(settlement) = resolve_cutting_chain(&state.cutting_chain) {
        state.penalties =
            state
                .penalties
                .with_transfer(settlement.payer, settlement.receiver, settlement.amount);
        state.history.push(GameEventKind::CutChainSettled {
            payer: settlement.payer,
            receiver: settlement.receiver,
            amount: settlement.amount,
        });
        debug!(
            game_id = state.game_id,
            payer = settlement.payer,
            receiver = settlement.receiver,
            amount = settlement.amount.value(),
            "Cut chain settled"
        );
    }
    state.cutting_chain = CuttingChainState::new();
}

/// Конец круга: расчёт chặt и новый круг от места справа от победителя.
fn end_round(state: &GameState, decision: RoundEndDecision) -> Result<GameState, EngineError> {
    let (Some(winner), Some(reason)) = (decision.winner, decision.reason) else {
        return Ok(state.clone());
    };

    let mut next = state.clone();
    settle_cutting_chain(&mut next);

    next.history.push(GameEventKind::RoundEnded {
        round: state.round.round_number,
        reason,
        winner,
        next_leader: decision.next_leader,
    });

    next.round = transition_round(&state.round, winner);
    let leader = next.round.first_player_index;
    next.turn = set_current_seat(&state.turn, leader)?;
    next.vong = create_vong_state(leader, state.num_players);
    next.single_heo = SingleHeoTrackingState::new();

    debug!(
        game_id = state.game_id,
        round = next.round.round_number,
        ?reason,
        winner,
        leader,
        "Round transition"
    );
    Ok(next)
}

/// Завершение обычной партии: штрафы и счёт.
fn finish_game(state: &GameState, winner: SeatIndex) -> (GameState, GameOutcome) {
    let mut next = state.clone();
    settle_cutting_chain(&mut next);

    let n = next.num_players as usize;
    let cong = calculate_cong_penalties(&next.seats, winner);
    let den_bai = calculate_den_bai(&cong, winner, n, None);
    let order = finishing_order(&next.seats, winner);
    let ve_bet = order.last().copied().unwrap_or(winner);
    let receiver = thui_receiver(&order, winner, false, cong.is_cong(ve_bet));
    let thui = calculate_thui(&next.seats[ve_bet as usize].hand, ve_bet, receiver);

    let scores = calculate_game_scores(&next.seats, winner, &next.penalties, &cong, &thui, &den_bai);

    next.finished = true;
    next.winner = Some(winner);
    next.history.push(GameEventKind::GameFinished {
        game_id: next.game_id,
        winner,
    });

    info!(
        game_id = next.game_id,
        winner,
        rounds = next.round.round_number,
        cong = cong.cong_seats.len(),
        thui = thui.total.value(),
        "Game finished"
    );

    let outcome = GameOutcome {
        game_id: next.game_id,
        winner,
        finishing_order: order,
        final_hands: next.seats.iter().map(|s| s.hand.clone()).collect(),
        instant_win: None,
        rounds_played: next.round.round_number,
        cong,
        thui: Some(thui),
        den_bai,
        penalties: next.penalties.clone(),
        scores,
    };
    (next, outcome)
}

/// Завершение партии по tới trắng.
fn finish_instant_win(
    state: &GameState,
    winner: SeatIndex,
    kind: InstantWinType,
) -> (GameState, GameOutcome) {
    let mut next = state.clone();
    let n = next.num_players as usize;

    let order = finishing_order(&next.seats, winner);
    let thui = if next.scoring.apply_thui_on_instant_win {
        order
            .last()
            .copied()
            .filter(|&seat| seat != winner)
            .map(|ve_bet| {
                let receiver = thui_receiver(&order, winner, true, false);
                calculate_thui(&next.seats[ve_bet as usize].hand, ve_bet, receiver)
            })
    } else {
        None
    };

    let remaining: Vec<u32> = next.seats.iter().map(|s| s.remaining() as u32).collect();
    let scores = calculate_instant_win_scores(n, winner, &remaining, thui.as_ref());

    next.finished = true;
    next.winner = Some(winner);
    next.history.push(GameEventKind::InstantWin { seat: winner, kind });
    next.history.push(GameEventKind::GameFinished {
        game_id: next.game_id,
        winner,
    });

    info!(
        game_id = next.game_id,
        winner,
        kind = %kind,
        "Instant win"
    );

    let outcome = GameOutcome {
        game_id: next.game_id,
        winner,
        finishing_order: order,
        final_hands: next.seats.iter().map(|s| s.hand.clone()).collect(),
        instant_win: Some(kind),
        rounds_played: 0,
        cong: CongPenaltyResult {
            cong_seats: Vec::new(),
            penalty_per_seat: Points::ZERO,
            total: Points::ZERO,
        },
        thui,
        den_bai: DenBaiResult::NONE,
        penalties: next.penalties.clone(),
        scores,
    };
    (next, outcome)
}

/// Подсказка хосту по таймеру текущего хода.
pub fn check_turn_timeout(state: &GameState, rules: &TurnTimeRules, now_ms: u64) -> AutoActionDecision {
    if state.finished {
        return AutoActionDecision::None;
    }
    check_timeout(&state.turn, rules, now_ms, state.is_leading())
}
