// tests/engine_integration_tests.rs
//
// Интеграционные тесты движка партии (start_game / apply_action):
//
//  1) Первая партия: ведёт владелец 3♠, первый ход обязан содержать 3♠.
//  2) Полная короткая партия: круг по трём пасам, выход, cóng и thúi.
//  3) chặt одиночной heo: штраф записывается в цепочку и рассчитывается в конце круга.
//  4) Ведущий круга не может chặt (vòng).
//  5) Tới trắng при раздаче: партия заканчивается сразу.
//  6) Без 3♠ в раздаче ведёт владелец самой младшей карты.
//  7) Следующая партия: ведёт победитель прошлой.
//  8) Переходы чистые: исходное состояние не меняется.
//  9) Детерминированная раздача через DeterministicRng.
// 10) Таймер хода.
// 11) Жертва chặt выходит обычным ходом: цепочка аннулируется.
// 12) Жертва chặt выходит, перерубив в ответ: цепочка аннулируется.

use tienlen_engine::domain::card::{parse_cards, Card};
use tienlen_engine::domain::deck::{deal_cards, generate_deck};
use tienlen_engine::domain::game::GameOutcome;
use tienlen_engine::domain::points::Points;
use tienlen_engine::engine::{
    apply_action, check_turn_timeout, legal_plays, start_game, start_game_with_hands,
    EngineError, GameEventKind, GameSetup, GameState, GameStatus, PlayerAction, RoundEndReason,
};
use tienlen_engine::eval::{find_combinations_containing, CutTarget, InstantWinType};
use tienlen_engine::infra::DeterministicRng;
use tienlen_engine::time_ctrl::{AutoActionDecision, TurnTimeRules};

// ---------------------------------------------------
// ВСПОМОГАТЕЛЬНЫЕ КОНСТРУКТОРЫ
// ---------------------------------------------------

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

/// Отсортированная колода, розданная по кругу: у места i все карты масти i.
fn suit_hands() -> Vec<Vec<Card>> {
    deal_cards(&generate_deck(), 4).unwrap().hands
}

/// Раздача, где у места 1 tứ quý девяток, у остальных ничего особого.
fn cut_hands() -> Vec<Vec<Card>> {
    vec![
        cards("2h 3s 3d 4c 5d 6h 7s 8c 10d Jh Qs Kc Ad"),
        cards("9s 9c 9d 9h 3c 4s 5s 6s 7c 8s 10s Js Qc"),
        cards("2s 3h 4d 4h 5c 6d 7d 8d 10c Jc Qd Ks As"),
        cards("5h 6c 7h 8h 10h Jd Qh Kd Kh Ac Ah 2c 2d"),
    ]
}

fn start(setup: GameSetup, hands: Vec<Vec<Card>>) -> GameState {
    let (state, status) = start_game_with_hands(&setup, hands, 0).unwrap();
    assert_eq!(status, GameStatus::InProgress);
    state
}

fn play(state: &GameState, seat: u8, s: &str) -> (GameState, GameStatus) {
    apply_action(state, PlayerAction::play(seat, cards(s)), 0)
        .unwrap_or_else(|e| panic!("место {seat} не смогло сыграть {s}: {e}"))
}

fn pass(state: &GameState, seat: u8) -> GameState {
    let (next, status) = apply_action(state, PlayerAction::pass(seat), 0)
        .unwrap_or_else(|e| panic!("место {seat} не смогло спасовать: {e}"));
    assert_eq!(status, GameStatus::InProgress);
    next
}

fn events(state: &GameState) -> Vec<GameEventKind> {
    state.history.events.iter().map(|e| e.kind.clone()).collect()
}

//
// TEST 1 — первая партия: ведёт 3♠
//
#[test]
fn first_game_is_led_by_three_of_spades() {
    let state = start(GameSetup::first(1, 4), suit_hands());

    assert_eq!(state.current_seat(), 0);
    assert!(state.first_game);
    assert!(state.opening_play_pending);
    assert!(state.is_leading());
    assert_eq!(state.round.round_number, 1);
    assert!(state.seats.iter().all(|s| s.remaining() == 13));

    // Первый ход: только комбинации с 3♠.
    let legal = legal_plays(&state, 0);
    assert!(!legal.is_empty());
    assert!(legal.iter().all(|c| c.contains(Card::THREE_OF_SPADES)));
    assert_eq!(
        legal.len(),
        find_combinations_containing(&state.seats[0].hand, Card::THREE_OF_SPADES).len()
    );
    assert!(legal_plays(&state, 1).is_empty(), "не его ход");

    assert!(matches!(
        events(&state)[0],
        GameEventKind::GameStarted {
            game_id: 1,
            leader: 0,
            opening_round: true,
        }
    ));
}

//
// TEST 2 — полная короткая партия
//
#[test]
fn short_game_plays_to_the_end() {
    let state = start(GameSetup::first(1, 4), suit_hands());

    // Круг 1: sảnh 3..A пик, три паса подряд.
    let (state, status) = play(&state, 0, "3s 4s 5s 6s 7s 8s 9s 10s Js Qs Ks As");
    assert_eq!(status, GameStatus::InProgress);
    assert!(!state.opening_play_pending);
    assert_eq!(state.current_seat(), 1);

    let state = pass(&state, 1);
    let state = pass(&state, 2);
    let state = pass(&state, 3);

    // Круг 2 начинает место справа от победителя круга.
    assert_eq!(state.round.round_number, 2);
    assert_eq!(state.current_seat(), 1);
    assert!(state.is_leading());
    assert!(events(&state).contains(&GameEventKind::RoundEnded {
        round: 1,
        reason: RoundEndReason::ThreeConsecutivePasses,
        winner: 0,
        next_leader: Some(1),
    }));

    let (state, _) = play(&state, 1, "3c");
    let state = pass(&state, 2);
    let state = pass(&state, 3);
    assert_eq!(state.current_seat(), 0);

    let (state, status) = play(&state, 0, "2s");
    let outcome = status.outcome().expect("партия закончена").clone();

    assert!(state.finished);
    assert_eq!(state.winner, Some(0));
    assert_eq!(outcome.winner, 0);
    assert_eq!(outcome.rounds_played, 2);
    assert_eq!(outcome.finishing_order, vec![0, 1, 2, 3]);
    assert_eq!(outcome.ve_bet(), Some(3));
    assert!(!outcome.is_instant_win());

    // Места 2 и 3 не сыграли ни одной карты.
    assert_eq!(outcome.cong.cong_seats, vec![2, 3]);
    assert_eq!(outcome.cong.penalty_per_seat, Points(52));

    // Về bét cóng: thúi (2♥) уходит победителю.
    let thui = outcome.thui.as_ref().unwrap();
    assert_eq!(thui.payer, 3);
    assert_eq!(thui.receiver, 0);
    assert_eq!(thui.total, Points(2));

    assert!(outcome.scores.is_zero_sum());
    assert_eq!(
        outcome.scores.totals(),
        vec![Points(144), Points(-12), Points(-65), Points(-67)]
    );
    assert_eq!(outcome.final_hands[0], Vec::<Card>::new());
    assert_eq!(outcome.final_hands[1].len(), 12);

    assert!(matches!(
        state.history.last().map(|e| &e.kind),
        Some(GameEventKind::GameFinished { winner: 0, .. })
    ));
}

//
// TEST 3 — chặt одиночной heo
//
#[test]
fn cutting_single_heo_settles_at_round_end() {
    let state = start(GameSetup::next(7, 4, 0), cut_hands());
    assert_eq!(state.current_seat(), 0);
    assert!(!state.opening_play_pending);

    let (state, _) = play(&state, 0, "2h");
    assert_eq!(state.single_heo.count(), 1);

    let (state, _) = play(&state, 1, "9s 9c 9d 9h");
    assert_eq!(state.cutting_chain.entries.len(), 1);
    let entry = state.cutting_chain.head().unwrap();
    assert_eq!(entry.cut_player_index, 0);
    assert_eq!(entry.cutting_player_index, 1);
    assert_eq!(entry.penalty_points, Points(2));
    assert_eq!(state.single_heo.count(), 0);
    assert!(events(&state).contains(&GameEventKind::Cut {
        seat: 1,
        victim: 0,
        target: CutTarget::SingleHeo,
        penalty: Points(2),
    }));
    // До конца круга штраф не начислен.
    assert_eq!(state.penalties.paid(0), Points::ZERO);

    let state = pass(&state, 2);
    let state = pass(&state, 3);
    let state = pass(&state, 0);

    assert_eq!(state.round.round_number, 2);
    assert_eq!(state.current_seat(), 2);
    assert!(state.cutting_chain.is_empty());
    assert_eq!(state.penalties.paid(0), Points(2));
    assert_eq!(state.penalties.received(1), Points(2));
    assert!(events(&state).contains(&GameEventKind::CutChainSettled {
        payer: 0,
        receiver: 1,
        amount: Points(2),
    }));
}

//
// TEST 4 — ведущий круга не рубит
//
#[test]
fn round_leader_cannot_cut() {
    let state = start(GameSetup::next(7, 4, 1), cut_hands());
    assert_eq!(state.current_seat(), 1);

    let (state, _) = play(&state, 1, "3c");
    let (state, _) = play(&state, 2, "2s");
    let state = pass(&state, 3);
    let state = pass(&state, 0);
    assert_eq!(state.current_seat(), 1);

    let err = apply_action(&state, PlayerAction::play(1, cards("9s 9c 9d 9h")), 0).unwrap_err();
    assert_eq!(err, EngineError::CutNotAllowed { seat: 1 });

    // Пас для него по-прежнему допустим.
    let state = pass(&state, 1);
    assert_eq!(state.round.round_number, 2, "три паса подряд: 3, 0, 1");
    assert_eq!(state.current_seat(), 3);
}

//
// TEST 5 — tới trắng при раздаче
//
#[test]
fn instant_win_finishes_game_immediately() {
    let mut hands = suit_hands();
    // Все двойки месту 2, вместо них младшие бубны.
    hands[0].retain(|c| *c != "2s".parse::<Card>().unwrap());
    hands[0].push("3d".parse().unwrap());
    hands[1].retain(|c| *c != "2c".parse::<Card>().unwrap());
    hands[1].push("4d".parse().unwrap());
    hands[3].retain(|c| *c != "2h".parse::<Card>().unwrap());
    hands[3].push("5d".parse().unwrap());
    hands[2] = cards("2s 2c 2d 2h 6d 7d 8d 9d 10d Jd Qd Kd Ad");

    let (state, status) = start_game_with_hands(&GameSetup::first(3, 4), hands.clone(), 0).unwrap();
    let outcome = status.outcome().unwrap();

    assert!(state.finished);
    assert_eq!(outcome.winner, 2);
    assert_eq!(outcome.instant_win, Some(InstantWinType::TuQuyHeo));
    assert_eq!(outcome.rounds_played, 0);
    assert_eq!(outcome.finishing_order, vec![2, 3, 0, 1]);
    assert!(outcome.scores.is_zero_sum());
    assert_eq!(
        outcome.scores.totals(),
        vec![Points(-52), Points(-52), Points(156), Points(-52)]
    );
    assert!(outcome.thui.is_some());
    assert!(events(&state).contains(&GameEventKind::InstantWin {
        seat: 2,
        kind: InstantWinType::TuQuyHeo,
    }));

    // Без thúi в tới trắng.
    let mut setup = GameSetup::first(4, 4);
    setup.scoring.apply_thui_on_instant_win = false;
    let (_, status) = start_game_with_hands(&setup, hands, 0).unwrap();
    assert!(status.outcome().unwrap().thui.is_none());
}

//
// TEST 6 — без 3♠ ведёт самая младшая карта
//
#[test]
fn lowest_card_leads_when_three_of_spades_is_not_dealt() {
    let deck = generate_deck();
    let mut hands = vec![Vec::new(), Vec::new(), Vec::new()];
    for (i, card) in deck.cards[1..40].iter().enumerate() {
        hands[i % 3].push(*card);
    }
    // 3♣ у места 0 после раздачи; переставим её месту 1.
    hands.rotate_right(1);

    let state = start(GameSetup::first(1, 3), hands);
    assert_eq!(state.current_seat(), 1);
    assert!(state.seats[1].holds("3c".parse().unwrap()));
    assert!(!state.opening_play_pending, "3♠ не роздана – ограничения нет");

    let (state, _) = play(&state, 1, "4s");
    assert_eq!(state.current_seat(), 2);
}

//
// TEST 7 — следующую партию начинает прошлый победитель
//
#[test]
fn previous_winner_leads_next_game() {
    let state = start(GameSetup::next(2, 4, 3), cut_hands());
    assert_eq!(state.current_seat(), 3);
    assert!(!state.first_game);
    assert!(!state.opening_play_pending);

    // Любая комбинация, 3♠ не нужна.
    let (state, _) = play(&state, 3, "Kd Kh");
    assert_eq!(state.current_seat(), 0);
}

//
// TEST 8 — переходы не меняют исходное состояние
//
#[test]
fn transitions_are_pure() {
    let state = start(GameSetup::first(1, 4), suit_hands());
    let before = state.clone();

    let (next, _) = play(&state, 0, "3s");
    assert_eq!(state, before);
    assert_ne!(next, before);
    assert_eq!(next.seats[0].remaining(), 12);
    assert_eq!(state.seats[0].remaining(), 13);

    // Ошибка тоже ничего не меняет.
    assert!(apply_action(&state, PlayerAction::play(2, cards("3d")), 0).is_err());
    assert_eq!(state, before);
}

//
// TEST 9 — детерминированная раздача
//
#[test]
fn deterministic_rng_reproduces_game() {
    let setup = GameSetup::first(1, 4);
    let (a, _) = start_game(&setup, &mut DeterministicRng::from_seed(77), 0).unwrap();
    let (b, _) = start_game(&setup, &mut DeterministicRng::from_seed(77), 0).unwrap();
    assert_eq!(a, b);

    assert!(a.seats.iter().all(|s| s.remaining() == 13));
    if !a.finished {
        // В 4-х всегда роздана 3♠, и ведёт её владелец.
        assert!(a.seats[a.current_seat() as usize].holds(Card::THREE_OF_SPADES));
        assert!(a.opening_play_pending);
    }
}

//
// TEST 10 — таймер хода
//
#[test]
fn turn_timeout_reports_leader_must_play() {
    let (state, _) = start_game_with_hands(&GameSetup::first(1, 4), suit_hands(), 1_000).unwrap();
    let rules = TurnTimeRules::standard();

    assert_eq!(check_turn_timeout(&state, &rules, 20_000), AutoActionDecision::None);
    assert_eq!(
        check_turn_timeout(&state, &rules, 31_000),
        AutoActionDecision::TimedOut {
            seat: 0,
            must_lead: true,
        }
    );

    let (state, _) = apply_action(&state, PlayerAction::play(0, cards("3s")), 40_000).unwrap();
    assert_eq!(check_turn_timeout(&state, &rules, 60_000), AutoActionDecision::None);
    assert_eq!(
        check_turn_timeout(&state, &rules, 70_000),
        AutoActionDecision::TimedOut {
            seat: 1,
            must_lead: false,
        }
    );
}

/// Все места без chặt-переводов и с нулевым chặt в счёте.
fn assert_no_chat(outcome: &GameOutcome, n: u8) {
    for seat in 0..n {
        assert_eq!(outcome.penalties.paid(seat), Points::ZERO, "место {seat} платило");
        assert_eq!(outcome.penalties.received(seat), Points::ZERO, "место {seat} получило");
    }
    assert!(outcome.scores.seats.iter().all(|s| s.chat == Points::ZERO));
}

//
// TEST 11 — жертва chặt выходит обычным ходом: цепочка аннулируется
//
#[test]
fn victim_going_out_with_plain_beat_voids_chain() {
    let hands = vec![
        cards("3s 4d 5d 6d 7d 8d 9d 10s Js Qs Ks As 2c"),
        cards("2s 4s 4c 5s 5c 6s 6c 7s 7c 8s 8c 9s 9c"),
        cards("3c 3d 4h 5h 6h 7h 8h 9h 10c Jc Qc Kc Ac"),
        cards("3h 10d 10h Jd Jh Qd Qh Kd Kh Ad Ah 2d 2h"),
    ];
    let state = start(GameSetup::first(11, 4), hands);
    assert_eq!(state.current_seat(), 0);

    let (state, _) = play(&state, 0, "3s");
    let (state, _) = play(&state, 1, "2s");
    let state = pass(&state, 2);
    let (state, _) = play(&state, 3, "10d 10h Jd Jh Qd Qh");

    let head = *state.cutting_chain.head().unwrap();
    assert_eq!(head.cut_player_index, 1);
    assert_eq!(head.cutting_player_index, 3);
    assert_eq!(head.penalty_points, Points(1));

    let state = pass(&state, 0);
    // 6 đôi thông не hàng: это обычное перебивание по длине, не chặt.
    let (state, status) = play(&state, 1, "4s 4c 5s 5c 6s 6c 7s 7c 8s 8c 9s 9c");

    let outcome = status.outcome().unwrap();
    assert_eq!(outcome.winner, 1);
    assert!(outcome.scores.is_zero_sum());
    assert_no_chat(outcome, 4);

    let log = events(&state);
    assert!(log.contains(&GameEventKind::CutChainVoided));
    assert!(!log
        .iter()
        .any(|e| matches!(e, GameEventKind::CutChainSettled { .. })));
}

//
// TEST 12 — жертва chặt выходит, перерубив в ответ
//
#[test]
fn victim_going_out_with_cut_back_voids_chain() {
    let hands = vec![
        cards("3s 4s 5s 6s 7s 8s 9s 10s Qs Qc As Ac 2c"),
        cards("4c 5c 6c 7c 8c 9c 10c Jc 2s Ks Kc Kd Kh"),
        cards("3c 3d 3h 4d 4h 8d 9d 10d Jd Qd Ad 2d Js"),
        cards("5d 5h 6d 6h 7d 7h 8h 9h 10h Jh Qh Ah 2h"),
    ];
    let state = start(GameSetup::first(12, 4), hands);

    // Круг 1: место 1 забирает круг, следующий ведёт место 2.
    let (state, _) = play(&state, 0, "3s 4s 5s 6s 7s 8s 9s 10s");
    let (state, _) = play(&state, 1, "4c 5c 6c 7c 8c 9c 10c Jc");
    let state = pass(&state, 2);
    let state = pass(&state, 3);
    let state = pass(&state, 0);
    assert_eq!(state.round.round_number, 2);
    assert_eq!(state.current_seat(), 2);

    let (state, _) = play(&state, 2, "3c");
    let (state, _) = play(&state, 3, "8h");
    let state = pass(&state, 0);
    let (state, _) = play(&state, 1, "2s");
    let state = pass(&state, 2);
    let (state, _) = play(&state, 3, "5d 5h 6d 6h 7d 7h");
    assert_eq!(state.cutting_chain.head().unwrap().cut_player_index, 1);
    assert_eq!(state.current_seat(), 1);

    let (state, status) = play(&state, 1, "Ks Kc Kd Kh");

    let outcome = status.outcome().unwrap();
    assert_eq!(outcome.winner, 1);
    assert!(outcome.scores.is_zero_sum());
    assert_no_chat(outcome, 4);

    let log = events(&state);
    assert!(log.contains(&GameEventKind::CutChainVoided));
    assert!(log.iter().any(|e| matches!(
        e,
        GameEventKind::Cut {
            seat: 1,
            victim: 3,
            target: CutTarget::Hang,
            ..
        }
    )));
}
