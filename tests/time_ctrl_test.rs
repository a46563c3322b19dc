//! Тесты контроля времени хода:
//! - правила и профили;
//! - TurnClock;
//! - check_timeout.

use tienlen_engine::engine::positions::{create_turn_order, start_turn_timer};
use tienlen_engine::time_ctrl::{
    check_timeout, AutoActionDecision, TimeProfile, TurnClock, TurnTimeRules,
    DEFAULT_TURN_TIMEOUT_MS,
};

#[test]
fn rules_and_profiles() {
    assert_eq!(TurnTimeRules::default().turn_timeout_ms, DEFAULT_TURN_TIMEOUT_MS);
    assert_eq!(TurnTimeRules::standard(), TurnTimeRules::new(30_000));
    assert_eq!(
        TurnTimeRules::from_profile(TimeProfile::Fast).turn_timeout_ms,
        15_000
    );
    assert_eq!(
        TurnTimeRules::from_profile(TimeProfile::Standard),
        TurnTimeRules::standard()
    );
}

#[test]
fn clock_counts_elapsed_and_remaining() {
    let rules = TurnTimeRules::new(10_000);
    let clock = TurnClock::start(2, 1_000, &rules);

    assert_eq!(clock.elapsed_ms(4_000), 3_000);
    assert_eq!(clock.remaining_ms(4_000), 7_000);
    assert!(!clock.is_timed_out(10_999));
    assert!(clock.is_timed_out(11_000));
    assert_eq!(clock.remaining_ms(50_000), 0);
    // Часы хоста "назад" не дают переполнения.
    assert_eq!(clock.elapsed_ms(500), 0);
}

#[test]
fn clock_for_turn_requires_started_timer() {
    let rules = TurnTimeRules::standard();
    let turn = create_turn_order(4, 1).unwrap();
    assert!(TurnClock::for_turn(&turn, &rules).is_none());

    let turn = start_turn_timer(&turn, 5_000);
    let clock = TurnClock::for_turn(&turn, &rules).unwrap();
    assert_eq!(clock.seat, 1);
    assert_eq!(clock.started_at_ms, 5_000);
}

#[test]
fn timeout_decision() {
    let rules = TurnTimeRules::new(1_000);
    let turn = create_turn_order(3, 2).unwrap();

    assert_eq!(check_timeout(&turn, &rules, 99_999, true), AutoActionDecision::None);

    let turn = start_turn_timer(&turn, 10_000);
    assert_eq!(check_timeout(&turn, &rules, 10_500, false), AutoActionDecision::None);
    assert_eq!(
        check_timeout(&turn, &rules, 11_000, false),
        AutoActionDecision::TimedOut {
            seat: 2,
            must_lead: false,
        }
    );
    assert_eq!(
        check_timeout(&turn, &rules, 20_000, true),
        AutoActionDecision::TimedOut {
            seat: 2,
            must_lead: true,
        }
    );
}
