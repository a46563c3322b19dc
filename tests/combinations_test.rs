//! Тесты оценки комбинаций:
//! - определение формы (single … four_of_kind);
//! - сравнение и перебивание;
//! - правила chặt;
//! - перебор комбинаций в руке и поиск hàng.

use std::cmp::Ordering;

use tienlen_engine::domain::card::{parse_cards, Card};
use tienlen_engine::domain::combination::{CardCombination, CombinationType};
use tienlen_engine::engine::EngineError;
use tienlen_engine::eval::{
    all_combinations, can_beat_combination, can_cut, compare_combinations, cut_target,
    detect_combination, find_beating_combinations, find_combinations_containing,
    find_hang_in_hand, CutTarget,
};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn combo(s: &str) -> CardCombination {
    detect_combination(&cards(s)).unwrap_or_else(|| panic!("{s} должна быть комбинацией"))
}

fn kind(s: &str) -> Option<CombinationType> {
    detect_combination(&cards(s)).map(|c| c.kind)
}

//
// TEST 1 — базовые формы
//
#[test]
fn detects_basic_shapes() {
    assert_eq!(kind("7h"), Some(CombinationType::Single));
    assert_eq!(kind("7h 7s"), Some(CombinationType::Pair));
    assert_eq!(kind("7h 7s 7d"), Some(CombinationType::Triple));
    assert_eq!(kind("9s 9c 9d 9h"), Some(CombinationType::FourOfKind));
    assert_eq!(kind("2s 2c 2d 2h"), Some(CombinationType::FourOfKind));
    assert_eq!(kind("2s 2h"), Some(CombinationType::Pair));

    assert_eq!(kind("7h 8s"), None);
    assert_eq!(kind("7h 7s 8d"), None);
    assert_eq!(kind(""), None);
}

//
// TEST 2 — sảnh
//
#[test]
fn detects_straights() {
    assert_eq!(kind("3s 4c 5d"), Some(CombinationType::Straight));
    assert_eq!(kind("5d 3s 4c"), Some(CombinationType::Straight), "порядок не важен");
    assert_eq!(
        kind("3s 4s 5s 6s 7s 8s 9s 10s Js Qs Ks As"),
        Some(CombinationType::Straight)
    );

    assert_eq!(kind("Qs Kc Ad 2h"), None, "двойка в sảnh запрещена");
    assert_eq!(kind("Ks Ad 2h"), None);
    assert_eq!(kind("3s 4c 6d"), None, "пропуск ранга");
    assert_eq!(kind("3s 4c"), None, "меньше трёх карт");
}

//
// TEST 3 — đôi thông
//
#[test]
fn detects_consecutive_pairs() {
    let three = combo("3s 3c 4d 4h 5s 5c");
    assert_eq!(three.kind, CombinationType::ConsecutivePairs);
    assert_eq!(three.pair_count(), 3);
    assert!(three.is_hang());

    let four = combo("7s 7c 8d 8h 9s 9c 10d 10h");
    assert_eq!(four.pair_count(), 4);
    assert!(four.is_hang());

    let five = combo("3s 3c 4d 4h 5s 5c 6s 6c 7s 7c");
    assert_eq!(five.kind, CombinationType::ConsecutivePairs);
    assert!(!five.is_hang(), "5 đôi thông не hàng");

    assert_eq!(kind("3s 3c 4d 4h"), None, "две пары подряд не комбинация");
    assert_eq!(kind("Qs Qc Kd Kh As Ac 2s 2c"), None, "двойки в đôi thông нельзя");
    assert_eq!(kind("3s 3c 4d 4h 6s 6c"), None);
    assert_eq!(kind("3s 3c 3d 4h 5s 5c"), None);
}

//
// TEST 4 — карты внутри комбинации отсортированы
//
#[test]
fn combination_cards_are_sorted() {
    let c = combo("5h 3s 4c");
    assert_eq!(c.cards, cards("3s 4c 5h"));
    assert_eq!(c.highest_card(), Some("5h".parse::<Card>().unwrap()));
    assert_eq!(c.to_string(), "straight[3s 4c 5h]");
}

//
// TEST 5 — сравнение одного типа
//
#[test]
fn compares_same_type() {
    assert_eq!(
        compare_combinations(&combo("7h"), &combo("7s")).unwrap(),
        Ordering::Greater,
        "при равном ранге решает масть"
    );
    assert_eq!(
        compare_combinations(&combo("2s"), &combo("Ah")).unwrap(),
        Ordering::Greater
    );
    assert_eq!(
        compare_combinations(&combo("8s 8c"), &combo("7d 7h")).unwrap(),
        Ordering::Greater
    );
    // Длиннее sảnh старше, даже если младше по карте.
    assert_eq!(
        compare_combinations(&combo("3s 4s 5s 6s"), &combo("Js Qs Ks")).unwrap(),
        Ordering::Greater
    );
    assert_eq!(
        compare_combinations(&combo("4s 5s 6h"), &combo("4c 5c 6d")).unwrap(),
        Ordering::Greater
    );
    assert_eq!(
        compare_combinations(&combo("9s 9c 9d 9h"), &combo("8s 8c 8d 8h")).unwrap(),
        Ordering::Greater
    );
}

//
// TEST 6 — разные типы сравнивать нельзя
//
#[test]
fn comparing_different_types_is_an_error() {
    let err = compare_combinations(&combo("7h"), &combo("7s 7c")).unwrap_err();
    assert_eq!(
        err,
        EngineError::CombinationTypeMismatch {
            left: CombinationType::Single,
            right: CombinationType::Pair,
        }
    );
    assert!(!can_beat_combination(&combo("9s 9c 9d 9h"), &combo("2h")));
}

//
// TEST 7 — can_beat: строго старше
//
#[test]
fn beats_only_strictly_greater() {
    assert!(can_beat_combination(&combo("2h"), &combo("2s")));
    assert!(!can_beat_combination(&combo("2s"), &combo("2h")));
    assert!(!can_beat_combination(&combo("Kh"), &combo("Kh")));
    assert!(can_beat_combination(
        &combo("4s 4c 5d 5h 6s 6c 7s 7c"),
        &combo("3s 3c 4d 4h 5s 5c")
    ));
}

//
// TEST 8 — chặt одиночной heo
//
#[test]
fn any_hang_cuts_single_heo() {
    let heo = combo("2h");
    assert_eq!(cut_target(&heo), Some(CutTarget::SingleHeo));
    assert_eq!(
        can_cut(&combo("3s 3c 4d 4h 5s 5c"), &heo),
        Some(CutTarget::SingleHeo)
    );
    assert_eq!(can_cut(&combo("9s 9c 9d 9h"), &heo), Some(CutTarget::SingleHeo));
    assert_eq!(
        can_cut(&combo("7s 7c 8d 8h 9s 9c 10d 10h"), &heo),
        Some(CutTarget::SingleHeo)
    );
    assert_eq!(can_cut(&combo("Ah"), &heo), None, "одиночка не hàng");
}

//
// TEST 9 — chặt пары heo
//
#[test]
fn heo_pair_needs_four_of_kind_or_four_pairs() {
    let pair = combo("2s 2d");
    assert_eq!(cut_target(&pair), Some(CutTarget::HeoPair));
    assert_eq!(can_cut(&combo("3s 3c 4d 4h 5s 5c"), &pair), None);
    assert_eq!(can_cut(&combo("5s 5c 5d 5h"), &pair), Some(CutTarget::HeoPair));
    assert_eq!(
        can_cut(&combo("7s 7c 8d 8h 9s 9c 10d 10h"), &pair),
        Some(CutTarget::HeoPair)
    );
}

//
// TEST 10 — chặt hàng
//
#[test]
fn hang_cuts_hang() {
    let three_pairs = combo("6s 6c 7d 7h 8s 8c");
    let higher_three_pairs = combo("7s 7c 8d 8h 9s 9c");
    let quad = combo("4s 4c 4d 4h");
    let higher_quad = combo("Js Jc Jd Jh");
    let four_pairs = combo("3s 3c 4d 4h 5s 5c 6d 6h");

    assert_eq!(cut_target(&three_pairs), Some(CutTarget::Hang));
    assert_eq!(can_cut(&higher_three_pairs, &three_pairs), Some(CutTarget::Hang));
    assert_eq!(can_cut(&three_pairs, &higher_three_pairs), None);

    assert_eq!(can_cut(&quad, &three_pairs), Some(CutTarget::Hang), "tứ quý рубит 3 đôi thông");
    assert_eq!(can_cut(&three_pairs, &quad), None);

    assert_eq!(can_cut(&higher_quad, &quad), Some(CutTarget::Hang));
    assert_eq!(can_cut(&quad, &higher_quad), None);

    assert_eq!(can_cut(&four_pairs, &higher_quad), Some(CutTarget::Hang), "4 đôi thông рубят tứ quý");
    assert_eq!(can_cut(&higher_quad, &four_pairs), None);
    assert_eq!(can_cut(&four_pairs, &three_pairs), Some(CutTarget::Hang));

    // Не-heo и не-hàng рубить нечего.
    assert_eq!(cut_target(&combo("Ah")), None);
    assert_eq!(can_cut(&quad, &combo("As Ac")), None);
}

//
// TEST 11 — перебор комбинаций
//
#[test]
fn enumerates_all_combinations_of_a_hand() {
    let hand = cards("3s 3c 4d 5h");
    let all = all_combinations(&hand);

    let count = |k: CombinationType| all.iter().filter(|c| c.kind == k).count();
    assert_eq!(count(CombinationType::Single), 4);
    assert_eq!(count(CombinationType::Pair), 1);
    // 3-4-5 с любой из двух троек.
    assert_eq!(count(CombinationType::Straight), 2);
    assert_eq!(all.len(), 7);

    // Отсортировано по типу.
    assert_eq!(all[0].kind, CombinationType::Single);
    assert_eq!(all.last().unwrap().kind, CombinationType::Straight);

    assert!(all_combinations(&[]).is_empty());
}

//
// TEST 12 — комбинации с обязательной картой
//
#[test]
fn combinations_containing_a_card() {
    let hand = cards("3s 3c 4d 5h 9h");
    let with_3s = find_combinations_containing(&hand, Card::THREE_OF_SPADES);
    assert!(!with_3s.is_empty());
    assert!(with_3s.iter().all(|c| c.contains(Card::THREE_OF_SPADES)));
    assert_eq!(with_3s.len(), 3, "3s, 3s3c, 3s4d5h");

    assert!(find_combinations_containing(&hand, "2h".parse().unwrap()).is_empty());
}

//
// TEST 13 — чем можно ответить
//
#[test]
fn beating_combinations_include_cuts() {
    let hand = cards("3s 9s 9c 9d 9h Ah");
    let last = combo("2s");
    let replies = find_beating_combinations(&hand, Some(&last));

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].kind, CombinationType::FourOfKind);

    let last = combo("Kd");
    let replies = find_beating_combinations(&hand, Some(&last));
    assert_eq!(replies.len(), 1, "только Ah старше Kd");
    assert_eq!(replies[0].cards, cards("Ah"));

    assert_eq!(
        find_beating_combinations(&hand, None).len(),
        all_combinations(&hand).len()
    );
}

//
// TEST 14 — жадный поиск hàng
//
#[test]
fn finds_disjoint_hang_greedily() {
    // tứ quý пятёрок забирает пятёрки, 3 đôi thông из 3-4-5 уже не собрать.
    let hand = cards("3s 3c 4d 4h 5s 5c 5d 5h 8s 8c 9d 9h 10s 10c");
    let hang = find_hang_in_hand(&hand);
    assert_eq!(hang.len(), 2);
    assert_eq!(hang[0].kind, CombinationType::FourOfKind);
    assert_eq!(hang[1].kind, CombinationType::ConsecutivePairs);
    assert_eq!(hang[1].pair_count(), 3);

    // Сначала окна по 4 пары.
    let hand = cards("6s 6c 7d 7h 8s 8c 9d 9h");
    let hang = find_hang_in_hand(&hand);
    assert_eq!(hang.len(), 1);
    assert_eq!(hang[0].pair_count(), 4);

    assert!(find_hang_in_hand(&cards("3s 3c 4d 4h 6s 6c")).is_empty());
}
