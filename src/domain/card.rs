use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Масть карты.
///
/// Порядок объявления = порядок старшинства при равном ранге:
/// ♠ < ♣ < ♦ < ♥.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Suit {
    Spades = 0,   // ♠ (bích)
    Clubs = 1,    // ♣ (chuồn)
    Diamonds = 2, // ♦ (rô)
    Hearts = 3,   // ♥ (cơ)
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts];

    /// Порядковый номер масти (0..=3).
    pub const fn order(self) -> u8 {
        self as u8
    }

    pub const fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }
}

/// Ранг карты. Тройка самая младшая, двойка ("heo") самая старшая.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Three = 0,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    /// Порядковый номер ранга (0 = тройка, 12 = двойка).
    pub const fn order(self) -> u8 {
        self as u8
    }

    pub fn from_order(order: u8) -> Option<Rank> {
        Rank::ALL.get(order as usize).copied()
    }

    /// Двойка = "heo".
    pub const fn is_heo(self) -> bool {
        matches!(self, Rank::Two)
    }

    /// Символ ранга в текстовом виде карты.
    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
        }
    }
}

/// Карта 52-карточной колоды.
///
/// Порядок полей важен: derive(Ord) сравнивает сначала ранг, потом масть,
/// что совпадает с порядком по `value()`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Тройка пик: ею обязан начинаться первый ход первой партии.
    pub const THREE_OF_SPADES: Card = Card::new(Rank::Three, Suit::Spades);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Числовое значение 0..=51: `rank_order * 4 + suit_order`.
    pub const fn value(&self) -> u8 {
        self.rank.order() * 4 + self.suit.order()
    }

    /// Обратное к `value()`.
    pub fn from_value(value: u8) -> Option<Card> {
        let rank = Rank::from_order(value / 4)?;
        let suit = Suit::ALL[(value % 4) as usize];
        Some(Card::new(rank, suit))
    }

    /// Идентификатор карты: короткий код вида `3s`, `10h`, `2d`.
    pub fn id(&self) -> String {
        self.to_string()
    }

    pub const fn is_heo(&self) -> bool {
        self.rank.is_heo()
    }

    pub const fn is_red(&self) -> bool {
        self.suit.is_red()
    }

    /// Очки карты для подсчёта: красная heo = 4, чёрная heo = 2, остальные = 1.
    ///
    /// Это НЕ то же самое, что `heo_chat_value()`.
    pub const fn points(&self) -> u8 {
        if self.is_heo() {
            if self.is_red() {
                4
            } else {
                2
            }
        } else {
            1
        }
    }

    /// Стоимость heo для штрафа за chặt: ♠/♣ = 1, ♦/♥ = 2. Для не-heo = 0.
    pub const fn heo_chat_value(&self) -> u8 {
        if !self.is_heo() {
            0
        } else if self.is_red() {
            2
        } else {
            1
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Spades => 's',
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Card {
    /// Формат вида `3s`, `10h`, `Jd`, `2c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "3s", "10h", "Td", "2c".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_ch = s
            .chars()
            .last()
            .ok_or_else(|| "Card string is empty".to_string())?;
        let rank_part = &s[..s.len() - suit_ch.len_utf8()];

        let rank = match rank_part {
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" | "t" => Rank::Ten,
            "J" | "j" => Rank::Jack,
            "Q" | "q" => Rank::Queen,
            "K" | "k" => Rank::King,
            "A" | "a" => Rank::Ace,
            "2" => Rank::Two,
            _ => return Err(format!("Invalid rank: {rank_part:?}")),
        };

        let suit = match suit_ch {
            's' | 'S' => Suit::Spades,
            'c' | 'C' => Suit::Clubs,
            'd' | 'D' => Suit::Diamonds,
            'h' | 'H' => Suit::Hearts,
            _ => return Err(format!("Invalid suit: {suit_ch}")),
        };

        Ok(Card { rank, suit })
    }
}

/// Разобрать список карт через пробел: "3s 3c 4d".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, String> {
    s.split_whitespace().map(str::parse).collect()
}

/// Отсортировать карты по возрастанию value.
pub fn sort_cards(cards: &mut [Card]) {
    cards.sort_by_key(Card::value);
}
