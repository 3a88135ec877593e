use core::cmp::Ordering;
use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибка построения карты: неизвестный ранг/масть или битая строка.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidCard {
    #[error("Неизвестный ранг: {0}")]
    Rank(String),

    #[error("Неизвестная масть: {0}")]
    Suit(String),

    #[error("Индекс ранга вне диапазона 0..13: {0}")]
    RankIndex(u8),

    #[error("Индекс масти вне диапазона 0..4: {0}")]
    SuitIndex(u8),

    #[error("Некорректная запись карт: {0}")]
    Format(String),
}

/// Масть карты. Порядок объявления = порядок силы (♦ < ♣ < ♥ < ♠).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Diamonds = 0, // ♦
    Clubs,        // ♣
    Hearts,       // ♥
    Spades,       // ♠
}

impl Suit {
    /// Все масти от младшей к старшей.
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(idx: u8) -> Result<Self, InvalidCard> {
        Suit::ALL
            .get(idx as usize)
            .copied()
            .ok_or(InvalidCard::SuitIndex(idx))
    }

    /// Символ масти для вывода человеку.
    pub const fn glyph(self) -> char {
        match self {
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

/// Ранг карты в порядке Big Two: тройка младшая, двойка старшая.
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
    /// Все ранги от младшего к старшему (3..K, A, 2).
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

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(idx: u8) -> Result<Self, InvalidCard> {
        Rank::ALL
            .get(idx as usize)
            .copied()
            .ok_or(InvalidCard::RankIndex(idx))
    }

    fn symbol(self) -> &'static str {
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

/// Карта колоды Big Two. Неизменяемая пара (ранг, масть).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// Тройка бубен: открывает раунд и определяет первого игрока.
pub const THREE_OF_DIAMONDS: Card = Card::new(Rank::Three, Suit::Diamonds);

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Конструктор из "сырых" индексов (например, из внешнего ввода).
    pub fn from_indices(rank_idx: u8, suit_idx: u8) -> Result<Self, InvalidCard> {
        Ok(Self::new(Rank::from_index(rank_idx)?, Suit::from_index(suit_idx)?))
    }

    /// Порядковый номер карты 0..52 (ранг * 4 + масть), монотонен по силе.
    pub const fn index(self) -> u8 {
        self.rank.index() * 4 + self.suit.index()
    }

    pub fn from_index(idx: u8) -> Result<Self, InvalidCard> {
        Self::from_indices(idx / 4, idx % 4)
    }

    /// Вид `10♥`, `A♠` – для CLI.
    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.glyph())
    }
}

impl Ord for Card {
    /// Единственная функция сравнения карт: сначала ранг, потом масть.
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `10d`, `3d`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Rank {
    type Err = InvalidCard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s {
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
            _ => return Err(InvalidCard::Rank(s.to_string())),
        };
        Ok(rank)
    }
}

impl FromStr for Suit {
    type Err = InvalidCard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suit = match s {
            "d" | "D" => Suit::Diamonds,
            "c" | "C" => Suit::Clubs,
            "h" | "H" => Suit::Hearts,
            "s" | "S" => Suit::Spades,
            _ => return Err(InvalidCard::Suit(s.to_string())),
        };
        Ok(suit)
    }
}

/// Парсинг строки вида "Ah", "10d", "Td", "3c".
impl FromStr for Card {
    type Err = InvalidCard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || !(2..=3).contains(&s.len()) {
            return Err(InvalidCard::Format(s.to_string()));
        }
        let (rank_part, suit_part) = s.split_at(s.len() - 1);
        Ok(Card::new(rank_part.parse()?, suit_part.parse()?))
    }
}

/// Разобрать ход, набранный одной строкой: "Ah2dQsJcKh", "10h10s", "3d 3c".
///
/// Порядок карт не важен. Пробелы и запятые игнорируются.
pub fn parse_cards(input: &str) -> Result<Vec<Card>, InvalidCard> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect::<String>()
        .replace("10", "T");

    if compact.is_empty() || !compact.is_ascii() || compact.len() % 2 == 1 {
        return Err(InvalidCard::Format(input.to_string()));
    }

    compact
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let token = std::str::from_utf8(pair).map_err(|_| InvalidCard::Format(input.to_string()))?;
            token.parse::<Card>()
        })
        .collect()
}
