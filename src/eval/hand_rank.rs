use serde::{Deserialize, Serialize};

/// Категория руки Big Two.
///
/// Порядок объявления совпадает с силой для 5-карточных рук:
/// Straight < Flush < FullHouse < FourOfAKindPlusKicker < StraightFlush.
/// Одиночки/пары/тройки между собой не сравниваются (разное число карт).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandCategory {
    Single = 0,
    Pair = 1,
    Triple = 2,
    Straight = 3,
    Flush = 4,
    FullHouse = 5,
    FourOfAKindPlusKicker = 6,
    StraightFlush = 7,
}

impl HandCategory {
    /// Все категории от самой "короткой" к самой сильной.
    pub const ALL: [HandCategory; 8] = [
        HandCategory::Single,
        HandCategory::Pair,
        HandCategory::Triple,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKindPlusKicker,
        HandCategory::StraightFlush,
    ];

    /// 5-карточные категории от сильнейшей к слабейшей.
    pub const FIVE_CARD_STRONGEST_FIRST: [HandCategory; 5] = [
        HandCategory::StraightFlush,
        HandCategory::FourOfAKindPlusKicker,
        HandCategory::FullHouse,
        HandCategory::Flush,
        HandCategory::Straight,
    ];

    pub const fn card_count(self) -> usize {
        match self {
            HandCategory::Single => 1,
            HandCategory::Pair => 2,
            HandCategory::Triple => 3,
            _ => 5,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Упакованный ключ силы руки. Больше = сильнее (в пределах одного числа карт).
///
/// Схема кодирования (u32):
///   [категория:4 бита][primary:8][secondary:8]
/// primary/secondary – индексы карт (0..52), рангов (0..13) или мастей (0..4),
/// в зависимости от категории (см. eval::evaluator::hand_rank_of).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

impl HandRank {
    pub fn from_parts(category: HandCategory, primary: u8, secondary: u8) -> Self {
        let cat_bits = (category as u32) & 0x0F;
        HandRank((cat_bits << 16) | ((primary as u32) << 8) | (secondary as u32))
    }
}

/// Человеческое описание категории.
pub fn describe_hand(category: HandCategory) -> &'static str {
    match category {
        HandCategory::Single => "Single",
        HandCategory::Pair => "Pair",
        HandCategory::Triple => "Triple",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKindPlusKicker => "Four of a kind + kicker",
        HandCategory::StraightFlush => "Straight flush",
    }
}
