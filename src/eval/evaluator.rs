use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::Hand;

use super::classifier::{categorize, ClassifiedHands};
use super::hand_rank::{describe_hand, HandCategory, HandRank};

/// Классифицированная рука: карты + категория, вычисленная один раз.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Combo {
    pub category: HandCategory,
    pub hand: Hand,
}

impl Combo {
    pub fn new(category: HandCategory, hand: Hand) -> Self {
        Self { category, hand }
    }

    /// Классифицировать произвольную руку. None – если карты не образуют
    /// ни одной категории (например, 5 разрозненных карт).
    pub fn classify(hand: Hand) -> Option<Self> {
        categorize(&hand).map(|category| Self { category, hand })
    }

    pub fn cards(&self) -> &[Card] {
        self.hand.cards()
    }

    pub fn len(&self) -> usize {
        self.hand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hand.is_empty()
    }

    pub fn rank(&self) -> HandRank {
        hand_rank_of(self.category, &self.hand)
    }

    /// Бьёт ли эта рука `target`.
    pub fn beats(&self, target: &Combo) -> bool {
        beats(self, target)
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", describe_hand(self.category), self.hand)
    }
}

/// Ключ силы руки в пределах категории.
///
/// | Категория               | primary              | secondary     |
/// |-------------------------|----------------------|---------------|
/// | Single/Pair/Triple      | старшая карта        | –             |
/// | Straight/StraightFlush  | старшая карта        | –             |
/// | FullHouse / Каре        | ранг группы 3/4 карт | –             |
/// | Flush                   | масть                | старшая карта |
pub fn hand_rank_of(category: HandCategory, hand: &Hand) -> HandRank {
    let high = hand.highest().index();
    match category {
        HandCategory::Single
        | HandCategory::Pair
        | HandCategory::Triple
        | HandCategory::Straight
        | HandCategory::StraightFlush => HandRank::from_parts(category, high, 0),
        HandCategory::Flush => HandRank::from_parts(category, hand.highest().suit.index(), high),
        HandCategory::FullHouse => HandRank::from_parts(category, group_rank(hand, 3), 0),
        HandCategory::FourOfAKindPlusKicker => HandRank::from_parts(category, group_rank(hand, 4), 0),
    }
}

/// Индекс ранга, который встречается в руке ровно `size` раз.
fn group_rank(hand: &Hand, size: usize) -> u8 {
    let mut counts = [0usize; 13];
    for card in hand.cards() {
        counts[card.rank.index() as usize] += 1;
    }
    counts.iter().position(|&c| c == size).unwrap_or(0) as u8
}

/// Бьёт ли `candidate` руку `target`.
///
/// Число карт должно совпадать. Для 5-карточных рук сначала сравнивается
/// категория (Straight < Flush < FullHouse < Каре < StraightFlush),
/// при равной категории – ключ из `hand_rank_of`. Равенство не бьёт.
pub fn beats(candidate: &Combo, target: &Combo) -> bool {
    if candidate.len() != target.len() {
        return false;
    }
    candidate.rank() > target.rank()
}

/// Все руки игрока, которыми можно перебить `target`.
///
/// Категория цели определяется повторной классификацией её карт.
/// Порядок результата: для 5 карт сначала более сильные категории
/// (StraightFlush, Каре, FullHouse, Flush), затем руки той же категории.
pub fn valid_plays(classified: &ClassifiedHands, target: &Hand) -> Vec<Combo> {
    match Combo::classify(target.clone()) {
        Some(target) => valid_plays_against(classified, &target),
        None => Vec::new(),
    }
}

/// То же, что `valid_plays`, но цель уже классифицирована.
pub fn valid_plays_against(classified: &ClassifiedHands, target: &Combo) -> Vec<Combo> {
    let categories: Vec<HandCategory> = match target.category {
        HandCategory::Single | HandCategory::Pair | HandCategory::Triple => vec![target.category],
        _ => HandCategory::FIVE_CARD_STRONGEST_FIRST
            .iter()
            .copied()
            .filter(|&cat| cat >= target.category)
            .collect(),
    };

    categories
        .into_iter()
        .flat_map(|cat| {
            classified
                .get(cat)
                .iter()
                .map(move |hand| Combo::new(cat, hand.clone()))
        })
        .filter(|combo| beats(combo, target))
        .collect()
}

/// Все руки игрока (без цели) в порядке HandCategory::ALL.
pub fn all_plays(classified: &ClassifiedHands) -> Vec<Combo> {
    classified
        .iter()
        .map(|(cat, hand)| Combo::new(cat, hand.clone()))
        .collect()
}

/// Все руки игрока, содержащие указанную карту (первый ход раунда).
pub fn plays_containing(classified: &ClassifiedHands, card: Card) -> Vec<Combo> {
    classified
        .iter()
        .filter(|(_, hand)| hand.contains(&card))
        .map(|(cat, hand)| Combo::new(cat, hand.clone()))
        .collect()
}
