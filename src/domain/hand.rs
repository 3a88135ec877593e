use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;

/// Допустимые размеры руки, которую можно выложить на стол.
pub const HAND_SIZES: [usize; 4] = [1, 2, 3, 5];

/// Ошибка формы руки: неверное число карт или повтор карты.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HandShapeError {
    #[error("Рука из {0} карт недопустима (только 1, 2, 3 или 5)")]
    WrongSize(usize),

    #[error("Карта {0} указана в руке дважды")]
    DuplicateCard(Card),
}

/// Конкретный набор карт для хода: 1, 2, 3 или 5 различных карт,
/// всегда отсортированных по возрастанию.
///
/// Категория (пара, стрит, ...) здесь НЕ хранится – её выводит eval.
/// В serde рука – просто массив карт; чтение идёт через `Hand::new`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Собрать руку с проверкой формы.
    pub fn new(mut cards: Vec<Card>) -> Result<Self, HandShapeError> {
        if !HAND_SIZES.contains(&cards.len()) {
            return Err(HandShapeError::WrongSize(cards.len()));
        }
        cards.sort();
        if let Some(w) = cards.windows(2).find(|w| w[0] == w[1]) {
            return Err(HandShapeError::DuplicateCard(w[0]));
        }
        Ok(Self { cards })
    }

    /// Для уже отсортированных и проверенных комбинаций из классификатора.
    pub(crate) fn from_sorted_unchecked(cards: Vec<Card>) -> Self {
        debug_assert!(cards.windows(2).all(|w| w[0] < w[1]));
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Старшая карта (последняя после сортировки).
    pub fn highest(&self) -> Card {
        // Пустых рук не бывает: и конструкторы, и serde идут через проверку формы.
        self.cards[self.cards.len() - 1]
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.binary_search(card).is_ok()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = HandShapeError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Hand::new(cards)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}
