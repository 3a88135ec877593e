use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::player::PlayerHand;

/// Размер полной колоды.
pub const DECK_SIZE: usize = 52;

/// Нарушение предусловий колоды/раздачи. Ловится ДО старта раунда.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("В колоде {0} карт, ожидалось 52")]
    WrongSize(usize),

    #[error("Карта {0} встречается в колоде дважды")]
    Duplicate(Card),

    #[error("Нельзя раздать {players} игрокам по {hand_size} карт из {available}")]
    NotEnoughCards {
        players: usize,
        hand_size: usize,
        available: usize,
    },

    #[error("Раздано {got} рук, а мест за столом {expected}")]
    HandCount { expected: usize, got: usize },

    #[error("Рука из {got} карт, ожидалось {expected}")]
    HandSize { expected: usize, got: usize },
}

/// Колода карт. В домене — просто упорядоченный список карт.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода по возрастанию силы:
    /// 3♦ 3♣ 3♥ 3♠ 4♦ ... 2♠.
    pub fn standard_52() -> Self {
        let cards = Rank::ALL
            .iter()
            .flat_map(|&rank| Suit::ALL.iter().map(move |&suit| Card::new(rank, suit)))
            .collect();
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Проверка инварианта: ровно 52 различные карты.
    pub fn validate(&self) -> Result<(), DeckError> {
        if self.cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize(self.cards.len()));
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for card in &self.cards {
            if !seen.insert(*card) {
                return Err(DeckError::Duplicate(*card));
            }
        }
        Ok(())
    }

    /// Взять n карт сверху.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let keep = self.cards.len().saturating_sub(n);
        self.cards.split_off(keep)
    }

    /// Разделить колоду на `players` непересекающихся рук по `hand_size` карт.
    ///
    /// Колода расходуется: розданные карты из неё удаляются.
    pub fn deal(&mut self, players: usize, hand_size: usize) -> Result<Vec<PlayerHand>, DeckError> {
        self.validate()?;
        let needed = players.checked_mul(hand_size);
        if needed.map_or(true, |n| n > self.cards.len()) {
            return Err(DeckError::NotEnoughCards {
                players,
                hand_size,
                available: self.cards.len(),
            });
        }

        Ok((0..players)
            .map(|_| PlayerHand::from_cards(self.draw_n(hand_size)))
            .collect())
    }
}
