use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::Hand;
use crate::domain::PlayerId;

/// Кто принимает решения за игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// Базовый профиль игрока – то, что не зависит от конкретного раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
}

impl PlayerProfile {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}

/// Карты на руках у игрока. Всегда отсортированы по возрастанию.
///
/// Растёт только при раздаче, уменьшается только легальным ходом.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHand {
    cards: Vec<Card>,
}

impl PlayerHand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(mut cards: Vec<Card>) -> Self {
        cards.sort();
        cards.dedup();
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

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.binary_search(card).is_ok()
    }

    /// Все ли карты руки есть у игрока.
    pub fn holds(&self, hand: &Hand) -> bool {
        hand.cards().iter().all(|c| self.contains(c))
    }

    /// Добавить карты (раздача).
    pub fn add_cards(&mut self, cards: &[Card]) {
        self.cards.extend_from_slice(cards);
        self.cards.sort();
        self.cards.dedup();
    }

    /// Убрать сыгранные карты. Проверку, что они есть, делает validation.
    pub fn remove(&mut self, hand: &Hand) {
        self.cards.retain(|c| !hand.contains(c));
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Состояние игрока за столом в текущем раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub profile: PlayerProfile,
    pub hand: PlayerHand,
    /// Что игрок уже выложил на стол в этом раунде (по порядку).
    pub played: Vec<Hand>,
}

impl PlayerAtTable {
    pub fn new(profile: PlayerProfile) -> Self {
        Self {
            profile,
            hand: PlayerHand::new(),
            played: Vec::new(),
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.profile.id
    }

    /// Сброс перед новым раундом.
    pub fn reset(&mut self) {
        self.hand.clear();
        self.played.clear();
    }
}
