use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::{PlayerId, RoundId, SeatIndex, TableId};
use crate::eval::Combo;

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundEventKind {
    /// Новый раунд начался. `turn_order` – игроки в порядке хода.
    RoundStarted {
        table_id: TableId,
        round_id: RoundId,
        turn_order: Vec<PlayerId>,
    },

    /// Игрок получил карты при раздаче.
    CardsDealt {
        seat: SeatIndex,
        player_id: PlayerId,
        cards: Vec<Card>,
    },

    /// Игрок выложил руку на поле.
    HandPlayed {
        player_id: PlayerId,
        combo: Combo,
        cards_left: usize,
    },

    /// Игрок пропустил ход.
    Passed { player_id: PlayerId },

    /// Игрок избавился от всех карт – раунд окончен.
    RoundWon { player_id: PlayerId, round_id: RoundId },
}

/// Событие в раунде с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Полная история раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }

    /// События, начиная с порядкового номера `from` (для наблюдателей).
    pub fn since(&self, from: usize) -> &[RoundEvent] {
        self.events.get(from..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
