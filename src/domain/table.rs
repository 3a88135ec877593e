use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::deck::DECK_SIZE;
use crate::domain::field::Field;
use crate::domain::player::{PlayerAtTable, PlayerKind, PlayerProfile};
use crate::domain::{PlayerId, RoundId, TableId};

/// Индекс места за столом (0..3).
pub type SeatIndex = u8;

/// Big Two всегда играется вчетвером.
pub const PLAYERS_PER_TABLE: usize = 4;

/// Стандартный размер руки при раздаче (52 / 4).
pub const STANDARD_HAND_SIZE: usize = 13;

/// Ошибки конфигурации стола.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("За столом должно быть ровно 4 игрока, указано {0}")]
    WrongPlayerCount(usize),

    #[error("Игрок с id={0} указан дважды")]
    DuplicatePlayer(PlayerId),

    #[error("Раздача {players} x {hand_size} не покрывает колоду из 52 карт")]
    HandSizeMismatch { players: usize, hand_size: usize },

    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(String),
}

/// Конфиг стола: кто сидит и по сколько карт раздаём.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Игроки в порядке мест (индекс = SeatIndex).
    pub players: Vec<PlayerProfile>,
    /// Сколько карт получает каждый игрок.
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
}

fn default_hand_size() -> usize {
    STANDARD_HAND_SIZE
}

impl TableConfig {
    pub fn new(players: Vec<PlayerProfile>) -> Self {
        Self {
            players,
            hand_size: STANDARD_HAND_SIZE,
        }
    }

    /// Конфиг по умолчанию: один человек на месте 0 и три компьютера.
    pub fn standard() -> Self {
        let players = (0..PLAYERS_PER_TABLE as u64)
            .map(|i| {
                if i == 0 {
                    PlayerProfile::new(1, "You", PlayerKind::Human)
                } else {
                    PlayerProfile::new(i + 1, format!("Robot{i}"), PlayerKind::Computer)
                }
            })
            .collect();
        Self::new(players)
    }

    /// Четыре компьютерных игрока (авто-партии, тесты).
    pub fn robots_only() -> Self {
        let players = (0..PLAYERS_PER_TABLE as u64)
            .map(|i| PlayerProfile::new(i + 1, format!("Robot{}", i + 1), PlayerKind::Computer))
            .collect();
        Self::new(players)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() != PLAYERS_PER_TABLE {
            return Err(ConfigError::WrongPlayerCount(self.players.len()));
        }
        let mut ids = HashSet::new();
        for p in &self.players {
            if !ids.insert(p.id) {
                return Err(ConfigError::DuplicatePlayer(p.id));
            }
        }
        if self.players.len().checked_mul(self.hand_size) != Some(DECK_SIZE) {
            return Err(ConfigError::HandSizeMismatch {
                players: self.players.len(),
                hand_size: self.hand_size,
            });
        }
        Ok(())
    }
}

/// Основное состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    pub seats: Vec<PlayerAtTable>,

    /// Ходы текущего раунда.
    pub field: Field,

    /// ID текущего раунда (если он идёт).
    pub current_round_id: Option<RoundId>,

    /// Идёт ли сейчас раунд (true), либо стол ждёт начала нового.
    pub round_in_progress: bool,
}

impl Table {
    /// Создать стол и рассадить игроков из конфига.
    pub fn new(id: TableId, name: String, config: TableConfig) -> Self {
        let seats = config
            .players
            .iter()
            .cloned()
            .map(PlayerAtTable::new)
            .collect();
        Self {
            id,
            name,
            config,
            seats,
            field: Field::new(),
            current_round_id: None,
            round_in_progress: false,
        }
    }

    pub fn seated_count(&self) -> usize {
        self.seats.len()
    }

    pub fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|p| p.player_id() == player_id)
            .map(|idx| idx as SeatIndex)
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&PlayerAtTable> {
        self.seats.get(seat as usize)
    }

    pub fn player_mut(&mut self, seat: SeatIndex) -> Option<&mut PlayerAtTable> {
        self.seats.get_mut(seat as usize)
    }

    /// У кого на руках указанная карта.
    pub fn holder_of(&self, card: &Card) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|p| p.hand.contains(card))
            .map(|idx| idx as SeatIndex)
    }

    /// Очистить руки и поле перед новым раундом.
    pub fn reset_for_new_round(&mut self) {
        for seat in self.seats.iter_mut() {
            seat.reset();
        }
        self.field.clear();
        self.current_round_id = None;
        self.round_in_progress = false;
    }
}
