use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ConfigError, DeckError, HandShapeError, InvalidCard, PlayerId};

/// Почему синтаксически корректный ход не принят.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum IllegalPlay {
    /// Первый ход раунда без тройки бубен.
    MissingOpeningCard,
    /// Рука не бьёт верхнюю руку на поле.
    DoesNotBeat,
    /// Число карт не совпадает с верхней рукой на поле.
    CardCountMismatch,
    /// Карты не образуют ни одной категории (или не совпадают с рукой из классификатора).
    NotAHand,
    /// У игрока нет части этих карт.
    CardsNotHeld,
    /// Пас на первом ходе или на свободном ходе.
    CannotPass,
}

/// Ошибки движка Big Two.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Некорректная карта: {0}")]
    InvalidCard(#[from] InvalidCard),

    #[error("Некорректная форма руки: {0}")]
    InvalidHandShape(#[from] HandShapeError),

    #[error("Недопустимый ход: {0:?}")]
    IllegalPlay(IllegalPlay),

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Игрок {0} не найден за столом")]
    PlayerNotAtTable(PlayerId),

    #[error("Некорректная колода: {0}")]
    InvalidDeck(#[from] DeckError),

    #[error("Некорректная конфигурация стола: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Раунд уже идёт")]
    RoundAlreadyInProgress,

    #[error("Раунд не активен")]
    NoActiveRound,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl From<IllegalPlay> for EngineError {
    fn from(reason: IllegalPlay) -> Self {
        EngineError::IllegalPlay(reason)
    }
}

impl EngineError {
    /// Ошибки, после которых раунд продолжается: у того же игрока
    /// просто запрашивается новое решение.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidCard(_)
                | EngineError::InvalidHandShape(_)
                | EngineError::IllegalPlay(_)
                | EngineError::NotPlayersTurn(_)
        )
    }
}
