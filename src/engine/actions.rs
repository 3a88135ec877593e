use serde::{Deserialize, Serialize};

use crate::domain::{Card, PlayerId};

/// Тип действия игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    /// Выложить карты (порядок не важен, движок сам найдёт категорию).
    Play(Vec<Card>),
    /// Пропустить ход.
    Pass,
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn play(player_id: PlayerId, cards: Vec<Card>) -> Self {
        Self {
            player_id,
            kind: PlayerActionKind::Play(cards),
        }
    }

    pub fn pass(player_id: PlayerId) -> Self {
        Self {
            player_id,
            kind: PlayerActionKind::Pass,
        }
    }
}
