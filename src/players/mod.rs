//! Игроки: интерфейс принятия решений и его реализации.
//!
//! Движок не читает клавиатуру сам: на каждый ход он отправляет игроку
//! `DecisionRequest` и получает `Decision`. Так один и тот же раунд ведут
//! люди, роботы и заранее записанные сценарии.

pub mod robot;
pub mod scripted;

use core::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::domain::{Card, FieldEntry, PlayerHand, PlayerId};
use crate::engine::{EngineError, TurnKind};
use crate::eval::Combo;

pub use robot::Robot;
pub use scripted::ScriptedPlayer;

/// Запрос решения у игрока на текущий ход.
#[derive(Clone, Copy, Debug)]
pub struct DecisionRequest<'a> {
    pub player_id: PlayerId,
    /// Карты игрока (только чтение).
    pub hand: &'a PlayerHand,
    pub turn: &'a TurnKind,
    /// Верхняя рука на поле (None на первом ходе раунда).
    pub top: Option<&'a FieldEntry>,
    /// Легальные руки на этот ход. Пусто на ответном ходе = только пас.
    pub options: &'a [Combo],
}

impl DecisionRequest<'_> {
    /// Можно ли пасовать в этот ход.
    pub fn can_pass(&self) -> bool {
        matches!(self.turn, TurnKind::Response { .. })
    }
}

/// Ответ игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Decision {
    Play(Vec<Card>),
    Pass,
}

/// Источник решений для одного места за столом.
pub trait Player: Debug {
    /// Выбрать ход. Может блокироваться сколько угодно (ввод человека).
    fn act(&mut self, request: &DecisionRequest<'_>) -> Decision;

    /// Движок отклонил предыдущее решение; сразу последует новый `act`.
    fn on_rejected(&mut self, _error: &EngineError) {}
}
