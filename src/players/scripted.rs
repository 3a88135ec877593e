use std::collections::VecDeque;

use crate::engine::EngineError;

use super::{Decision, DecisionRequest, Player, Robot};

/// Игрок, который отдаёт заранее записанные решения по очереди.
///
/// Когда сценарий закончился, ходит как `Robot`. Все отказы движка
/// сохраняются в `rejections` (удобно проверять в тестах).
#[derive(Clone, Debug, Default)]
pub struct ScriptedPlayer {
    script: VecDeque<Decision>,
    fallback: Robot,
    pub rejections: Vec<EngineError>,
}

impl ScriptedPlayer {
    pub fn new(script: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: Robot::new(),
            rejections: Vec::new(),
        }
    }

    /// Сколько записанных решений ещё не использовано.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Player for ScriptedPlayer {
    fn act(&mut self, request: &DecisionRequest<'_>) -> Decision {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.choose(request))
    }

    fn on_rejected(&mut self, error: &EngineError) {
        self.rejections.push(error.clone());
    }
}
