use crate::engine::TurnKind;

use super::{Decision, DecisionRequest, Player};

/// Детерминированный компьютерный игрок.
///
/// - первый ход: самая короткая рука с тройкой бубен;
/// - свободный ход: первая рука самой короткой непустой категории;
/// - ответ: первая бьющая рука из генератора, иначе пас.
#[derive(Clone, Debug, Default)]
pub struct Robot;

impl Robot {
    pub fn new() -> Self {
        Self
    }

    pub fn choose(&self, request: &DecisionRequest<'_>) -> Decision {
        let chosen = match request.turn {
            TurnKind::Opening => request.options.iter().min_by_key(|c| c.len()),
            TurnKind::FreeTurn | TurnKind::Response { .. } => request.options.first(),
        };
        match chosen {
            Some(combo) => Decision::Play(combo.cards().to_vec()),
            None => Decision::Pass,
        }
    }
}

impl Player for Robot {
    fn act(&mut self, request: &DecisionRequest<'_>) -> Decision {
        self.choose(request)
    }
}
