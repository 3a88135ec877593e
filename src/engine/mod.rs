//! Движок раунда Big Two: очередь ходов, проверка ходов, поле, победитель.
//!
//! Высокоуровневый объект: `RoundEngine`
//! Основные операции:
//!   - `start_round` – раздать карты и определить порядок хода
//!   - `apply_action` – применить ход или пас игрока
//!   - `run_round` – провести раунд, запрашивая решения у `Player`

pub mod actions;
pub mod errors;
pub mod game_loop;
pub mod positions;
pub mod round_history;
pub mod runner;
pub mod session;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::{EngineError, IllegalPlay};
pub use game_loop::{
    apply_action, start_round, start_round_with_deck, start_round_with_hands, RoundEngine,
    RoundPhase, RoundStatus, RoundSummary, TurnKind,
};
pub use round_history::{RoundEvent, RoundEventKind, RoundHistory};
pub use runner::{run_round, NoopObserver, RoundObserver};
pub use session::GameSession;

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
