use log::warn;

use crate::domain::table::Table;
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{apply_action, RoundEngine, RoundStatus, RoundSummary};
use crate::engine::round_history::RoundEvent;
use crate::players::{Decision, DecisionRequest, Player};

/// Получатель событий раунда ("сыграна рука", "пас", "раунд выигран").
///
/// Как их показывать – решает слой представления.
pub trait RoundObserver {
    fn on_event(&mut self, event: &RoundEvent);
}

/// Наблюдатель, который ничего не делает.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl RoundObserver for NoopObserver {
    fn on_event(&mut self, _event: &RoundEvent) {}
}

impl<F: FnMut(&RoundEvent)> RoundObserver for F {
    fn on_event(&mut self, event: &RoundEvent) {
        self(event)
    }
}

/// Провести раунд до конца.
///
/// `players[i]` принимает решения за место `i`. Отклонённое решение
/// (некорректные карты, не бьёт, пас на свободном ходе...) возвращается тому же
/// игроку через `on_rejected`, после чего решение запрашивается снова.
pub fn run_round(
    table: &mut Table,
    engine: &mut RoundEngine,
    players: &mut [Box<dyn Player>],
    observer: &mut dyn RoundObserver,
) -> Result<RoundSummary, EngineError> {
    if players.len() != table.seated_count() {
        return Err(EngineError::Internal("число игроков не совпадает с числом мест"));
    }

    let mut delivered = 0usize;

    loop {
        delivered = flush_events(engine, observer, delivered);

        let seat = engine.current_actor.ok_or(EngineError::NoActiveRound)?;
        let turn = engine.turn_kind(table).ok_or(EngineError::NoActiveRound)?;
        let options = engine.legal_options(table);

        let player_ref = table.player(seat).ok_or(EngineError::Internal("пустое место"))?;
        let player_id = player_ref.player_id();
        let request = DecisionRequest {
            player_id,
            hand: &player_ref.hand,
            turn: &turn,
            top: table.field.top(),
            options: &options,
        };

        let decision = players[seat as usize].act(&request);
        let kind = match decision {
            Decision::Play(cards) => PlayerActionKind::Play(cards),
            Decision::Pass => PlayerActionKind::Pass,
        };

        match apply_action(table, engine, PlayerAction { player_id, kind }) {
            Ok(RoundStatus::Ongoing) => {}
            Ok(RoundStatus::Finished(summary, _)) => {
                flush_events(engine, observer, delivered);
                return Ok(summary);
            }
            Err(e) if e.is_recoverable() => {
                warn!("decision of player {} rejected: {}", player_id, e);
                players[seat as usize].on_rejected(&e);
            }
            Err(e) => return Err(e),
        }
    }
}

fn flush_events(engine: &RoundEngine, observer: &mut dyn RoundObserver, from: usize) -> usize {
    for event in engine.history.since(from) {
        observer.on_event(event);
    }
    engine.history.len()
}
