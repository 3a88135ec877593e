use std::collections::HashMap;

use log::info;

use crate::domain::table::{Table, TableConfig};
use crate::domain::{PlayerId, RoundId, TableId};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{start_round, RoundSummary};
use crate::engine::runner::{run_round, RoundObserver};
use crate::engine::RandomSource;
use crate::players::Player;

/// Серия раундов за одним столом ("сыграть ещё раз").
///
/// Между раундами руки и поле очищаются, счёт побед сохраняется.
#[derive(Debug)]
pub struct GameSession {
    table: Table,
    next_round_id: RoundId,
    wins: HashMap<PlayerId, u32>,
    summaries: Vec<RoundSummary>,
}

impl GameSession {
    /// Создать сессию. Конфиг проверяется сразу.
    pub fn new(table_id: TableId, name: String, config: TableConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            table: Table::new(table_id, name, config),
            next_round_id: 1,
            wins: HashMap::new(),
            summaries: Vec::new(),
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn rounds_played(&self) -> usize {
        self.summaries.len()
    }

    pub fn wins(&self, player_id: PlayerId) -> u32 {
        self.wins.get(&player_id).copied().unwrap_or(0)
    }

    pub fn summaries(&self) -> &[RoundSummary] {
        &self.summaries
    }

    /// Раздать, сыграть раунд до победителя и записать результат.
    pub fn play_round<R: RandomSource>(
        &mut self,
        rng: &mut R,
        players: &mut [Box<dyn Player>],
        observer: &mut dyn RoundObserver,
    ) -> Result<RoundSummary, EngineError> {
        let round_id = self.next_round_id;
        let mut engine = start_round(&mut self.table, rng, round_id)?;
        self.next_round_id += 1;

        let summary = run_round(&mut self.table, &mut engine, players, observer)?;

        *self.wins.entry(summary.winner).or_insert(0) += 1;
        self.summaries.push(summary.clone());
        info!(
            "table {}: {} round(s) played, player {} has {} win(s)",
            self.table.id,
            self.summaries.len(),
            summary.winner,
            self.wins(summary.winner)
        );

        Ok(summary)
    }
}
