use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;
use crate::eval::Combo;

/// Один ход на столе: кто и какую комбинацию выложил.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldEntry {
    pub player_id: PlayerId,
    pub combo: Combo,
}

/// История ходов текущего раунда. Верхний (последний) ход нужно перебить.
///
/// Только дописывается во время раунда, очищается между раундами.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    entries: Vec<FieldEntry>,
}

impl Field {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn top(&self) -> Option<&FieldEntry> {
        self.entries.last()
    }

    pub fn push(&mut self, player_id: PlayerId, combo: Combo) {
        self.entries.push(FieldEntry { player_id, combo });
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
