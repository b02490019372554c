//! Process-lifetime win tally keyed by display name.

use crate::games::gomoku::{MatchResult, PlayerNames};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// One row of the tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ScoreEntry {
    name: String,
    wins: u32,
}

#[derive(Debug, Default)]
struct TallyState {
    // First-seen order; `index` points into it.
    entries: Vec<ScoreEntry>,
    index: HashMap<String, usize>,
}

/// Win counts shared by every match in the process.
///
/// Entries appear on first win and are never decremented. Safe to share
/// between concurrent sessions; each increment is serialized.
#[derive(Debug, Default)]
pub struct ScoreTally {
    state: Mutex<TallyState>,
}

impl ScoreTally {
    /// Creates an empty tally.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating score tally");
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TallyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds one win for `name`, returning the new count.
    #[instrument(skip(self))]
    pub fn increment(&self, name: &str) -> u32 {
        let mut state = self.lock();
        let slot = match state.index.get(name).copied() {
            Some(slot) => slot,
            None => {
                let slot = state.entries.len();
                state.entries.push(ScoreEntry {
                    name: name.to_string(),
                    wins: 0,
                });
                state.index.insert(name.to_string(), slot);
                slot
            }
        };
        let entry = &mut state.entries[slot];
        entry.wins += 1;
        info!(name, wins = entry.wins, "Win recorded");
        entry.wins
    }

    /// Wins for `name`; zero when absent.
    pub fn get(&self, name: &str) -> u32 {
        let state = self.lock();
        state
            .index
            .get(name)
            .map_or(0, |slot| state.entries[*slot].wins)
    }

    /// All entries, most wins first, ties in first-seen order.
    #[instrument(skip(self))]
    pub fn entries(&self) -> Vec<ScoreEntry> {
        let mut entries = self.lock().entries.clone();
        entries.sort_by(|a, b| b.wins.cmp(&a.wins));
        debug!(count = entries.len(), "Listed tally entries");
        entries
    }

    /// Credits the winner of a finished match. Draws and unfinished
    /// matches record nothing.
    #[instrument(skip(self, names))]
    pub fn record(&self, result: &MatchResult, names: &PlayerNames) -> Option<u32> {
        let winner = result.winner()?;
        Some(self.increment(names.name(winner)))
    }
}
