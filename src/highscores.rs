//! Results listing
//!
//! Sorted view over the records read back from the results file.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreRecord;

/// Maximum number of entries shown
pub const MAX_HIGH_SCORES: usize = 10;

/// Stored results, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<ScoreRecord>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Best `MAX_HIGH_SCORES` records; equal scores keep file order
    pub fn from_records(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        let mut entries: Vec<ScoreRecord> = records.into_iter().collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Get the rank a score would achieve (1-indexed, None if it would not be listed)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        (rank < MAX_HIGH_SCORES).then_some(rank + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
