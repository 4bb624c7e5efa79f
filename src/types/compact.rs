use super::elapsed::Elapsed;
use super::turn::Turn;
use serde::Serialize;

/// A large context drop between two consecutive turns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactEvent {
    /// Turn at which the drop was observed
    pub turn_index: usize,
    pub timestamp: String,
    pub before_tokens: i64,
    pub after_tokens: i64,
    pub tokens_saved: i64,
}

/// A contiguous run of turns between compaction boundaries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSegment {
    pub index: usize,
    pub label: String,
    pub start_turn: usize,
    /// Inclusive
    pub end_turn: usize,
    pub turns: Vec<Turn>,
    pub peak_context: i64,
    pub peak_context_percent: f64,
    pub total_tokens: i64,
    pub duration: Elapsed,
    pub start_time: String,
    pub end_time: String,
}

impl SessionSegment {
    #[inline]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }
}
