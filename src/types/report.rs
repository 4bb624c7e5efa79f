use super::compact::{CompactEvent, SessionSegment};
use super::cost::Cost;
use super::elapsed::Elapsed;
use super::ids::SessionId;
use super::pricing::ModelPricing;
use super::stats::{FileStats, ToolSizeStats, ToolStats, TopConsumer, UserRequestStats};
use super::turn::Turn;
use super::usage::TokenTotals;
use crate::constants::{DEFAULT_TOP_CONSUMERS, MODEL_CONTEXT_WINDOW};
use serde::Serialize;

/// Knobs of one analysis run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    pub context_window: u64,
    pub top_consumers: usize,
    pub pricing: ModelPricing,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            context_window: MODEL_CONTEXT_WINDOW,
            top_consumers: DEFAULT_TOP_CONSUMERS,
            pricing: ModelPricing::OPUS,
        }
    }
}

/// Everything computed for one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub session_id: Option<SessionId>,
    pub project_path: Option<String>,
    pub model: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Elapsed,
    pub total_turns: usize,
    pub totals: TokenTotals,
    /// Sum of all token deltas
    pub net_token_growth: i64,
    pub peak_context: i64,
    pub peak_context_percent: f64,
    pub estimated_cost: Cost,
    pub compact_events: Vec<CompactEvent>,
    pub segments: Vec<SessionSegment>,
    pub tool_stats: Vec<ToolStats>,
    pub file_stats: Vec<FileStats>,
    pub size_stats: Vec<ToolSizeStats>,
    pub top_consumers: Vec<TopConsumer>,
    pub user_requests: Vec<UserRequestStats>,
    pub turns: Vec<Turn>,
}
