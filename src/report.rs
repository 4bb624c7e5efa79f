//! Assembles every analysis stage into one [`SessionReport`].

use crate::aggregate::{file_stats, size_stats, tool_stats, top_consumers, user_request_stats};
use crate::compaction::{build_segments, detect_compactions, percent_of_window};
use crate::extract::extract_turns;
use crate::types::{
    AnalysisOptions, Cost, Elapsed, LogEntry, SessionId, SessionReport, TokenTotals, Turn,
    sum_tokens,
};
use rayon::prelude::*;

/// Report over an already extracted turn sequence. Session and project
/// identifiers are left empty; [`analyze_entries`] fills them in.
pub fn build_report(turns: Vec<Turn>, options: &AnalysisOptions) -> SessionReport {
    let compact_events = detect_compactions(&turns);
    let segments = build_segments(&turns, &compact_events, options.context_window);

    let mut totals = TokenTotals::default();
    for turn in &turns {
        totals.add(&turn.usage);
    }

    let peak_context = turns.iter().map(|t| t.context_tokens).max().unwrap_or(0);
    let start_time = turns.first().map(|t| t.timestamp.clone());
    let end_time = turns.last().map(|t| t.timestamp.clone());
    let duration = match (&start_time, &end_time) {
        (Some(start), Some(end)) => Elapsed::between(start, end),
        _ => Elapsed::default(),
    };

    let report = SessionReport {
        session_id: None,
        project_path: None,
        model: turns.iter().find_map(|t| t.model.clone()),
        start_time,
        end_time,
        duration,
        total_turns: turns.len(),
        totals,
        net_token_growth: sum_tokens(turns.iter().map(|t| t.token_delta)),
        peak_context,
        peak_context_percent: percent_of_window(peak_context, options.context_window),
        estimated_cost: Cost::from_usage(&totals.as_usage(), &options.pricing),
        compact_events,
        segments,
        tool_stats: tool_stats(&turns),
        file_stats: file_stats(&turns),
        size_stats: size_stats(&turns),
        top_consumers: top_consumers(&turns, options.top_consumers),
        user_requests: user_request_stats(&turns),
        turns,
    };

    tracing::debug!(
        turns = report.total_turns,
        compactions = report.compact_events.len(),
        peak_context = report.peak_context,
        "assembled report"
    );
    report
}

/// Full pipeline over one session's decoded entries
pub fn analyze_entries(entries: &[LogEntry], options: &AnalysisOptions) -> SessionReport {
    let session_id: Option<SessionId> = entries.iter().find_map(|e| e.session_id.clone());
    let project_path = entries.iter().find_map(|e| e.cwd.clone());

    SessionReport {
        session_id,
        project_path,
        ..build_report(extract_turns(entries), options)
    }
}

/// Analyze independent sessions in parallel. Results keep input order.
pub fn analyze_sessions(sessions: &[Vec<LogEntry>], options: &AnalysisOptions) -> Vec<SessionReport> {
    sessions
        .par_iter()
        .map(|entries| analyze_entries(entries, options))
        .collect()
}
