//! Turn extraction: raw transcript entries to the ordered turn sequence.

use crate::constants::{INTERRUPTION_MARKER, SYNTHETIC_PROMPT_PREFIXES};
use crate::types::{ContentItem, EntryKind, LogEntry, ToolCall, ToolUseId, Turn};

/// Build one turn per main-chain assistant response that carries usage.
///
/// Turn indices are dense over emitted turns only; skipped entries never
/// leave gaps. The first turn's delta is its full context.
pub fn extract_turns(entries: &[LogEntry]) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();
    let mut previous_context = 0i64;

    for (position, entry) in entries.iter().enumerate() {
        let Some(raw_usage) = entry.assistant_usage() else {
            continue;
        };

        let usage = raw_usage.to_usage();
        let context_tokens = usage.context_tokens();
        let token_delta = context_tokens.saturating_sub(previous_context);
        previous_context = context_tokens;

        let tool_call = first_tool_call(entry).map(|mut call| {
            call.result = find_tool_result(entries, position, &call.tool_id);
            call
        });
        let result_size = tool_call
            .as_ref()
            .and_then(|call| call.result.as_ref())
            .map(String::len);

        turns.push(Turn {
            turn_index: turns.len(),
            timestamp: entry.timestamp().to_string(),
            model: entry.message.as_ref().and_then(|m| m.model.clone()),
            tool_call,
            usage,
            context_tokens,
            token_delta,
            output_tokens: usage.output_tokens,
            user_prompt: find_user_prompt(entries, position),
            result_size,
        });
    }

    tracing::debug!(entries = entries.len(), turns = turns.len(), "extracted turns");
    turns
}

/// Only the first tool_use of a response is modeled
fn first_tool_call(entry: &LogEntry) -> Option<ToolCall> {
    entry.items().iter().find_map(|item| match item {
        ContentItem::ToolUse { id, name, input } => Some(ToolCall {
            tool_id: id.clone(),
            tool_name: name.clone(),
            input: input.clone(),
            result: None,
            is_error: false,
        }),
        _ => None,
    })
}

/// Text of the first later tool_result answering `tool_id`
pub fn find_tool_result(
    entries: &[LogEntry],
    position: usize,
    tool_id: &ToolUseId,
) -> Option<String> {
    entries
        .get(position + 1..)?
        .iter()
        .find_map(|entry| entry.tool_result_for(tool_id))
}

/// Nearest user-authored text before `position` within the same exchange.
///
/// Sidechain entries are ignored; reaching another assistant entry first
/// means the turn has no prompt of its own.
pub fn find_user_prompt(entries: &[LogEntry], position: usize) -> Option<String> {
    for entry in entries.get(..position)?.iter().rev() {
        if entry.is_sidechain() {
            continue;
        }
        match entry.kind {
            EntryKind::Assistant => return None,
            EntryKind::User => {
                if let Some(text) = entry
                    .user_texts()
                    .into_iter()
                    .find(|text| is_genuine_prompt(text))
                {
                    return Some(text.to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn is_genuine_prompt(text: &str) -> bool {
    let trimmed = text.trim_start();
    !trimmed.is_empty()
        && !SYNTHETIC_PROMPT_PREFIXES
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
        && !text.contains(INTERRUPTION_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::analyze_entries;
    use crate::test_support::{assistant, entry, tool_result, user_prompt};
    use crate::types::AnalysisOptions;
    use serde_json::json;

    #[test]
    fn test_context_and_delta_scenario() {
        let entries = vec![
            assistant(
                "2025-06-01T10:00:00Z",
                [100, 50, 1000, 500],
                Some(("toolu_1", "Read", json!({"file_path": "/src/lib.rs"}))),
            ),
            tool_result("2025-06-01T10:00:01Z", "toolu_1", "contents"),
            assistant(
                "2025-06-01T10:00:02Z",
                [200, 60, 0, 1600],
                Some(("toolu_2", "Bash", json!({"command": "ls"}))),
            ),
        ];

        let turns = extract_turns(&entries);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].context_tokens, 1600);
        assert_eq!(turns[0].token_delta, 1600);
        assert_eq!(turns[1].context_tokens, 1800);
        assert_eq!(turns[1].token_delta, 200);
        assert_eq!(turns[1].output_tokens, 60);
    }

    #[test]
    fn test_indices_dense_over_emitted_turns() {
        let entries = vec![
            user_prompt("2025-06-01T10:00:00Z", "hello"),
            entry(json!({"type": "summary", "summary": "earlier work"})),
            assistant("2025-06-01T10:00:01Z", [10, 1, 0, 0], None),
            entry(json!({
                "type": "assistant",
                "isSidechain": true,
                "message": {"role": "assistant", "content": [], "usage": {"input_tokens": 99}}
            })),
            entry(json!({
                "type": "assistant",
                "message": {"role": "assistant", "content": []}
            })),
            assistant("2025-06-01T10:00:02Z", [30, 1, 0, 0], None),
        ];

        let turns = extract_turns(&entries);
        let indices: Vec<usize> = turns.iter().map(|t| t.turn_index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(turns[1].token_delta, 20);
    }

    #[test]
    fn test_only_first_tool_use_is_recorded() {
        let entries = vec![entry(json!({
            "type": "assistant",
            "timestamp": "2025-06-01T10:00:00Z",
            "message": {
                "role": "assistant",
                "content": [
                    {"type": "tool_use", "id": "a", "name": "Glob", "input": {"pattern": "*.rs"}},
                    {"type": "tool_use", "id": "b", "name": "Read", "input": {"file_path": "/x"}}
                ],
                "usage": {"input_tokens": 5}
            }
        }))];

        let turns = extract_turns(&entries);
        let call = turns[0].tool_call.as_ref().unwrap();
        assert_eq!(call.tool_name, "Glob");
        assert_eq!(call.tool_id, ToolUseId::from("a"));
        assert!(!call.is_error);
    }

    #[test]
    fn test_tool_result_resolution_and_size() {
        let entries = vec![
            assistant(
                "2025-06-01T10:00:00Z",
                [10, 1, 0, 0],
                Some(("toolu_1", "Read", json!({"file_path": "/a"}))),
            ),
            tool_result("2025-06-01T10:00:01Z", "toolu_other", "not mine"),
            tool_result("2025-06-01T10:00:02Z", "toolu_1", "héllo"),
            assistant(
                "2025-06-01T10:00:03Z",
                [20, 1, 0, 0],
                Some(("toolu_2", "Bash", json!({"command": "ls"}))),
            ),
        ];

        let turns = extract_turns(&entries);
        let first = turns[0].tool_call.as_ref().unwrap();
        assert_eq!(first.result.as_deref(), Some("héllo"));
        assert_eq!(turns[0].result_size, Some(6));

        // No result before end of stream
        assert_eq!(turns[1].tool_call.as_ref().unwrap().result, None);
        assert_eq!(turns[1].result_size, None);
    }

    #[test]
    fn test_user_prompt_resolution() {
        let entries = vec![
            user_prompt("2025-06-01T10:00:00Z", "refactor the parser"),
            assistant(
                "2025-06-01T10:00:01Z",
                [10, 1, 0, 0],
                Some(("toolu_1", "Read", json!({"file_path": "/a"}))),
            ),
            tool_result("2025-06-01T10:00:02Z", "toolu_1", "ok"),
            assistant("2025-06-01T10:00:03Z", [20, 1, 0, 0], None),
        ];

        let turns = extract_turns(&entries);
        assert_eq!(turns[0].user_prompt.as_deref(), Some("refactor the parser"));
        // Scanning back from the second turn reaches the first assistant entry
        assert_eq!(turns[1].user_prompt, None);
    }

    #[test]
    fn test_synthetic_prompts_are_skipped() {
        let entries = vec![
            user_prompt("2025-06-01T10:00:00Z", "real question"),
            user_prompt(
                "2025-06-01T10:00:01Z",
                "<command-name>/clear</command-name>",
            ),
            user_prompt("2025-06-01T10:00:02Z", "<local-command-stdout></local-command-stdout>"),
            user_prompt("2025-06-01T10:00:03Z", "[Request interrupted by user for tool use]"),
            assistant("2025-06-01T10:00:04Z", [10, 1, 0, 0], None),
        ];

        let turns = extract_turns(&entries);
        assert_eq!(turns[0].user_prompt.as_deref(), Some("real question"));
    }

    #[test]
    fn test_prompt_from_text_item_and_sidechain_ignored() {
        let entries = vec![
            entry(json!({
                "type": "user",
                "message": {"role": "user", "content": [{"type": "text", "text": "array prompt"}]}
            })),
            entry(json!({
                "type": "assistant",
                "isSidechain": true,
                "message": {"role": "assistant", "content": []}
            })),
            entry(json!({
                "type": "user",
                "isSidechain": true,
                "message": {"role": "user", "content": "subagent prompt"}
            })),
            assistant("2025-06-01T10:00:00Z", [10, 1, 0, 0], None),
        ];

        let turns = extract_turns(&entries);
        assert_eq!(turns[0].user_prompt.as_deref(), Some("array prompt"));
    }

    #[test]
    fn test_malformed_usage_propagates() {
        let entries = vec![
            assistant("2025-06-01T10:00:00Z", [-100, 0, 0, 0], None),
            assistant("2025-06-01T10:00:01Z", [50, 0, 0, 0], None),
        ];

        let turns = extract_turns(&entries);
        assert_eq!(turns[0].context_tokens, -100);
        assert_eq!(turns[0].token_delta, -100);
        assert_eq!(turns[1].token_delta, 150);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_turns(&[]).is_empty());
        assert_eq!(find_user_prompt(&[], 0), None);
        assert_eq!(find_tool_result(&[], 0, &ToolUseId::from("x")), None);
    }

    #[test]
    fn test_tool_result_only_from_user_entries() {
        let entries = vec![
            assistant(
                "2025-06-01T10:00:00Z",
                [10, 1, 0, 0],
                Some(("toolu_1", "Read", json!({"file_path": "/a"}))),
            ),
            entry(json!({
                "type": "assistant",
                "timestamp": "2025-06-01T10:00:01Z",
                "message": {
                    "role": "assistant",
                    "content": [{"type": "tool_result", "tool_use_id": "toolu_1", "content": "echoed"}]
                }
            })),
            tool_result("2025-06-01T10:00:02Z", "toolu_1", "real output"),
        ];

        let turns = extract_turns(&entries);
        assert_eq!(turns.len(), 1);
        let call = turns[0].tool_call.as_ref().unwrap();
        assert_eq!(call.result.as_deref(), Some("real output"));
        assert_eq!(turns[0].result_size, Some(11));
    }

    #[test]
    fn test_huge_usage_saturates() {
        let entries = vec![entry(json!({
            "type": "assistant",
            "timestamp": "2025-06-01T10:00:00Z",
            "message": {
                "role": "assistant",
                "content": [],
                "usage": {"input_tokens": "1e300", "cache_read_input_tokens": 1}
            }
        }))];

        let turns = extract_turns(&entries);
        assert_eq!(turns[0].usage.input_tokens, i64::MAX);
        assert_eq!(turns[0].context_tokens, i64::MAX);
        assert_eq!(turns[0].token_delta, i64::MAX);

        let report = analyze_entries(&entries, &AnalysisOptions::default());
        assert_eq!(report.peak_context, i64::MAX);
        assert_eq!(report.totals.context_tokens, i64::MAX);
    }

    #[test]
    fn test_extreme_swing_between_turns_saturates() {
        let entries = vec![
            assistant("2025-06-01T10:00:00Z", [-9_000_000_000_000_000_000, 0, 0, 0], None),
            assistant("2025-06-01T10:01:00Z", [9_000_000_000_000_000_000, 0, 0, 0], None),
        ];

        let turns = extract_turns(&entries);
        assert_eq!(turns[0].token_delta, -9_000_000_000_000_000_000);
        assert_eq!(turns[1].token_delta, i64::MAX);

        let report = analyze_entries(&entries, &AnalysisOptions::default());
        assert_eq!(report.total_turns, 2);
        assert_eq!(report.totals.input_tokens, 0);
        assert_eq!(
            report.net_token_growth,
            i64::MAX - 9_000_000_000_000_000_000
        );
        assert!(report.compact_events.is_empty());
    }
}
