//! Statistical views over the turn sequence.
//!
//! Groups are collected in first-seen order and then stably sorted, so equal
//! totals keep their order of appearance and repeated runs are identical.

use crate::attribution::attributed_tool;
use crate::constants::{INITIAL_CONTEXT_BUCKET, INITIAL_REQUEST_LABEL};
use crate::tools::{format_tool_description, input_file_path, target_path};
use crate::types::{
    FileSizeEntry, FileStats, ToolSizeStats, ToolStats, TopConsumer, Turn, UserRequestStats,
    sum_tokens,
};
use std::collections::HashMap;
use std::hash::Hash;

/// Entry for `key` in an insertion-ordered group list
fn group_mut<'a, K, T>(
    groups: &'a mut Vec<T>,
    positions: &mut HashMap<K, usize>,
    key: K,
    make: impl FnOnce() -> T,
) -> &'a mut T
where
    K: Eq + Hash,
{
    let position = *positions.entry(key).or_insert_with(|| {
        groups.push(make());
        groups.len() - 1
    });
    &mut groups[position]
}

/// Token usage grouped by the tool each turn is attributed to
pub fn tool_stats(turns: &[Turn]) -> Vec<ToolStats> {
    let mut groups: Vec<ToolStats> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (index, turn) in turns.iter().enumerate() {
        let name = attributed_tool(turns, index)
            .map(|call| call.tool_name.as_str())
            .unwrap_or(INITIAL_CONTEXT_BUCKET);

        let stats = group_mut(&mut groups, &mut positions, name.to_string(), || {
            ToolStats::new(name)
        });
        stats.turn_count += 1;
        stats.input_tokens = stats.input_tokens.saturating_add(turn.usage.input_tokens);
        stats.output_tokens = stats.output_tokens.saturating_add(turn.usage.output_tokens);
        stats.cache_creation_tokens = stats
            .cache_creation_tokens
            .saturating_add(turn.usage.cache_creation_tokens);
        stats.cache_read_tokens = stats
            .cache_read_tokens
            .saturating_add(turn.usage.cache_read_tokens);
        stats.total_context_tokens = stats.total_context_tokens.saturating_add(turn.token_delta);
    }

    let session_total = sum_tokens(turns.iter().map(|turn| turn.token_delta));
    for stats in &mut groups {
        stats.percent_of_session = if session_total > 0 {
            stats.total_context_tokens as f64 / session_total as f64 * 100.0
        } else {
            0.0
        };
    }

    groups.sort_by(|a, b| b.total_context_tokens.cmp(&a.total_context_tokens));
    groups
}

/// Token deltas of file and search tools, per (tool, path)
pub fn file_stats(turns: &[Turn]) -> Vec<FileStats> {
    let mut groups: Vec<FileStats> = Vec::new();
    let mut positions: HashMap<(String, String), usize> = HashMap::new();

    for turn in turns {
        let Some(call) = &turn.tool_call else {
            continue;
        };
        let Some(path) = target_path(call) else {
            continue;
        };

        let key = (call.tool_name.clone(), path.clone());
        let stats = group_mut(&mut groups, &mut positions, key, || FileStats {
            tool_name: call.tool_name.clone(),
            path,
            count: 0,
            total_tokens: 0,
            average_tokens: 0,
        });
        stats.count += 1;
        stats.total_tokens = stats.total_tokens.saturating_add(turn.token_delta);
    }

    for stats in &mut groups {
        stats.average_tokens = (stats.total_tokens as f64 / stats.count as f64).round() as i64;
    }

    groups.sort_by(|a, b| b.total_tokens.cmp(&a.total_tokens));
    groups
}

/// Raw tool-result bytes per tool. Turns without a tool call are left out.
pub fn size_stats(turns: &[Turn]) -> Vec<ToolSizeStats> {
    let mut groups: Vec<ToolSizeStats> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for turn in turns {
        let Some(call) = &turn.tool_call else {
            continue;
        };
        let size = turn.result_size.unwrap_or(0);

        let stats = group_mut(&mut groups, &mut positions, call.tool_name.clone(), || {
            ToolSizeStats {
                tool_name: call.tool_name.clone(),
                ..Default::default()
            }
        });
        stats.call_count += 1;
        stats.total_size_bytes += size;

        if let Some(path) = input_file_path(call) {
            match stats.files.iter_mut().find(|file| file.path == path) {
                Some(file) => {
                    file.count += 1;
                    file.size_bytes += size;
                }
                None => stats.files.push(FileSizeEntry {
                    path,
                    count: 1,
                    size_bytes: size,
                }),
            }
        }
    }

    groups.sort_by(|a, b| b.total_size_bytes.cmp(&a.total_size_bytes));
    groups
}

/// The `limit` largest attributed context increases, with running totals
pub fn top_consumers(turns: &[Turn], limit: usize) -> Vec<TopConsumer> {
    let mut candidates: Vec<_> = turns
        .iter()
        .enumerate()
        .filter(|(_, turn)| turn.token_delta > 0)
        .filter_map(|(index, turn)| attributed_tool(turns, index).map(|call| (turn, call)))
        .collect();
    candidates.sort_by(|a, b| b.0.token_delta.cmp(&a.0.token_delta));

    let mut cumulative = 0i64;
    candidates
        .into_iter()
        .take(limit)
        .map(|(turn, call)| {
            cumulative = cumulative.saturating_add(turn.token_delta);
            TopConsumer {
                turn_index: turn.turn_index,
                timestamp: turn.timestamp.clone(),
                tool_name: call.tool_name.clone(),
                description: format_tool_description(call),
                tokens: turn.token_delta,
                cumulative_tokens: cumulative,
            }
        })
        .collect()
}

/// Runs of consecutive turns sharing a user prompt. A prompt that recurs
/// later starts a new run.
pub fn user_request_stats(turns: &[Turn]) -> Vec<UserRequestStats> {
    let mut groups: Vec<UserRequestStats> = Vec::new();
    let mut current_prompt: Option<&Option<String>> = None;

    for turn in turns {
        let tool_calls = usize::from(turn.has_tool_call());

        match groups.last_mut() {
            Some(group) if current_prompt == Some(&turn.user_prompt) => {
                group.turn_count += 1;
                group.total_tokens = group.total_tokens.saturating_add(turn.token_delta);
                group.tool_call_count += tool_calls;
                group.last_turn = turn.turn_index;
            }
            _ => {
                groups.push(UserRequestStats {
                    prompt: turn
                        .user_prompt
                        .clone()
                        .unwrap_or_else(|| INITIAL_REQUEST_LABEL.to_string()),
                    turn_count: 1,
                    total_tokens: turn.token_delta,
                    tool_call_count: tool_calls,
                    first_turn: turn.turn_index,
                    last_turn: turn.turn_index,
                });
                current_prompt = Some(&turn.user_prompt);
            }
        }
    }

    groups.sort_by(|a, b| b.total_tokens.cmp(&a.total_tokens));
    groups
}
