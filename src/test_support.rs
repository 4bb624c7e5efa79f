//! Fixture builders shared by unit tests.

use crate::types::{LogEntry, ToolCall, ToolUseId, Turn, Usage};
use serde_json::{Value, json};

pub fn entry(value: Value) -> LogEntry {
    serde_json::from_value(value).expect("fixture must decode")
}

pub fn assistant(
    timestamp: &str,
    usage: [i64; 4],
    tool: Option<(&str, &str, Value)>,
) -> LogEntry {
    let mut content = vec![json!({"type": "text", "text": "working on it"})];
    if let Some((id, name, input)) = tool {
        content.push(json!({"type": "tool_use", "id": id, "name": name, "input": input}));
    }
    entry(json!({
        "type": "assistant",
        "timestamp": timestamp,
        "sessionId": "session-1",
        "message": {
            "role": "assistant",
            "model": "claude-opus-4-1-20250805",
            "content": content,
            "usage": {
                "input_tokens": usage[0],
                "output_tokens": usage[1],
                "cache_creation_input_tokens": usage[2],
                "cache_read_input_tokens": usage[3]
            }
        }
    }))
}

pub fn tool_result(timestamp: &str, tool_id: &str, text: &str) -> LogEntry {
    entry(json!({
        "type": "user",
        "timestamp": timestamp,
        "message": {
            "role": "user",
            "content": [{"type": "tool_result", "tool_use_id": tool_id, "content": text}]
        }
    }))
}

pub fn user_prompt(timestamp: &str, text: &str) -> LogEntry {
    entry(json!({
        "type": "user",
        "timestamp": timestamp,
        "message": {"role": "user", "content": text}
    }))
}

pub fn call(name: &str, input: Value) -> ToolCall {
    ToolCall {
        tool_id: ToolUseId::new(format!("toolu_{}", name.to_lowercase())),
        tool_name: name.to_string(),
        input,
        result: None,
        is_error: false,
    }
}

/// Build turns from `(context_tokens, tool_call)` pairs with deltas chained
/// the way the extractor computes them
pub fn turns(specs: Vec<(i64, Option<ToolCall>)>) -> Vec<Turn> {
    let mut previous = 0;
    specs
        .into_iter()
        .enumerate()
        .map(|(index, (context, tool_call))| {
            let delta = context - previous;
            previous = context;
            Turn {
                turn_index: index,
                timestamp: format!("2025-06-01T10:{:02}:00Z", index % 60),
                model: None,
                tool_call,
                usage: Usage {
                    input_tokens: context,
                    output_tokens: 10,
                    cache_creation_tokens: 0,
                    cache_read_tokens: 0,
                },
                context_tokens: context,
                token_delta: delta,
                output_tokens: 10,
                user_prompt: None,
                result_size: None,
            }
        })
        .collect()
}
