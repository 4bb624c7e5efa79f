//! Per-tool knowledge, keyed by tool name.
//!
//! Every tool the analysis has special handling for is one row of
//! [`TOOL_PROFILES`]. Unknown tool names fall back to a generic label and are
//! never path-bearing, so new tools flow through the aggregators untouched.

use crate::types::ToolCall;
use serde_json::Value;

/// Label suffix rendered after the tool name
type Describe = fn(&Value) -> Option<String>;

/// Aggregation key for tools that operate on a file or search pattern
type TargetPath = fn(&Value) -> Option<String>;

pub struct ToolProfile {
    pub name: &'static str,
    describe: Describe,
    target_path: Option<TargetPath>,
}

static TOOL_PROFILES: &[ToolProfile] = &[
    ToolProfile {
        name: "Read",
        describe: describe_file,
        target_path: Some(file_path),
    },
    ToolProfile {
        name: "Edit",
        describe: describe_file,
        target_path: Some(file_path),
    },
    ToolProfile {
        name: "Write",
        describe: describe_file,
        target_path: Some(file_path),
    },
    ToolProfile {
        name: "NotebookEdit",
        describe: describe_file,
        target_path: Some(file_path),
    },
    ToolProfile {
        name: "Glob",
        describe: describe_glob,
        target_path: Some(search_pattern),
    },
    ToolProfile {
        name: "Grep",
        describe: describe_grep,
        target_path: Some(search_pattern),
    },
    ToolProfile {
        name: "Bash",
        describe: describe_bash,
        target_path: None,
    },
    ToolProfile {
        name: "Task",
        describe: describe_task,
        target_path: None,
    },
    ToolProfile {
        name: "WebFetch",
        describe: describe_web_fetch,
        target_path: None,
    },
    ToolProfile {
        name: "WebSearch",
        describe: describe_web_search,
        target_path: None,
    },
    ToolProfile {
        name: "TodoWrite",
        describe: describe_todos,
        target_path: None,
    },
];

const DEFAULT_INPUT_CHARS: usize = 50;

pub fn profile(tool_name: &str) -> Option<&'static ToolProfile> {
    TOOL_PROFILES.iter().find(|p| p.name == tool_name)
}

/// Short human label for a tool call, e.g. `Read src/main.rs`
pub fn format_tool_description(call: &ToolCall) -> String {
    let detail = match profile(&call.tool_name) {
        Some(profile) => (profile.describe)(&call.input),
        None => Some(truncate(&call.input.to_string(), DEFAULT_INPUT_CHARS)),
    };

    match detail {
        Some(detail) if !detail.is_empty() => format!("{} {}", call.tool_name, detail),
        _ => call.tool_name.clone(),
    }
}

/// Path a file or search tool operated on; `None` for every other tool
pub fn target_path(call: &ToolCall) -> Option<String> {
    profile(&call.tool_name)?
        .target_path
        .and_then(|extract| extract(&call.input))
}

/// `file_path` input of any tool, used to break down tool-result sizes
pub fn input_file_path(call: &ToolCall) -> Option<String> {
    call.input_str("file_path").map(str::to_string)
}

fn str_field<'a>(input: &'a Value, key: &str) -> Option<&'a str> {
    input.get(key).and_then(Value::as_str)
}

fn file_path(input: &Value) -> Option<String> {
    str_field(input, "file_path")
        .or_else(|| str_field(input, "notebook_path"))
        .map(str::to_string)
}

fn search_pattern(input: &Value) -> Option<String> {
    str_field(input, "pattern").map(|pattern| format!("pattern:{}", pattern))
}

fn describe_file(input: &Value) -> Option<String> {
    file_path(input).map(|path| last_segments(&path, 2))
}

fn describe_glob(input: &Value) -> Option<String> {
    str_field(input, "pattern").map(str::to_string)
}

fn describe_grep(input: &Value) -> Option<String> {
    str_field(input, "pattern").map(|pattern| format!("\"{}\"", truncate(pattern, 20)))
}

fn describe_bash(input: &Value) -> Option<String> {
    str_field(input, "command").map(|command| truncate(command, 30))
}

fn describe_task(input: &Value) -> Option<String> {
    str_field(input, "description").map(|description| truncate(description, 30))
}

fn describe_web_fetch(input: &Value) -> Option<String> {
    str_field(input, "url").map(|url| truncate(url, 40))
}

fn describe_web_search(input: &Value) -> Option<String> {
    str_field(input, "query").map(|query| format!("\"{}\"", truncate(query, 30)))
}

fn describe_todos(input: &Value) -> Option<String> {
    input
        .get("todos")
        .and_then(Value::as_array)
        .map(|todos| format!("({} items)", todos.len()))
}

/// Last `n` non-empty segments of a slash-separated path. Leading,
/// trailing and doubled separators contribute nothing, so `/a` gives `a`.
fn last_segments(path: &str, n: usize) -> String {
    let mut segments: Vec<&str> = path
        .rsplit(['/', '\\'])
        .filter(|s| !s.is_empty())
        .take(n)
        .collect();
    segments.reverse();
    segments.join("/")
}

/// First `max_chars` characters, never splitting a code point
fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
