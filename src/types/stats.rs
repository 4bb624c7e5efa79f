use serde::Serialize;

/// Token totals for all turns attributed to one tool
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolStats {
    pub tool_name: String,
    /// Turns attributed to the tool
    pub turn_count: usize,
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub cache_creation_tokens: i64,
    pub cache_read_tokens: i64,
    /// Sum of token deltas attributed to the tool
    pub total_context_tokens: i64,
    pub percent_of_session: f64,
}

impl ToolStats {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            ..Default::default()
        }
    }
}

/// Token deltas of turns that touched one path through one tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStats {
    pub tool_name: String,
    /// File path, or `pattern:<glob>` for search tools
    pub path: String,
    pub count: usize,
    pub total_tokens: i64,
    pub average_tokens: i64,
}

/// Raw tool-result bytes produced by one tool
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolSizeStats {
    pub tool_name: String,
    pub call_count: usize,
    pub total_size_bytes: usize,
    /// Per-path breakdown in first-seen order
    pub files: Vec<FileSizeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSizeEntry {
    pub path: String,
    pub count: usize,
    pub size_bytes: usize,
}

/// One of the largest single-turn context increases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopConsumer {
    pub turn_index: usize,
    pub timestamp: String,
    pub tool_name: String,
    pub description: String,
    pub tokens: i64,
    pub cumulative_tokens: i64,
}

/// A run of consecutive turns answering the same user prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRequestStats {
    pub prompt: String,
    pub turn_count: usize,
    pub total_tokens: i64,
    pub tool_call_count: usize,
    pub first_turn: usize,
    pub last_turn: usize,
}
