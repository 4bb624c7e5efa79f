use super::ids::ToolUseId;
use super::usage::Usage;
use serde::Serialize;
use serde_json::Value;

/// One tool invocation made by a model response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCall {
    pub tool_id: ToolUseId,
    pub tool_name: String,
    pub input: Value,
    /// Raw text of the matching tool_result, when one was found
    pub result: Option<String>,
    /// Never set from the transcript's tool_result error flag
    pub is_error: bool,
}

impl ToolCall {
    /// String field of the tool input, if present
    pub fn input_str(&self, key: &str) -> Option<&str> {
        self.input.get(key).and_then(Value::as_str)
    }
}

/// A model response carrying usage data, the unit of analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    pub turn_index: usize,
    pub timestamp: String,
    pub model: Option<String>,
    pub tool_call: Option<ToolCall>,
    pub usage: Usage,
    pub context_tokens: i64,
    pub token_delta: i64,
    pub output_tokens: i64,
    pub user_prompt: Option<String>,
    pub result_size: Option<usize>,
}

impl Turn {
    #[inline]
    pub fn has_tool_call(&self) -> bool {
        self.tool_call.is_some()
    }
}
