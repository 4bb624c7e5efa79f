use super::ids::{SessionId, ToolUseId};
use super::usage::Usage;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Kind of a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Assistant,
    User,
    Summary,
    #[serde(other)]
    Other,
}

/// One decoded line of a transcript
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub is_sidechain: Option<bool>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub message: Option<EntryMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub content: MessageContent,
    #[serde(default)]
    pub usage: Option<RawUsage>,
}

/// User messages carry either plain text or an item array; assistant messages
/// always carry items
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Items(Vec<ContentItem>),
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Items(Vec::new())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Text {
        #[serde(default)]
        text: String,
    },
    ToolUse {
        id: ToolUseId,
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        tool_use_id: ToolUseId,
        #[serde(default)]
        content: Option<ToolResultContent>,
        #[serde(default)]
        is_error: Option<bool>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolResultContent {
    Text(String),
    Blocks(Vec<ContentItem>),
}

impl ToolResultContent {
    /// Raw text of the tool output; text blocks are joined with newlines
    pub fn text(&self) -> String {
        match self {
            ToolResultContent::Text(text) => text.clone(),
            ToolResultContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentItem::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Usage block as written in the transcript. Counters are kept signed and
/// unvalidated so that odd values flow through to the analysis untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUsage {
    #[serde(default, deserialize_with = "lenient_count")]
    pub input_tokens: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub output_tokens: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub cache_creation_input_tokens: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub cache_read_input_tokens: Option<i64>,
}

impl RawUsage {
    pub fn is_empty(&self) -> bool {
        self.input_tokens.is_none()
            && self.output_tokens.is_none()
            && self.cache_creation_input_tokens.is_none()
            && self.cache_read_input_tokens.is_none()
    }

    pub fn to_usage(&self) -> Usage {
        Usage {
            input_tokens: self.input_tokens.unwrap_or(0),
            output_tokens: self.output_tokens.unwrap_or(0),
            cache_creation_tokens: self.cache_creation_input_tokens.unwrap_or(0),
            cache_read_tokens: self.cache_read_input_tokens.unwrap_or(0),
        }
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }))
}

impl LogEntry {
    #[inline]
    pub fn is_sidechain(&self) -> bool {
        self.is_sidechain.unwrap_or(false)
    }

    #[inline]
    pub fn timestamp(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("")
    }

    /// Content items of the message; empty for plain-text or missing messages
    pub fn items(&self) -> &[ContentItem] {
        match self.message.as_ref().map(|m| &m.content) {
            Some(MessageContent::Items(items)) => items,
            _ => &[],
        }
    }

    /// Usage of a main-chain assistant response, if this entry is one
    pub fn assistant_usage(&self) -> Option<&RawUsage> {
        if self.kind != EntryKind::Assistant || self.is_sidechain() {
            return None;
        }
        let message = self.message.as_ref()?;
        if message.role.as_deref() != Some("assistant") {
            return None;
        }
        message.usage.as_ref().filter(|usage| !usage.is_empty())
    }

    /// Text of the tool_result answering `tool_id`, if this user entry holds one
    pub fn tool_result_for(&self, tool_id: &ToolUseId) -> Option<String> {
        if self.kind != EntryKind::User {
            return None;
        }
        self.items().iter().find_map(|item| match item {
            ContentItem::ToolResult {
                tool_use_id,
                content,
                ..
            } if tool_use_id == tool_id => {
                Some(content.as_ref().map(ToolResultContent::text).unwrap_or_default())
            }
            _ => None,
        })
    }

    /// Text fragments of a user message, in order
    pub fn user_texts(&self) -> Vec<&str> {
        if self.kind != EntryKind::User {
            return Vec::new();
        }
        match self.message.as_ref().map(|m| &m.content) {
            Some(MessageContent::Text(text)) => vec![text.as_str()],
            Some(MessageContent::Items(items)) => items
                .iter()
                .filter_map(|item| match item {
                    ContentItem::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            None => Vec::new(),
        }
    }
}
