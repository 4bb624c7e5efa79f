pub mod compact;
pub mod cost;
pub mod elapsed;
pub mod entry;
pub mod ids;
pub mod pricing;
pub mod report;
pub mod stats;
pub mod turn;
pub mod usage;

pub use compact::{CompactEvent, SessionSegment};
pub use cost::Cost;
pub use elapsed::Elapsed;
pub use entry::{
    ContentItem, EntryKind, EntryMessage, LogEntry, MessageContent, RawUsage, ToolResultContent,
};
pub use ids::{SessionId, ToolUseId};
pub use pricing::{ModelPricing, PricingTable};
pub use report::{AnalysisOptions, SessionReport};
pub use stats::{FileSizeEntry, FileStats, ToolSizeStats, ToolStats, TopConsumer, UserRequestStats};
pub use turn::{ToolCall, Turn};
pub use usage::{TokenTotals, Usage, sum_tokens};
