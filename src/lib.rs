// Module declarations
pub mod aggregate;
pub mod attribution;
pub mod compaction;
pub mod constants;
pub mod error;
pub mod extract;
pub mod formatting;
pub mod pricing;
pub mod report;
pub mod tools;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use error::{CtxError, Result};
pub use report::{analyze_entries, analyze_sessions, build_report};
pub use tools::format_tool_description;
pub use types::{
    AnalysisOptions, CompactEvent, Cost, Elapsed, LogEntry, ModelPricing, SessionId,
    SessionReport, SessionSegment, ToolCall, Turn, Usage,
};
