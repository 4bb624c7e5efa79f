/// Maximum context size of the model, used for percent-of-window figures
pub const MODEL_CONTEXT_WINDOW: u64 = 200_000;

/// A turn whose context falls below this fraction of the previous turn's
/// context is treated as a compaction
pub const COMPACTION_DROP_RATIO: f64 = 0.5;

/// Number of entries reported by the top-consumer view
pub const DEFAULT_TOP_CONSUMERS: usize = 10;

/// By-tool bucket for turns with no attributable tool call
pub const INITIAL_CONTEXT_BUCKET: &str = "initial_context";

/// By-user-request label for turns without a user prompt
pub const INITIAL_REQUEST_LABEL: &str = "(initial context)";

pub const DEFAULT_PRICING_TIER: &str = "opus";

/// Segment labels
pub const PRE_COMPACT_LABEL: &str = "Pre-compact";
pub const POST_COMPACT_LABEL: &str = "Post-compact";

/// Prefixes of synthetic user content written by the assistant itself
pub const SYNTHETIC_PROMPT_PREFIXES: &[&str] = &["<local-command", "<command-name>"];

/// Marker written into the transcript when the user interrupts a response
pub const INTERRUPTION_MARKER: &str = "[Request interrupted by user";
