//! Which tool call a turn's token delta belongs to.
//!
//! A tool's output usually reaches the model in the response after the one
//! that invoked it, so growth on a tool-less turn is charged to the
//! preceding turn's call.

use crate::types::{ToolCall, Turn};

/// Tool call responsible for the delta of `turns[index]`, if any
pub fn attributed_tool(turns: &[Turn], index: usize) -> Option<&ToolCall> {
    let turn = turns.get(index)?;
    if let Some(call) = &turn.tool_call {
        return Some(call);
    }
    if turn.token_delta > 0 {
        return index
            .checked_sub(1)
            .and_then(|previous| turns.get(previous))
            .and_then(|previous| previous.tool_call.as_ref());
    }
    None
}
