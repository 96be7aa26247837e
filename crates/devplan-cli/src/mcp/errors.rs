//! Error handling utilities for MCP server

use devplan_core::PlannerError;
use rmcp::ErrorData;

/// Convert a planner error into an MCP error.
///
/// Problems with the caller's input are `invalid_params`; everything else is
/// an internal error.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlannerError::InvalidInput { .. }
        | PlannerError::Validation { .. }
        | PlannerError::NotFound { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
