//! Per-resource tool modules. Each contributes a `ToolRouter` segment to
//! [`crate::server::OpendockServer`]; parameter structs mirror the upstream
//! API's camelCase field names.

pub mod appointments;
pub mod audit_log;
pub mod carriers;
pub mod companies;
pub mod docks;
pub mod loadtypes;
pub mod metrics;
pub mod orgs;
pub mod profile;
pub mod settings_metadata;
pub mod warehouses;

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;

/// Render an API response as pretty-printed JSON text content.
pub(crate) fn json_content(data: Option<Value>) -> Result<CallToolResult, McpError> {
    let text = match data {
        Some(value) => serde_json::to_string_pretty(&value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?,
        None => "null".to_string(),
    };
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Serialize tool params into a JSON request body. Fields marked
/// `skip_serializing` (path/query-only) and `None` optionals stay out of the
/// wire format.
pub(crate) fn to_body<T: Serialize>(value: &T) -> Result<Value, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}
