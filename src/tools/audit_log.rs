use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::{ErrorData as McpError, model::CallToolResult, tool, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::api::ApiRequest;
use crate::server::OpendockServer;
use crate::tools::json_content;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetAuditLogParams {
    #[schemars(description = "ID of the object to get audit history for")]
    pub object_id: String,
}

#[tool_router(router = audit_log_tools)]
impl OpendockServer {
    #[tool(description = "Get the audit log for an object (warehouse, dock, appointment, etc.)")]
    pub async fn get_audit_log(
        &self,
        Parameters(p): Parameters<GetAuditLogParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!("/audit-log/{}", p.object_id));
        json_content(self.api.request(req).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::audit_log_tools()
}
