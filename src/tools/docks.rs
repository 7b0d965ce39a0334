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
pub struct ListDocksParams {
    #[schemars(description = "Filter by warehouse ID")]
    pub warehouse_id: Option<String>,
    #[schemars(description = "Page number")]
    pub page: Option<u32>,
    #[schemars(description = "Items per page")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetDockParams {
    #[schemars(description = "Dock ID")]
    pub id: String,
}

#[tool_router(router = dock_tools)]
impl OpendockServer {
    #[tool(description = "List docks with optional filters")]
    pub async fn list_docks(
        &self,
        Parameters(p): Parameters<ListDocksParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get("/dock")
            .query_opt("warehouseId", p.warehouse_id)
            .query_opt("page", p.page)
            .query_opt("limit", p.limit);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Get details for a specific dock")]
    pub async fn get_dock(
        &self,
        Parameters(p): Parameters<GetDockParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!("/dock/{}", p.id));
        json_content(self.api.request(req).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::dock_tools()
}
