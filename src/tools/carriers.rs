use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::{ErrorData as McpError, model::CallToolResult, tool, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::api::ApiRequest;
use crate::server::OpendockServer;
use crate::tools::json_content;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListCarriersParams {
    #[schemars(description = "Page number")]
    pub page: Option<u32>,
    #[schemars(description = "Items per page")]
    pub limit: Option<u32>,
    #[schemars(description = "Filter by carrier name")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetCarrierParams {
    #[schemars(description = "Carrier ID")]
    pub id: String,
}

#[tool_router(router = carrier_tools)]
impl OpendockServer {
    #[tool(description = "List carriers with optional filters")]
    pub async fn list_carriers(
        &self,
        Parameters(p): Parameters<ListCarriersParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get("/carrier")
            .query_opt("page", p.page)
            .query_opt("limit", p.limit)
            .query_opt("name", p.name);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Get details for a specific carrier")]
    pub async fn get_carrier(
        &self,
        Parameters(p): Parameters<GetCarrierParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!("/carrier/{}", p.id));
        json_content(self.api.request(req).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::carrier_tools()
}
