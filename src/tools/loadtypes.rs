use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::{ErrorData as McpError, model::CallToolResult, tool, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::api::ApiRequest;
use crate::server::OpendockServer;
use crate::tools::json_content;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLoadTypesParams {
    #[schemars(description = "Filter by warehouse ID")]
    pub warehouse_id: Option<String>,
    #[schemars(description = "Page number")]
    pub page: Option<u32>,
    #[schemars(description = "Items per page")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetLoadTypeParams {
    #[schemars(description = "Load type ID")]
    pub id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoadTypeAvailabilityParams {
    #[schemars(description = "Load type ID")]
    pub id: String,
    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub start_date: String,
    #[schemars(description = "End date (YYYY-MM-DD)")]
    pub end_date: String,
}

#[tool_router(router = load_type_tools)]
impl OpendockServer {
    #[tool(description = "List load types with optional filters")]
    pub async fn list_load_types(
        &self,
        Parameters(p): Parameters<ListLoadTypesParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get("/loadtype")
            .query_opt("warehouseId", p.warehouse_id)
            .query_opt("page", p.page)
            .query_opt("limit", p.limit);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Get details for a specific load type")]
    pub async fn get_load_type(
        &self,
        Parameters(p): Parameters<GetLoadTypeParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!("/loadtype/{}", p.id));
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Get available appointment slots for a load type")]
    pub async fn get_load_type_availability(
        &self,
        Parameters(p): Parameters<LoadTypeAvailabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::post(format!("/loadtype/{}/get-availability", p.id)).body(json!({
            "startDate": p.start_date,
            "endDate": p.end_date,
        }));
        json_content(self.api.request(req).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::load_type_tools()
}
