use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::{ErrorData as McpError, model::CallToolResult, tool, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::ApiRequest;
use crate::server::OpendockServer;
use crate::tools::{json_content, to_body};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListWarehousesParams {
    #[schemars(description = "Page number")]
    pub page: Option<u32>,
    #[schemars(description = "Items per page")]
    pub limit: Option<u32>,
    #[schemars(description = "Filter by warehouse name")]
    pub name: Option<String>,
    #[schemars(description = "Filter by city")]
    pub city: Option<String>,
    #[schemars(description = "Filter by state")]
    pub state: Option<String>,
    #[schemars(description = "Filter by zip code")]
    pub zip: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetWarehouseParams {
    #[schemars(description = "Warehouse ID")]
    pub id: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseHoursParams {
    #[serde(skip_serializing)]
    #[schemars(description = "Warehouse ID")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "End date (YYYY-MM-DD)")]
    pub end_date: Option<String>,
}

#[tool_router(router = warehouse_tools)]
impl OpendockServer {
    #[tool(description = "List warehouses with optional filters and pagination")]
    pub async fn list_warehouses(
        &self,
        Parameters(p): Parameters<ListWarehousesParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get("/warehouse")
            .query_opt("page", p.page)
            .query_opt("limit", p.limit)
            .query_opt("name", p.name)
            .query_opt("city", p.city)
            .query_opt("state", p.state)
            .query_opt("zip", p.zip);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Get details for a specific warehouse")]
    pub async fn get_warehouse(
        &self,
        Parameters(p): Parameters<GetWarehouseParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!("/warehouse/{}", p.id));
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Get hours of operation for a warehouse's docks")]
    pub async fn get_warehouse_hours(
        &self,
        Parameters(p): Parameters<WarehouseHoursParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut req = ApiRequest::post(format!("/warehouse/{}/get-hours-of-operation", p.id));
        // The endpoint treats an empty window as "all hours"; send no body at
        // all rather than an empty object.
        if p.start_date.is_some() || p.end_date.is_some() {
            req = req.body(to_body(&p)?);
        }
        json_content(self.api.request(req).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::warehouse_tools()
}
