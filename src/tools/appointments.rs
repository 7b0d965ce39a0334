use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
    tool, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::ApiRequest;
use crate::server::OpendockServer;
use crate::tools::{json_content, to_body};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListAppointmentsParams {
    #[schemars(description = "Page number")]
    pub page: Option<u32>,
    #[schemars(description = "Items per page")]
    pub limit: Option<u32>,
    #[schemars(description = "Filter by warehouse ID")]
    pub warehouse_id: Option<String>,
    #[schemars(description = "Filter by dock ID")]
    pub dock_id: Option<String>,
    #[schemars(description = "Filter by status")]
    pub status: Option<String>,
    #[schemars(description = "Filter by start date (YYYY-MM-DD)")]
    pub start_date: Option<String>,
    #[schemars(description = "Filter by end date (YYYY-MM-DD)")]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchAppointmentsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Filter by carrier ID")]
    pub carrier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Search by reference number")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Filter by status")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "End date (YYYY-MM-DD)")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Filter by warehouse ID")]
    pub warehouse_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Page number")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Items per page")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAppointmentParams {
    #[schemars(description = "Appointment ID")]
    pub id: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentParams {
    #[schemars(description = "Warehouse ID")]
    pub warehouse_id: String,
    #[schemars(description = "Dock ID")]
    pub dock_id: String,
    #[schemars(description = "Load type ID")]
    pub load_type_id: String,
    #[schemars(description = "Start time (ISO 8601 datetime)")]
    pub start_time: String,
    #[schemars(description = "End time (ISO 8601 datetime)")]
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Carrier ID")]
    pub carrier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Reference number")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Appointment notes")]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentParams {
    #[serde(skip_serializing)]
    #[schemars(description = "Appointment ID")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New start time (ISO 8601 datetime)")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New end time (ISO 8601 datetime)")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New dock ID")]
    pub dock_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New load type ID")]
    pub load_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New carrier ID")]
    pub carrier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New reference number")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Updated notes")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New status")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteAppointmentParams {
    #[schemars(description = "Appointment ID")]
    pub id: String,
}

#[tool_router(router = appointment_tools)]
impl OpendockServer {
    #[tool(description = "List appointments with optional filters and pagination")]
    pub async fn list_appointments(
        &self,
        Parameters(p): Parameters<ListAppointmentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get("/appointment")
            .query_opt("page", p.page)
            .query_opt("limit", p.limit)
            .query_opt("warehouseId", p.warehouse_id)
            .query_opt("dockId", p.dock_id)
            .query_opt("status", p.status)
            .query_opt("startDate", p.start_date)
            .query_opt("endDate", p.end_date);
        json_content(self.api.request(req).await?)
    }

    #[tool(
        description = "Advanced search for appointments by carrier, reference number, status, or date range"
    )]
    pub async fn search_appointments(
        &self,
        Parameters(p): Parameters<SearchAppointmentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::post("/search/appointments").body(to_body(&p)?);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Get details for a specific appointment")]
    pub async fn get_appointment(
        &self,
        Parameters(p): Parameters<GetAppointmentParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!("/appointment/{}", p.id));
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Schedule a new appointment")]
    pub async fn create_appointment(
        &self,
        Parameters(p): Parameters<CreateAppointmentParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::post("/appointment").body(to_body(&p)?);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Modify or reschedule an existing appointment")]
    pub async fn update_appointment(
        &self,
        Parameters(p): Parameters<UpdateAppointmentParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::patch(format!("/appointment/{}", p.id)).body(to_body(&p)?);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Cancel/delete an appointment")]
    pub async fn delete_appointment(
        &self,
        Parameters(p): Parameters<DeleteAppointmentParams>,
    ) -> Result<CallToolResult, McpError> {
        self.api
            .request(ApiRequest::delete(format!("/appointment/{}", p.id)))
            .await?;
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Appointment {} deleted successfully.",
            p.id
        ))]))
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::appointment_tools()
}
