use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::{ErrorData as McpError, model::CallToolResult, tool, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::api::ApiRequest;
use crate::server::OpendockServer;
use crate::tools::{json_content, to_body};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarrierCountParams {
    #[schemars(description = "Carrier ID")]
    pub carrier_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DockCountParams {
    #[schemars(description = "Dock IDs array")]
    pub dock_ids: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReserveCountParams {
    #[schemars(description = "User ID")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DwellTimeParams {
    #[schemars(description = "From date to filter")]
    pub from_date: Option<String>,
    #[schemars(description = "To date to filter")]
    pub to_date: Option<String>,
    #[schemars(description = "Warehouse ID to filter")]
    pub warehouse_id: Option<String>,
    #[schemars(description = "Dock ID to filter")]
    pub dock_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentMetricsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Dock IDs to filter")]
    pub dock_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Load type IDs to filter")]
    pub load_type_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Carrier IDs to filter")]
    pub carrier_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Tags to filter")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Date field filter object")]
    pub date_field: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Appointment types to filter")]
    pub appointment_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Include all carriers")]
    pub all_carriers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Fields to include in export")]
    pub export_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Skip custom fields")]
    pub skip_custom_fields: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentMetricsExcelParams {
    #[serde(skip_serializing, rename = "emailCCs")]
    #[schemars(description = "CC email addresses")]
    pub email_ccs: Vec<String>,
    #[serde(flatten)]
    pub filters: AppointmentMetricsParams,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CapacityUsageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Dock IDs to filter")]
    pub dock_ids: Option<Vec<String>>,
}

#[tool_router(router = metrics_tools)]
impl OpendockServer {
    #[tool(description = "Appointment volume by date")]
    pub async fn get_appointment_volume_by_date(&self) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/appointment-volume/date").await
    }

    #[tool(description = "Appointment volume by carrier")]
    pub async fn get_appointment_volume_by_carrier(&self) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/appointment-volume/carrier")
            .await
    }

    #[tool(description = "Appointment volume by load type and week day")]
    pub async fn get_appointment_volume_by_load_type(&self) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/appointment-volume/load-type")
            .await
    }

    #[tool(description = "Appointment volume by time of day")]
    pub async fn get_appointment_volume_by_time_of_day(&self) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/appointment-volume/time-of-day")
            .await
    }

    #[tool(description = "Appointment duration average by dock and day of week")]
    pub async fn get_appointment_volume_by_day_of_week(&self) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/appointment-volume/day-of-week")
            .await
    }

    #[tool(description = "Appointment duration average by load type")]
    pub async fn get_appointment_avg_duration_by_load_type(
        &self,
    ) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/appointment-volume/average-duration-by-load-type")
            .await
    }

    #[tool(description = "Appointment duration average by status")]
    pub async fn get_appointment_avg_duration_by_status(
        &self,
    ) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/appointment-volume/status").await
    }

    #[tool(description = "Appointment duration average by dock and status")]
    pub async fn get_appointment_avg_duration_by_dock_and_status(
        &self,
    ) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/appointment-volume/status-by-dock")
            .await
    }

    #[tool(description = "Appointment count by status for current carrier")]
    pub async fn get_appointment_count_by_status_for_carrier(
        &self,
    ) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/counts/appointment-count-for-carrier/status")
            .await
    }

    #[tool(description = "Retrieve carrier insights data with each status percentage")]
    pub async fn get_carrier_status_percentages(&self) -> Result<CallToolResult, McpError> {
        self.metrics_get("/metrics/carrier/status-percentages")
            .await
    }

    #[tool(description = "The average time spent in each appointment status")]
    pub async fn get_appointment_status_times(&self) -> Result<CallToolResult, McpError> {
        self.metrics_post("/metrics/appointments/status-times")
            .await
    }

    #[tool(
        description = "Finds the next available appointment time for each dock and loadtype, starting from the current date and time onward"
    )]
    pub async fn get_first_available_appointment(&self) -> Result<CallToolResult, McpError> {
        self.metrics_post("/metrics/loadtype/first-avail-appt")
            .await
    }

    #[tool(description = "Retrieve warehouse insights")]
    pub async fn get_warehouse_insights(&self) -> Result<CallToolResult, McpError> {
        self.metrics_post("/metrics/warehouse").await
    }

    #[tool(
        description = "Retrieve file link with the yard data list as XLSX. The link points to an external file."
    )]
    pub async fn export_yard_data_excel(&self) -> Result<CallToolResult, McpError> {
        self.metrics_post("/metrics/yard/excel").await
    }

    #[tool(description = "Appointment count per carrier")]
    pub async fn get_appointment_count_for_carrier(
        &self,
        Parameters(p): Parameters<CarrierCountParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get("/metrics/counts/appointment-count-for-carrier")
            .query("carrierId", p.carrier_id);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Appointment count per dock")]
    pub async fn get_appointment_count_for_docks(
        &self,
        Parameters(p): Parameters<DockCountParams>,
    ) -> Result<CallToolResult, McpError> {
        let req =
            ApiRequest::get("/metrics/counts/appointment-count-for-docks").query("dockIds", p.dock_ids);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Reserve count for user")]
    pub async fn get_reserve_count_for_user(
        &self,
        Parameters(p): Parameters<ReserveCountParams>,
    ) -> Result<CallToolResult, McpError> {
        let req =
            ApiRequest::get("/metrics/counts/reserve-count-for-user").query_opt("userId", p.user_id);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Retrieve dock metrics of dwell time by day of week")]
    pub async fn get_dock_dwell_time(
        &self,
        Parameters(p): Parameters<DwellTimeParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get("/metrics/dock/dwell-time")
            .query_opt("fromDate", p.from_date)
            .query_opt("toDate", p.to_date)
            .query_opt("warehouseId", p.warehouse_id)
            .query_opt("dockId", p.dock_id);
        json_content(self.api.request(req).await?)
    }

    #[tool(
        description = "Retrieve an appointment list that matches the criteria described in the request body"
    )]
    pub async fn list_appointment_metrics(
        &self,
        Parameters(p): Parameters<AppointmentMetricsParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::post("/metrics-v2/appointments").body(to_body(&p)?);
        json_content(self.api.request(req).await?)
    }

    #[tool(
        description = "Retrieve file link with the appointment list as XLSX. The link points to an external file."
    )]
    pub async fn export_appointment_metrics_excel(
        &self,
        Parameters(p): Parameters<AppointmentMetricsExcelParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::post("/metrics/appointments/excel")
            .query("emailCCs", p.email_ccs.clone())
            .body(to_body(&p.filters)?);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Retrieve warehouse dock capacity usage information per warehouse")]
    pub async fn get_warehouse_capacity_usage(
        &self,
        Parameters(p): Parameters<CapacityUsageParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::post("/metrics/warehouse/capacity-usage").body(to_body(&p)?);
        json_content(self.api.request(req).await?)
    }
}

impl OpendockServer {
    async fn metrics_get(&self, path: &str) -> Result<CallToolResult, McpError> {
        json_content(self.api.request(ApiRequest::get(path)).await?)
    }

    async fn metrics_post(&self, path: &str) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::post(path).body(json!({}));
        json_content(self.api.request(req).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::metrics_tools()
}
