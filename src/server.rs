use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, JsonObject, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageRole,
        ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool_handler,
};

use crate::api::ApiClient;
use crate::tools;

/// MCP server wrapping the OpenDock REST API.
///
/// Tool handlers live in per-resource modules under [`crate::tools`]; each
/// contributes a router segment combined here. All of them go through the
/// shared [`ApiClient`], which owns auth and retry policy.
#[derive(Clone)]
pub struct OpendockServer {
    pub(crate) api: Arc<ApiClient>,
    tool_router: ToolRouter<Self>,
}

impl OpendockServer {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            tool_router: tools::profile::router()
                + tools::warehouses::router()
                + tools::docks::router()
                + tools::loadtypes::router()
                + tools::appointments::router()
                + tools::carriers::router()
                + tools::companies::router()
                + tools::orgs::router()
                + tools::audit_log::router()
                + tools::settings_metadata::router()
                + tools::metrics::router(),
        }
    }
}

fn arg<'a>(args: &'a Option<JsonObject>, key: &str) -> Option<&'a str> {
    args.as_ref()?.get(key)?.as_str()
}

fn required_arg<'a>(args: &'a Option<JsonObject>, key: &str) -> Result<&'a str, McpError> {
    arg(args, key)
        .ok_or_else(|| McpError::invalid_params(format!("missing required argument '{key}'"), None))
}

fn prompt_arg(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        description: Some(description.to_string()),
        required: Some(required),
    }
}

#[tool_handler]
impl ServerHandler for OpendockServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Tools for the OpenDock dock-scheduling API: list and manage warehouses, \
                 docks, load types, appointments, carriers, companies and organizations."
                    .into(),
            ),
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            next_cursor: None,
            prompts: vec![
                Prompt::new(
                    "book-appointment",
                    Some(
                        "Guide for booking a new appointment at a warehouse. Walks through \
                         selecting a dock, load type, and available time slot.",
                    ),
                    Some(vec![
                        prompt_arg("warehouseId", "Warehouse ID to book at", true),
                        prompt_arg(
                            "date",
                            "Preferred date (YYYY-MM-DD). Finds next available if not provided.",
                            false,
                        ),
                    ]),
                ),
                Prompt::new(
                    "daily-schedule",
                    Some(
                        "Fetch and summarize all appointments at a warehouse for a specific day.",
                    ),
                    Some(vec![
                        prompt_arg("warehouseId", "Warehouse ID", true),
                        prompt_arg("date", "Date to check (YYYY-MM-DD)", true),
                    ]),
                ),
                Prompt::new(
                    "reschedule-appointment",
                    Some("Guide for rescheduling an existing appointment to a new time slot."),
                    Some(vec![prompt_arg(
                        "appointmentId",
                        "ID of the appointment to reschedule",
                        true,
                    )]),
                ),
                Prompt::new(
                    "carrier-performance",
                    Some(
                        "Analyze carrier performance metrics including appointment volumes, \
                         on-time rates, and status breakdowns.",
                    ),
                    None,
                ),
            ],
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let args = &request.arguments;
        let text = match request.name.as_ref() {
            "book-appointment" => {
                let warehouse_id = required_arg(args, "warehouseId")?;
                let for_date = arg(args, "date")
                    .map(|d| format!(" for {d}"))
                    .unwrap_or_default();
                format!(
                    "I need to book an appointment at warehouse {warehouse_id}{for_date}.\n\n\
                     Please help me:\n\
                     1. Use list_docks to find available docks for warehouse {warehouse_id}\n\
                     2. Use list_load_types to find the applicable load types for this warehouse\n\
                     3. Use get_first_available_appointment and create_appointment to find and book an open slot\n\
                     4. Confirm the booked appointment details when done\n\n\
                     Start by listing the docks and load types for this warehouse."
                )
            }
            "daily-schedule" => {
                let warehouse_id = required_arg(args, "warehouseId")?;
                let date = required_arg(args, "date")?;
                format!(
                    "Show me the appointment schedule for warehouse {warehouse_id} on {date}.\n\n\
                     Use list_appointments with warehouseId=\"{warehouse_id}\", startDate=\"{date}\", \
                     endDate=\"{date}\" to include carrier details.\n\n\
                     Summarize the schedule grouped by dock, showing start/end times, carrier, \
                     load type, and status for each appointment."
                )
            }
            "reschedule-appointment" => {
                let appointment_id = required_arg(args, "appointmentId")?;
                format!(
                    "I need to reschedule appointment {appointment_id}.\n\n\
                     Please:\n\
                     1. Use get_appointment to fetch the current appointment details (dock, load type, current time)\n\
                     2. Use get_load_type_availability to find alternative open slots\n\
                     3. Present the available options to me\n\
                     4. Use update_appointment to apply the change once I confirm the new time\n\n\
                     Start by fetching the current appointment details."
                )
            }
            "carrier-performance" => "Give me an overview of carrier performance.\n\n\
                 Use these tools to build a complete picture:\n\
                 1. get_appointment_volume_by_carrier - appointment counts per carrier\n\
                 2. get_carrier_status_percentages - status breakdown (on-time, late, etc.) per carrier\n\
                 3. get_appointment_avg_duration_by_status - average dwell times by status\n\n\
                 Summarize the top performers and flag any carriers with concerning patterns \
                 (high late rates, long dwell times, etc.)."
                .to_string(),
            other => {
                return Err(McpError::invalid_params(
                    format!("unknown prompt '{other}'"),
                    None,
                ));
            }
        };

        Ok(GetPromptResult {
            description: None,
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }
}
