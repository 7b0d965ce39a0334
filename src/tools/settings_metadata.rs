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
pub struct EntityTypeParams {
    #[schemars(description = "Entity type (e.g. 'warehouse', 'dock', 'appointment')")]
    pub entity_type: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingKeyParams {
    #[schemars(description = "Entity type (e.g. 'warehouse', 'dock', 'appointment')")]
    pub entity_type: String,
    #[schemars(description = "Setting key")]
    pub setting_key: String,
}

#[tool_router(router = settings_metadata_tools)]
impl OpendockServer {
    #[tool(description = "Get all settings metadata for an entity type")]
    pub async fn get_settings_metadata(
        &self,
        Parameters(p): Parameters<EntityTypeParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!("/settings-metadata/{}", p.entity_type));
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Get a specific setting metadata entry by entity type and setting key")]
    pub async fn get_setting_metadata(
        &self,
        Parameters(p): Parameters<SettingKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!(
            "/settings-metadata/{}/{}",
            p.entity_type, p.setting_key
        ));
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Validate settings for an entity type")]
    pub async fn validate_settings_metadata(
        &self,
        Parameters(p): Parameters<EntityTypeParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::post(format!("/settings-metadata/validate/{}", p.entity_type));
        json_content(self.api.request(req).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::settings_metadata_tools()
}
