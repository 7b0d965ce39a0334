use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::{ErrorData as McpError, model::CallToolResult, tool, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::ApiRequest;
use crate::server::OpendockServer;
use crate::tools::{json_content, to_body};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetOrgParams {
    #[schemars(description = "Organization ID")]
    pub id: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrgParams {
    #[serde(skip_serializing)]
    #[schemars(description = "Organization ID")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Organization name")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Organization settings")]
    pub settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "List of favorite carrier IDs")]
    pub favorite_carrier_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFavoriteCarriersParams {
    #[schemars(description = "Organization ID")]
    pub org_id: String,
    #[schemars(description = "List of carrier IDs to set as favorites")]
    pub carrier_ids: Vec<String>,
}

#[tool_router(router = org_tools)]
impl OpendockServer {
    #[tool(description = "Get details for an organization")]
    pub async fn get_org(
        &self,
        Parameters(p): Parameters<GetOrgParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!("/org/{}", p.id));
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Update an organization")]
    pub async fn update_org(
        &self,
        Parameters(p): Parameters<UpdateOrgParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::patch(format!("/org/{}", p.id)).body(to_body(&p)?);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Update the list of favorite carriers for an organization")]
    pub async fn update_favorite_carriers(
        &self,
        Parameters(p): Parameters<UpdateFavoriteCarriersParams>,
    ) -> Result<CallToolResult, McpError> {
        // The endpoint takes the bare ID array as its body, not an object.
        let req = ApiRequest::patch(format!("/org/{}/favorite-carriers", p.org_id))
            .body(to_body(&p.carrier_ids)?);
        json_content(self.api.request(req).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::org_tools()
}
