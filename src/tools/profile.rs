use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::{ErrorData as McpError, model::CallToolResult, tool, tool_router};

use crate::api::ApiRequest;
use crate::server::OpendockServer;
use crate::tools::json_content;

#[tool_router(router = profile_tools)]
impl OpendockServer {
    #[tool(description = "Get the current authenticated user's profile")]
    pub async fn get_profile(&self) -> Result<CallToolResult, McpError> {
        json_content(self.api.request(ApiRequest::get("/auth/profile")).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::profile_tools()
}
