use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::{ErrorData as McpError, model::CallToolResult, tool, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::ApiRequest;
use crate::server::OpendockServer;
use crate::tools::{json_content, to_body};

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    TypeBroker,
    TypeCarrier,
    TypeCarrierBroker,
    TypeForwarder,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListCompaniesParams {
    #[schemars(description = "Page number")]
    pub page: Option<u32>,
    #[schemars(description = "Items per page")]
    pub limit: Option<u32>,
    #[schemars(
        description = "NestJSX/Crud search JSON (e.g. '{\"name\":{\"$contL\":\"acme\"}}')"
    )]
    pub s: Option<String>,
    #[schemars(description = "Sort directives, each as 'field,ASC' or 'field,DESC'")]
    pub sort: Option<Vec<String>>,
    #[schemars(description = "Relations to join")]
    pub join: Option<Vec<String>>,
    #[schemars(description = "Set to 0 to bypass cache")]
    pub cache: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetCompanyParams {
    #[schemars(description = "Company ID")]
    pub id: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateCompanyParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Company name")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "SCAC code")]
    pub scac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "MC number")]
    pub mc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "USDOT number")]
    pub usdot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    #[schemars(description = "Company type")]
    pub company_type: Option<CompanyType>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpdateCompanyParams {
    #[serde(skip_serializing)]
    #[schemars(description = "Company ID")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Company name")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "SCAC code")]
    pub scac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "MC number")]
    pub mc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "USDOT number")]
    pub usdot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    #[schemars(description = "Company type")]
    pub company_type: Option<CompanyType>,
}

#[tool_router(router = company_tools)]
impl OpendockServer {
    #[tool(description = "List carrier companies with optional filters and pagination")]
    pub async fn list_companies(
        &self,
        Parameters(p): Parameters<ListCompaniesParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get("/company")
            .query_opt("page", p.page)
            .query_opt("limit", p.limit)
            .query_opt("s", p.s)
            .query_opt("sort", p.sort)
            .query_opt("join", p.join)
            .query_opt("cache", p.cache);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Get details for a specific carrier company")]
    pub async fn get_company(
        &self,
        Parameters(p): Parameters<GetCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::get(format!("/company/{}", p.id));
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Create a new carrier company")]
    pub async fn create_company(
        &self,
        Parameters(p): Parameters<CreateCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::post("/company").body(to_body(&p)?);
        json_content(self.api.request(req).await?)
    }

    #[tool(description = "Update a carrier company")]
    pub async fn update_company(
        &self,
        Parameters(p): Parameters<UpdateCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let req = ApiRequest::patch(format!("/company/{}", p.id)).body(to_body(&p)?);
        json_content(self.api.request(req).await?)
    }
}

pub(crate) fn router() -> ToolRouter<OpendockServer> {
    OpendockServer::company_tools()
}
