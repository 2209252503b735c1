use crate::config::ServerConfig;
use crate::error::to_rmcp_error;
use crate::model::{
    AddWorksheetResponse, ApplyFormulaResponse, CreateChartResponse, FormatCellsResponse,
    ReadRangeResponse, UpdateCellResponse, WorksheetInfoResponse, WriteResponse,
};
use crate::resources;
use crate::state::AppState;
use crate::tools;
use anyhow::Result;
use rmcp::{
    ErrorData as McpError, Json, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        Implementation, ListResourcesResult, PaginatedRequestParam, ReadResourceRequestParam,
        ReadResourceResult, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router,
    transport::stdio,
};
use std::sync::Arc;
use thiserror::Error;

const INSTRUCTIONS: &str = "\
Excel MCP: read, write, format, and chart .xlsx workbooks.

WORKFLOW:
1) get_worksheet_info to see sheets and their used extents
2) read_excel_file for values; write_excel_file for bulk rows
3) update_cell / apply_formula for targeted edits
4) format_cells and create_chart for presentation

RANGES: A1 notation (e.g. A1:C10). A bare cell like B5 is a single-cell range.
PATHS: Relative file paths resolve under the server's workspace root.
FORMULAS: Stored, never evaluated. Reads return the literal text (\"=A1+B1\").
CHARTS: chart_type is one of line, bar, pie, scatter.

The excel://help and excel://examples resources carry full documentation.";

#[derive(Clone)]
pub struct ExcelServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<ExcelServer>,
}

impl ExcelServer {
    pub fn new(config: Arc<ServerConfig>) -> Result<Self> {
        config.ensure_workspace_root()?;
        let state = Arc::new(AppState::new(config));
        Ok(Self::from_state(state))
    }

    pub fn from_state(state: Arc<AppState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    pub async fn run_stdio(self) -> Result<()> {
        let service = self
            .serve(stdio())
            .await
            .inspect_err(|error| tracing::error!("serving error: {:?}", error))?;
        service.waiting().await?;
        Ok(())
    }

    fn ensure_tool_enabled(&self, tool: &str) -> Result<(), McpError> {
        tracing::info!(tool, "tool invocation requested");
        if self.state.config().is_tool_enabled(tool) {
            Ok(())
        } else {
            Err(McpError::invalid_request(
                ToolDisabledError::new(tool).to_string(),
                None,
            ))
        }
    }
}

#[tool_router]
impl ExcelServer {
    #[tool(
        name = "read_excel_file",
        description = "Read cell values from a worksheet range"
    )]
    pub async fn read_excel_file(
        &self,
        Parameters(params): Parameters<tools::ReadExcelFileParams>,
    ) -> Result<Json<ReadRangeResponse>, McpError> {
        self.ensure_tool_enabled("read_excel_file")?;
        tools::read_excel_file(self.state.clone(), params)
            .await
            .map(Json)
            .map_err(|e| to_rmcp_error("read_excel_file", e))
    }

    #[tool(
        name = "write_excel_file",
        description = "Write rows of data, creating the workbook if absent"
    )]
    pub async fn write_excel_file(
        &self,
        Parameters(params): Parameters<tools::WriteExcelFileParams>,
    ) -> Result<Json<WriteResponse>, McpError> {
        self.ensure_tool_enabled("write_excel_file")?;
        tools::write_excel_file(self.state.clone(), params)
            .await
            .map(Json)
            .map_err(|e| to_rmcp_error("write_excel_file", e))
    }

    #[tool(
        name = "get_worksheet_info",
        description = "List worksheets with their used extents"
    )]
    pub async fn get_worksheet_info(
        &self,
        Parameters(params): Parameters<tools::GetWorksheetInfoParams>,
    ) -> Result<Json<WorksheetInfoResponse>, McpError> {
        self.ensure_tool_enabled("get_worksheet_info")?;
        tools::get_worksheet_info(self.state.clone(), params)
            .await
            .map(Json)
            .map_err(|e| to_rmcp_error("get_worksheet_info", e))
    }

    #[tool(name = "add_worksheet", description = "Append a new empty worksheet")]
    pub async fn add_worksheet(
        &self,
        Parameters(params): Parameters<tools::AddWorksheetParams>,
    ) -> Result<Json<AddWorksheetResponse>, McpError> {
        self.ensure_tool_enabled("add_worksheet")?;
        tools::add_worksheet(self.state.clone(), params)
            .await
            .map(Json)
            .map_err(|e| to_rmcp_error("add_worksheet", e))
    }

    #[tool(
        name = "update_cell",
        description = "Set a single cell's value; '=' strings are stored as formulas"
    )]
    pub async fn update_cell(
        &self,
        Parameters(params): Parameters<tools::UpdateCellParams>,
    ) -> Result<Json<UpdateCellResponse>, McpError> {
        self.ensure_tool_enabled("update_cell")?;
        tools::update_cell(self.state.clone(), params)
            .await
            .map(Json)
            .map_err(|e| to_rmcp_error("update_cell", e))
    }

    #[tool(
        name = "apply_formula",
        description = "Store a formula in a cell without evaluating it"
    )]
    pub async fn apply_formula(
        &self,
        Parameters(params): Parameters<tools::ApplyFormulaParams>,
    ) -> Result<Json<ApplyFormulaResponse>, McpError> {
        self.ensure_tool_enabled("apply_formula")?;
        tools::apply_formula(self.state.clone(), params)
            .await
            .map(Json)
            .map_err(|e| to_rmcp_error("apply_formula", e))
    }

    #[tool(
        name = "format_cells",
        description = "Apply font, fill, border, and alignment options to a range"
    )]
    pub async fn format_cells(
        &self,
        Parameters(params): Parameters<tools::FormatCellsParams>,
    ) -> Result<Json<FormatCellsResponse>, McpError> {
        self.ensure_tool_enabled("format_cells")?;
        tools::format_cells(self.state.clone(), params)
            .await
            .map(Json)
            .map_err(|e| to_rmcp_error("format_cells", e))
    }

    #[tool(
        name = "create_chart",
        description = "Insert a line, bar, pie, or scatter chart over a data range"
    )]
    pub async fn create_chart(
        &self,
        Parameters(params): Parameters<tools::CreateChartParams>,
    ) -> Result<Json<CreateChartResponse>, McpError> {
        self.ensure_tool_enabled("create_chart")?;
        tools::create_chart(self.state.clone(), params)
            .await
            .map(Json)
            .map_err(|e| to_rmcp_error("create_chart", e))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for ExcelServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: resources::resource_list(),
            ..Default::default()
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match resources::read(&request.uri) {
            Some(contents) => Ok(ReadResourceResult {
                contents: vec![contents],
            }),
            None => Err(McpError::invalid_params(
                format!("unknown resource URI: {}", request.uri),
                None,
            )),
        }
    }
}

#[derive(Debug, Error)]
#[error("tool '{tool_name}' is disabled by server configuration")]
struct ToolDisabledError {
    tool_name: String,
}

impl ToolDisabledError {
    fn new(tool_name: &str) -> Self {
        Self {
            tool_name: tool_name.to_ascii_lowercase(),
        }
    }
}
