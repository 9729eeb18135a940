pub mod action_user_input;
pub mod call_fn_user_input;
pub mod create_food_record;
pub mod get_food_records;

use action_user_input::ActionUserInputParams;
use call_fn_user_input::CallFnUserInputParams;
use create_food_record::CreateFoodRecordParams;
use get_food_records::GetFoodRecordsParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, RoleServer, ServerHandler};
use std::sync::Arc;

use reap::central::CentralService;
use reap::error::ReapError;

/// The Reap MCP tool handler. Holds the shared [`CentralService`] and exposes
/// its operations via the `#[tool_router]` macro. Each call is cancelled when
/// the client cancels the request.
#[derive(Clone)]
pub struct ReapTools {
    tool_router: ToolRouter<Self>,
    central: Arc<CentralService>,
}

#[tool_router]
impl ReapTools {
    pub fn new(central: Arc<CentralService>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            central,
        }
    }

    /// Run free-text diary input through the tool-calling assistant.
    #[tool(description = "Send free-text diary input for a user. Food mentions are logged and questions are answered from stored records. Returns the assistant's reply.")]
    async fn call_fn_user_input(
        &self,
        Parameters(params): Parameters<CallFnUserInputParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<String, String> {
        tracing::info!(
            user_id = %params.user_id,
            input_len = params.user_input.len(),
            "call_fn_user_input called"
        );

        self.central
            .call_fn_user_input(&params.user_input, &params.user_id, &ctx.ct)
            .await
            .map_err(tool_error)
    }

    /// Free-text input answered through structured output parsing.
    #[tool(description = "Send free-text diary input without a user identity. Not yet available.")]
    async fn action_user_input(
        &self,
        Parameters(params): Parameters<ActionUserInputParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<String, String> {
        self.central
            .action_user_input(&params.user_input, &ctx.ct)
            .await
            .map_err(tool_error)
    }

    /// Store a food record directly, bypassing the assistant.
    #[tool(description = "Create a food record directly. Returns the stored record with both metric and imperial amounts.")]
    async fn create_food_record(
        &self,
        Parameters(params): Parameters<CreateFoodRecordParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<String, String> {
        let record = params.into_record()?;
        tracing::info!(user_id = %record.user_id, name = %record.name, "create_food_record called");

        let created = self
            .central
            .create_food_record(record, &ctx.ct)
            .await
            .map_err(tool_error)?;

        serde_json::to_string(&created).map_err(|e| format!("serialization failed: {e}"))
    }

    /// Fetch a user's food records, bypassing the assistant.
    #[tool(description = "Get a user's food records. Optional filters on id, name, description and a creation time window are all applied together.")]
    async fn get_food_records(
        &self,
        Parameters(params): Parameters<GetFoodRecordsParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<String, String> {
        let (user_id, filter) = params.into_filter()?;
        tracing::info!(user_id = %user_id, "get_food_records called");

        let records = self
            .central
            .get_food_records(&user_id, &filter, &ctx.ct)
            .await
            .map_err(tool_error)?;

        serde_json::to_string(&serde_json::json!({
            "records": records,
            "total": records.len(),
        }))
        .map_err(|e| format!("serialization failed: {e}"))
    }
}

/// Render a service error for the client. Only validation and
/// not-implemented errors carry detail; everything else is logged.
fn tool_error(err: ReapError) -> String {
    match err {
        ReapError::NotImplemented(what) => format!("{what} is not implemented"),
        e if e.is_validation() => e.to_string(),
        ReapError::Cancelled => "request cancelled".into(),
        e => {
            tracing::error!(error = %e, "tool call failed");
            "internal error".into()
        }
    }
}

#[tool_handler]
impl ServerHandler for ReapTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Reap keeps a food diary. Use call_fn_user_input with free text to log food \
                 or ask about past meals, or create_food_record and get_food_records for \
                 structured access."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
