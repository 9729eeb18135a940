//! MCP `call_fn_user_input` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `call_fn_user_input` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CallFnUserInputParams {
    #[schemars(
        description = "Free-text diary input, e.g. 'I had 500 calories of chicken' or 'how many calories did I eat today?'"
    )]
    pub user_input: String,

    #[schemars(description = "UUID of the user whose diary is read or written")]
    pub user_id: String,
}
