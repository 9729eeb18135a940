use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ActionUserInputParams {
    #[schemars(description = "Free-text diary input")]
    pub user_input: String,
}
