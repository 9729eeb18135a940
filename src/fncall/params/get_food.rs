use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Timestamp layout the model must use for the time window.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetFoodParams {
    #[schemars(
        description = "Optional text the food name must contain. Use an empty string to match every food"
    )]
    pub query: String,

    #[schemars(
        description = "ISO 8601 timestamp formatted as YYYY-MM-DDTHH:MM:SS+hhmm. Get all food records after this time"
    )]
    pub after_time: String,

    #[schemars(
        description = "ISO 8601 timestamp formatted as YYYY-MM-DDTHH:MM:SS+hhmm. Get all food records before this time"
    )]
    pub before_time: String,
}
