use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCardioParams {
    #[serde(rename = "routine")]
    #[schemars(description = "Activity the user is performing, e.g. walk or bicycle")]
    pub activity: String,

    #[schemars(description = "Duration of the cardio activity in seconds")]
    pub duration: i64,
}
