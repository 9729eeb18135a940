//! MCP `get_food_records` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::create_food_record::parse_rfc3339;
use reap::food::types::GetFoodFilter;

/// Parameters for the `get_food_records` MCP tool. Every filter is optional
/// and all supplied filters must match.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetFoodRecordsParams {
    #[schemars(description = "UUID of the user whose records are returned")]
    pub user_id: String,

    #[schemars(description = "Only the record with this UUID")]
    pub id: Option<String>,

    #[schemars(description = "Text the record name must contain")]
    pub name: Option<String>,

    #[schemars(description = "Text the record description must contain")]
    pub description: Option<String>,

    #[schemars(description = "RFC 3339 time. Only records created at or after it.")]
    pub after_time: Option<String>,

    #[schemars(description = "RFC 3339 time. Only records created at or before it.")]
    pub before_time: Option<String>,
}

impl GetFoodRecordsParams {
    /// Split into the owning user and the record filter.
    pub fn into_filter(self) -> Result<(String, GetFoodFilter), String> {
        let filter = GetFoodFilter {
            id: self.id,
            name: self.name,
            description: self.description,
            after_time: self.after_time.as_deref().map(parse_rfc3339).transpose()?,
            before_time: self.before_time.as_deref().map(parse_rfc3339).transpose()?,
        };
        Ok((self.user_id, filter))
    }
}
