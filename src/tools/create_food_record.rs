//! MCP `create_food_record` tool parameter definition.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use reap::food::types::FoodRecord;

/// Parameters for the `create_food_record` MCP tool.
///
/// Metric amounts take precedence over imperial ones when both are given.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateFoodRecordParams {
    #[schemars(description = "UUID of the owning user")]
    pub user_id: String,

    #[schemars(description = "Short name of the food, e.g. 'chicken'")]
    pub name: String,

    #[schemars(description = "Description of the food. Must not be empty.")]
    pub description: String,

    #[schemars(description = "Optional record UUID. Generated when absent or invalid.")]
    pub id: Option<String>,

    #[schemars(description = "Energy in kilojoules")]
    pub kj: Option<f64>,

    #[schemars(description = "Energy in calories. Ignored when kj is non-zero.")]
    pub calories: Option<f64>,

    #[schemars(description = "Mass in grams")]
    pub grams: Option<f64>,

    #[schemars(description = "Mass in ounces. Ignored when grams is non-zero.")]
    pub oz: Option<f64>,

    #[schemars(description = "Volume in millilitres")]
    pub ml: Option<f64>,

    #[schemars(description = "Volume in fluid ounces. Ignored when ml is non-zero.")]
    pub fl_oz: Option<f64>,

    #[schemars(description = "RFC 3339 time the food was eaten. Defaults to now.")]
    pub time: Option<String>,
}

impl CreateFoodRecordParams {
    pub fn into_record(self) -> Result<FoodRecord, String> {
        let time = self
            .time
            .as_deref()
            .map(parse_rfc3339)
            .transpose()?;

        Ok(FoodRecord {
            id: self.id.unwrap_or_default(),
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            kj: self.kj.unwrap_or_default(),
            grams: self.grams.unwrap_or_default(),
            ml: self.ml.unwrap_or_default(),
            calories: self.calories.unwrap_or_default(),
            oz: self.oz.unwrap_or_default(),
            fl_oz: self.fl_oz.unwrap_or_default(),
            time,
        })
    }
}

pub(crate) fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 time {value:?}: {e}"))
}
