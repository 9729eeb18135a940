use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateWeightLiftingParams {
    #[serde(rename = "routine")]
    #[schemars(description = "Type of weight lifting activity, e.g. squats or bench press")]
    pub activity: String,

    #[schemars(description = "Weight the user is performing the activity with")]
    pub weight: f64,

    #[schemars(description = "The weight unit the user provided")]
    pub weight_unit: WeightUnit,

    #[schemars(description = "Recorded sets the user provided")]
    pub sets: Vec<LiftSet>,

    #[schemars(description = "Notes the user might have about this weight lifting activity")]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LiftSet {
    #[schemars(description = "Number of reps performed for this set")]
    pub reps: i64,

    #[schemars(description = "Rest time in seconds after this set")]
    pub rest_duration: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Kilogram,
    Pound,
    None,
}
