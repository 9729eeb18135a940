use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateFoodParams {
    #[schemars(
        description = "A generated description of the food with some helpful detail, e.g. grilled chicken breast with steamed vegetables"
    )]
    pub description: String,

    #[schemars(description = "Normalized name of the food being logged, e.g. chicken and vegetables")]
    pub name: String,

    #[schemars(description = "If provided by the user, the energy the food contained, e.g. 500")]
    pub energy: f64,

    #[schemars(
        description = "The energy unit the user provided. If they provided no energy amount, this should be none"
    )]
    pub energy_unit: EnergyUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnergyUnit {
    Calorie,
    Kilojoule,
    None,
}
