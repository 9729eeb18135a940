//! Typed parameter definitions for each tool in the catalog. The JSON schemas
//! advertised to the model are derived from these structs.

pub mod create_cardio;
pub mod create_food;
pub mod create_weight_lifting;
pub mod get_food;

pub use create_cardio::CreateCardioParams;
pub use create_food::{CreateFoodParams, EnergyUnit};
pub use create_weight_lifting::{CreateWeightLiftingParams, LiftSet, WeightUnit};
pub use get_food::GetFoodParams;
