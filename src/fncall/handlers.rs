//! Per-tool handlers. Each turns decoded arguments into a structured result
//! that is reinjected into the conversation; store errors are logged here and
//! never shown to the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::catalog::{GET_FOOD, LOG_CARDIO, LOG_FOOD, LOG_WEIGHT_LIFTING};
use super::params::{
    get_food::TIME_FORMAT, CreateCardioParams, CreateFoodParams, CreateWeightLiftingParams,
    EnergyUnit, GetFoodParams,
};
use super::FnCallError;
use crate::central::FoodService;
use crate::food::types::{FoodRecord, GetFoodFilter};
use crate::llm::FunctionCall;

/// Payload sent back when a tool result cannot be encoded.
pub const FAILED_TOOL_CALL_MESSAGE: &str = r#"{"success":false,"message":"tool calling failed"}"#;

/// Result of one tool invocation, as seen by the model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FnCallOutputResponse {
    pub message: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<FoodRecord>,
}

impl FnCallOutputResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            records: Vec::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            records: Vec::new(),
        }
    }
}

/// A tool call with its arguments decoded into the matching parameter type.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    LogFood(CreateFoodParams),
    GetFood(GetFoodParams),
    LogWeightLifting(CreateWeightLiftingParams),
    LogCardio(CreateCardioParams),
    Unknown(String),
}

impl ToolInvocation {
    /// Decode `call` by its declared name. Unknown names are not an error.
    pub fn decode(call: &FunctionCall) -> Result<Self, FnCallError> {
        let decode_err = |source| FnCallError::DecodeArguments {
            tool: call.name.clone(),
            source,
        };

        let invocation = match call.name.as_str() {
            LOG_FOOD => Self::LogFood(serde_json::from_str(&call.arguments).map_err(decode_err)?),
            GET_FOOD => Self::GetFood(serde_json::from_str(&call.arguments).map_err(decode_err)?),
            LOG_WEIGHT_LIFTING => {
                Self::LogWeightLifting(serde_json::from_str(&call.arguments).map_err(decode_err)?)
            }
            LOG_CARDIO => {
                Self::LogCardio(serde_json::from_str(&call.arguments).map_err(decode_err)?)
            }
            other => Self::Unknown(other.to_string()),
        };
        Ok(invocation)
    }
}

/// Route a decoded invocation to its handler.
pub async fn dispatch(
    invocation: ToolInvocation,
    food: &FoodService,
    user_id: &str,
    cancel: &CancellationToken,
) -> FnCallOutputResponse {
    match invocation {
        ToolInvocation::LogFood(params) => handle_create_food(food, user_id, params, cancel).await,
        ToolInvocation::GetFood(params) => handle_get_food(food, user_id, params, cancel).await,
        ToolInvocation::LogWeightLifting(_) => {
            FnCallOutputResponse::failed("weight lifting not yet completed, sorry")
        }
        ToolInvocation::LogCardio(_) => {
            FnCallOutputResponse::failed("cardio logging not yet completed, sorry")
        }
        ToolInvocation::Unknown(name) => {
            tracing::warn!(tool = %name, "model called an unknown tool");
            FnCallOutputResponse::failed("unmatched")
        }
    }
}

pub async fn handle_create_food(
    food: &FoodService,
    user_id: &str,
    params: CreateFoodParams,
    cancel: &CancellationToken,
) -> FnCallOutputResponse {
    let mut record = FoodRecord {
        user_id: user_id.to_string(),
        name: params.name,
        description: params.description,
        ..FoodRecord::default()
    };
    match params.energy_unit {
        EnergyUnit::Calorie => record.calories = params.energy,
        EnergyUnit::Kilojoule => record.kj = params.energy,
        EnergyUnit::None => {}
    }

    match food.create_food_record(record, cancel).await {
        Ok(created) => {
            tracing::info!(id = %created.id, name = %created.name, "food record logged");
            FnCallOutputResponse::ok("successfully created food record")
        }
        Err(e) => {
            tracing::error!(error = %e, user_id, "failed to create food record");
            FnCallOutputResponse::failed("failed to create food record")
        }
    }
}

pub async fn handle_get_food(
    food: &FoodService,
    user_id: &str,
    params: GetFoodParams,
    cancel: &CancellationToken,
) -> FnCallOutputResponse {
    let (after, before) = match (
        parse_tool_time(&params.after_time),
        parse_tool_time(&params.before_time),
    ) {
        (Ok(after), Ok(before)) => (after, before),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(
                error = %e,
                after = %params.after_time,
                before = %params.before_time,
                "unparseable time window"
            );
            return FnCallOutputResponse::failed("failed to get food records");
        }
    };

    let filter = GetFoodFilter {
        name: Some(params.query).filter(|q| !q.is_empty()),
        after_time: Some(after),
        before_time: Some(before),
        ..GetFoodFilter::default()
    };

    match food.get_food_records(user_id, &filter, cancel).await {
        Ok(records) if records.is_empty() => {
            FnCallOutputResponse::ok("no records found with given arguments")
        }
        Ok(records) => FnCallOutputResponse {
            message: format!("successfully found {} food records", records.len()),
            success: true,
            records,
        },
        Err(e) => {
            tracing::error!(error = %e, user_id, "failed to get food records");
            FnCallOutputResponse::failed("failed to get food records")
        }
    }
}

fn parse_tool_time(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(value, TIME_FORMAT).map(|t| t.with_timezone(&Utc))
}

/// Encode a tool result for the conversation. On failure the error is logged
/// and [`FAILED_TOOL_CALL_MESSAGE`] is used instead.
pub fn encode_tool_result<T: Serialize>(result: &T) -> String {
    match serde_json::to_string(result) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode tool result, using fallback");
            FAILED_TOOL_CALL_MESSAGE.to_string()
        }
    }
}
