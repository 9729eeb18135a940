//! The tool catalog advertised to the completion service.
//!
//! Each tool's parameter schema is derived from its typed parameter struct in
//! [`super::params`]. Construction fails if any schema lacks `properties` or
//! `required`; there is no partial catalog.

use std::path::{Path, PathBuf};

use schemars::generate::SchemaSettings;
use schemars::JsonSchema;
use serde_json::{json, Map, Value};

use super::params::{CreateCardioParams, CreateFoodParams, CreateWeightLiftingParams, GetFoodParams};
use crate::llm::{FunctionDefinition, ToolDefinition};

pub const LOG_FOOD: &str = "log_food";
pub const GET_FOOD: &str = "get_food";
pub const LOG_WEIGHT_LIFTING: &str = "log_weight_lifting";
pub const LOG_CARDIO: &str = "log_cardio";

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("schema for {tool} has no {field}")]
    MissingField { tool: &'static str, field: &'static str },

    #[error("failed to serialize schema for {tool}: {source}")]
    Serialize {
        tool: String,
        source: serde_json::Error,
    },

    #[error("failed to write schema to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The complete set of tools, with parameter schemas.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl ToolCatalog {
    /// Derive every tool schema.
    pub fn new() -> Result<Self, CatalogError> {
        let tools = vec![
            definition::<CreateFoodParams>(
                LOG_FOOD,
                "log food entry in diary with supplied details",
            )?,
            definition::<GetFoodParams>(GET_FOOD, "retrieves food entries from the diary")?,
            definition::<CreateWeightLiftingParams>(
                LOG_WEIGHT_LIFTING,
                "log weight lifting session in diary with supplied details",
            )?,
            definition::<CreateCardioParams>(
                LOG_CARDIO,
                "log cardio workout in diary with supplied details",
            )?,
        ];

        tracing::debug!(tools = tools.len(), "tool catalog built");
        Ok(Self { tools })
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.function.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.function.name.as_str())
    }

    /// Write each tool's parameter schema to `<dir>/<tool>.json` for inspection.
    pub fn write_schemas(&self, dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
        std::fs::create_dir_all(dir).map_err(|source| CatalogError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(self.tools.len());
        for tool in &self.tools {
            let path = dir.join(format!("{}.json", tool.function.name));
            let body = serde_json::to_string_pretty(&tool.function.parameters).map_err(|source| {
                CatalogError::Serialize {
                    tool: tool.function.name.clone(),
                    source,
                }
            })?;
            std::fs::write(&path, body).map_err(|source| CatalogError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote tool schema");
            written.push(path);
        }
        Ok(written)
    }
}

fn definition<T: JsonSchema>(
    name: &'static str,
    description: &str,
) -> Result<ToolDefinition, CatalogError> {
    Ok(ToolDefinition {
        kind: "function".to_string(),
        function: FunctionDefinition {
            name: name.to_string(),
            description: description.to_string(),
            strict: true,
            parameters: parameters_for::<T>(name)?,
        },
    })
}

/// Derive a strict-mode parameter object for `T`: subschemas inlined, no
/// `format` annotations, and `additionalProperties: false` at the top.
pub fn parameters_for<T: JsonSchema>(tool: &'static str) -> Result<Value, CatalogError> {
    let generator = SchemaSettings::draft2020_12()
        .with(|s| s.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let mut schema =
        serde_json::to_value(&schema).map_err(|source| CatalogError::Serialize {
            tool: tool.to_string(),
            source,
        })?;
    strip_formats(&mut schema);

    let properties = schema
        .get("properties")
        .cloned()
        .ok_or(CatalogError::MissingField {
            tool,
            field: "properties",
        })?;
    let required = schema
        .get("required")
        .cloned()
        .ok_or(CatalogError::MissingField {
            tool,
            field: "required",
        })?;

    Ok(json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    }))
}

fn strip_formats(value: &mut Value) {
    match value {
        Value::Object(map) => {
            strip_format_key(map);
            for v in map.values_mut() {
                strip_formats(v);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_formats),
        _ => {}
    }
}

fn strip_format_key(map: &mut Map<String, Value>) {
    if matches!(map.get("format"), Some(Value::String(_))) {
        map.remove("format");
    }
}
