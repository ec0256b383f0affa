//! Table models and their conversions to domain records.

use llmops_core::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Provider table models.
pub mod api_tool_providers;
/// Tool table models.
pub mod api_tools;

/// Encodes a value for a `json` or `jsonb` column.
pub(crate) fn to_json_column<T: Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| AppError::General(e.to_string()))
}

/// Decodes a `json` or `jsonb` column, naming it in the error.
pub(crate) fn from_json_column<T: DeserializeOwned>(value: serde_json::Value, column: &str) -> AppResult<T> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Database(format!("corrupt `{column}` column: {e}")))
}
