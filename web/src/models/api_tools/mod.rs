//! Tool table models.

/// Generated tool models and Diesel mappings.
pub mod generated;
/// Re-export generated models for convenient access.
pub use generated::*;

use super::{from_json_column, to_json_column};
use chrono::NaiveDateTime;
use llmops_core::{ApiTool, AppError, AppResult, HttpMethod, ProviderDraft};
use uuid::Uuid;

impl ApiTools {
    /// Converts the row into the domain record.
    pub fn into_domain(self) -> AppResult<ApiTool> {
        let method = HttpMethod::parse(&self.method).ok_or_else(|| {
            AppError::Database(format!("corrupt `method` column: {}", self.method))
        })?;
        Ok(ApiTool {
            id: self.id.to_string(),
            provider_id: self.provider_id.to_string(),
            account_id: self.account_id,
            name: self.name,
            description: self.description,
            url: self.url,
            method,
            parameters: from_json_column(self.parameters, "parameters")?,
            created_at: self.created_at.and_utc(),
        })
    }
}

impl CreateApiTools {
    /// Builds the insert rows for every tool of `draft`, keeping schema order.
    pub fn from_draft(provider_id: Uuid, draft: &ProviderDraft, now: NaiveDateTime) -> AppResult<Vec<Self>> {
        draft
            .tools
            .iter()
            .zip(0..)
            .map(|(tool, position)| {
                Ok(Self {
                    id: Uuid::new_v4(),
                    account_id: draft.account_id.clone(),
                    provider_id,
                    position,
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    url: tool.url.clone(),
                    method: tool.method.as_str().to_string(),
                    parameters: to_json_column(&tool.parameters)?,
                    created_at: now,
                    updated_at: now,
                })
            })
            .collect()
    }
}
