//! Provider table models.

/// Generated provider models and Diesel mappings.
pub mod generated;
/// Re-export generated models for convenient access.
pub use generated::*;

use super::{from_json_column, to_json_column};
use chrono::NaiveDateTime;
use llmops_core::{ApiToolProvider, AppResult, ProviderDraft};
use uuid::Uuid;

impl ApiToolProviders {
    /// Converts the row into the domain record.
    pub fn into_domain(self) -> AppResult<ApiToolProvider> {
        Ok(ApiToolProvider {
            id: self.id.to_string(),
            account_id: self.account_id,
            name: self.name,
            icon: self.icon,
            description: self.description,
            openapi_schema: from_json_column(self.openapi_schema, "openapi_schema")?,
            headers: from_json_column(self.headers, "headers")?,
            created_at: self.created_at.and_utc(),
        })
    }
}

impl CreateApiToolProviders {
    /// Builds the insert row for a new provider.
    pub fn from_draft(id: Uuid, draft: &ProviderDraft, now: NaiveDateTime) -> AppResult<Self> {
        Ok(Self {
            id,
            account_id: draft.account_id.clone(),
            name: draft.name.clone(),
            icon: draft.icon.clone(),
            description: draft.description().to_string(),
            openapi_schema: to_json_column(&draft.openapi_schema)?,
            headers: to_json_column(&draft.headers)?,
            created_at: now,
            updated_at: now,
        })
    }
}

impl UpdateApiToolProviders {
    /// Builds the changeset replacing every editable column.
    pub fn from_draft(draft: &ProviderDraft, now: NaiveDateTime) -> AppResult<Self> {
        Ok(Self {
            name: Some(draft.name.clone()),
            icon: Some(draft.icon.clone()),
            description: Some(draft.description().to_string()),
            openapi_schema: Some(to_json_column(&draft.openapi_schema)?),
            headers: Some(to_json_column(&draft.headers)?),
            updated_at: Some(now),
        })
    }
}
