/* @generated and managed by dsync */

#[allow(unused)]
use crate::diesel::*;
use crate::schema::*;

/// Struct representing a row in table `api_tool_providers`
#[derive(
    Debug,
    Clone,
    serde::Serialize,
    serde::Deserialize,
    diesel::Queryable,
    diesel::Selectable,
    diesel::QueryableByName,
    diesel::Identifiable,
)]
#[diesel(table_name=api_tool_providers, primary_key(id))]
pub struct ApiToolProviders {
    /// Field representing column `id`
    pub id: uuid::Uuid,
    /// Field representing column `account_id`
    pub account_id: String,
    /// Field representing column `name`
    pub name: String,
    /// Field representing column `icon`
    pub icon: String,
    /// Field representing column `description`
    pub description: String,
    /// Field representing column `openapi_schema`
    pub openapi_schema: serde_json::Value,
    /// Field representing column `headers`
    pub headers: serde_json::Value,
    /// Field representing column `created_at`
    pub created_at: chrono::NaiveDateTime,
    /// Field representing column `updated_at`
    pub updated_at: chrono::NaiveDateTime,
}

/// Create Struct for a row in table `api_tool_providers` for [`ApiToolProviders`]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, diesel::Insertable)]
#[diesel(table_name=api_tool_providers)]
pub struct CreateApiToolProviders {
    /// Field representing column `id`
    pub id: uuid::Uuid,
    /// Field representing column `account_id`
    pub account_id: String,
    /// Field representing column `name`
    pub name: String,
    /// Field representing column `icon`
    pub icon: String,
    /// Field representing column `description`
    pub description: String,
    /// Field representing column `openapi_schema`
    pub openapi_schema: serde_json::Value,
    /// Field representing column `headers`
    pub headers: serde_json::Value,
    /// Field representing column `created_at`
    pub created_at: chrono::NaiveDateTime,
    /// Field representing column `updated_at`
    pub updated_at: chrono::NaiveDateTime,
}

/// Update Struct for a row in table `api_tool_providers` for [`ApiToolProviders`]
#[derive(
    Debug, Clone, serde::Serialize, serde::Deserialize, diesel::AsChangeset, PartialEq, Default,
)]
#[diesel(table_name=api_tool_providers)]
pub struct UpdateApiToolProviders {
    /// Field representing column `name`
    pub name: Option<String>,
    /// Field representing column `icon`
    pub icon: Option<String>,
    /// Field representing column `description`
    pub description: Option<String>,
    /// Field representing column `openapi_schema`
    pub openapi_schema: Option<serde_json::Value>,
    /// Field representing column `headers`
    pub headers: Option<serde_json::Value>,
    /// Field representing column `updated_at`
    pub updated_at: Option<chrono::NaiveDateTime>,
}
