/* @generated and managed by dsync */

#[allow(unused)]
use crate::diesel::*;
use crate::models::api_tool_providers::ApiToolProviders;
use crate::schema::*;

/// Struct representing a row in table `api_tools`
#[derive(
    Debug,
    Clone,
    serde::Serialize,
    serde::Deserialize,
    diesel::Queryable,
    diesel::Selectable,
    diesel::QueryableByName,
    diesel::Identifiable,
    diesel::Associations,
)]
#[diesel(table_name=api_tools, primary_key(id), belongs_to(ApiToolProviders, foreign_key=provider_id))]
pub struct ApiTools {
    /// Field representing column `id`
    pub id: uuid::Uuid,
    /// Field representing column `account_id`
    pub account_id: String,
    /// Field representing column `provider_id`
    pub provider_id: uuid::Uuid,
    /// Field representing column `position`
    pub position: i32,
    /// Field representing column `name`
    pub name: String,
    /// Field representing column `description`
    pub description: String,
    /// Field representing column `url`
    pub url: String,
    /// Field representing column `method`
    pub method: String,
    /// Field representing column `parameters`
    pub parameters: serde_json::Value,
    /// Field representing column `created_at`
    pub created_at: chrono::NaiveDateTime,
    /// Field representing column `updated_at`
    pub updated_at: chrono::NaiveDateTime,
}

/// Create Struct for a row in table `api_tools` for [`ApiTools`]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, diesel::Insertable)]
#[diesel(table_name=api_tools)]
pub struct CreateApiTools {
    /// Field representing column `id`
    pub id: uuid::Uuid,
    /// Field representing column `account_id`
    pub account_id: String,
    /// Field representing column `provider_id`
    pub provider_id: uuid::Uuid,
    /// Field representing column `position`
    pub position: i32,
    /// Field representing column `name`
    pub name: String,
    /// Field representing column `description`
    pub description: String,
    /// Field representing column `url`
    pub url: String,
    /// Field representing column `method`
    pub method: String,
    /// Field representing column `parameters`
    pub parameters: serde_json::Value,
    /// Field representing column `created_at`
    pub created_at: chrono::NaiveDateTime,
    /// Field representing column `updated_at`
    pub updated_at: chrono::NaiveDateTime,
}
