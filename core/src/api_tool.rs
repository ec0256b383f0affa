#![deny(missing_docs)]

//! # API Tool Providers
//!
//! Registration workflow for external API tool providers. A provider is a
//! validated [`Openapi`] document plus presentation data (name, icon, request
//! headers); each `(path, method)` of the document becomes one [`ApiTool`].
//!
//! Persistence is abstracted by [`ApiToolRepository`]; every operation is
//! scoped to the calling account.

use crate::error::{AppError, AppResult};
use crate::openapi_schema::{
    validate_openapi_schema, HttpMethod, Openapi, ParameterDescriptor, ParameterType,
};
use crate::paginator::{calculate_take_skip, PaginatorReq, TakeSkip};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;
use utoipa::ToSchema;

/// Longest accepted provider name, in characters.
pub const MAX_PROVIDER_NAME_CHARS: usize = 30;

const DUPLICATE_NAME_MESSAGE: &str = "an api tool with the same name already exists";
const PROVIDER_NOT_FOUND_MESSAGE: &str = "api tool provider does not exist";
const TOOL_NOT_FOUND_MESSAGE: &str = "api tool does not exist";

/// A request header attached to every call of a provider's tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Header {
    /// Header name.
    pub key: String,
    /// Header value.
    pub value: String,
}

/// A stored tool provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiToolProvider {
    /// Provider id.
    pub id: String,
    /// Owning account.
    pub account_id: String,
    /// Display name, unique per account.
    pub name: String,
    /// Icon URL.
    pub icon: String,
    /// Copied from the schema's `description`.
    pub description: String,
    /// The validated schema.
    pub openapi_schema: Openapi,
    /// Headers sent with every tool call.
    pub headers: Vec<Header>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A stored tool: one operation of a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiTool {
    /// Tool id.
    pub id: String,
    /// Owning provider.
    pub provider_id: String,
    /// Owning account.
    pub account_id: String,
    /// The operation's `operationId`.
    pub name: String,
    /// The operation's description.
    pub description: String,
    /// `server` joined with the path.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Flat parameter list.
    pub parameters: Vec<ParameterDescriptor>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A tool row about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApiTool {
    /// The operation's `operationId`.
    pub name: String,
    /// The operation's description.
    pub description: String,
    /// `server` joined with the path.
    pub url: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Flat parameter list.
    pub parameters: Vec<ParameterDescriptor>,
}

/// Everything needed to write a provider and its tools.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDraft {
    /// Owning account.
    pub account_id: String,
    /// Display name.
    pub name: String,
    /// Icon URL.
    pub icon: String,
    /// Headers sent with every tool call.
    pub headers: Vec<Header>,
    /// The validated schema.
    pub openapi_schema: Openapi,
    /// Tools extracted from the schema.
    pub tools: Vec<NewApiTool>,
}

impl ProviderDraft {
    fn new(account_id: &str, name: String, icon: String, headers: Vec<Header>, openapi: Openapi) -> Self {
        let tools = format_api_tools(&openapi);
        Self {
            account_id: account_id.to_string(),
            name,
            icon,
            headers,
            openapi_schema: openapi,
            tools,
        }
    }

    /// The provider description, taken from the schema.
    pub fn description(&self) -> &str {
        &self.openapi_schema.description
    }
}

/// A provider with all of its tools.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderWithTools {
    /// The provider.
    pub provider: ApiToolProvider,
    /// Its tools, in schema order.
    pub tools: Vec<ApiTool>,
}

/// Flattens a schema into one tool record per `(path, method)`, in document order.
pub fn format_api_tools(openapi: &Openapi) -> Vec<NewApiTool> {
    openapi
        .operations()
        .map(|(path, method, operation)| NewApiTool {
            name: operation.operation_id.clone(),
            description: operation.description.clone(),
            url: format!("{}{}", openapi.server, path),
            method,
            parameters: operation.parameters.clone(),
        })
        .collect()
}

/// Persistence seam for providers and tools.
///
/// Implementations must apply the multi-row writes (`save_provider`,
/// `delete_provider_and_tools`, `update_provider_and_reset_tools`)
/// atomically.
pub trait ApiToolRepository: Send + Sync {
    /// Whether `account_id` already owns a provider called `name`, ignoring
    /// `exclude_provider_id`.
    fn has_same_provider_name(
        &self,
        account_id: &str,
        name: &str,
        exclude_provider_id: Option<&str>,
    ) -> AppResult<bool>;

    /// Inserts a provider and its tools.
    fn save_provider(&self, draft: ProviderDraft) -> AppResult<ApiToolProvider>;

    /// Returns one page of providers (newest first) and the total match count.
    fn list_providers_with_tools(
        &self,
        account_id: &str,
        name_like: Option<&str>,
        window: TakeSkip,
    ) -> AppResult<(Vec<ProviderWithTools>, i64)>;

    /// Deletes a provider and its tools. Missing providers are ignored.
    fn delete_provider_and_tools(&self, account_id: &str, provider_id: &str) -> AppResult<()>;

    /// Loads one provider.
    fn get_provider(&self, account_id: &str, provider_id: &str) -> AppResult<Option<ApiToolProvider>>;

    /// Replaces a provider's fields and its tool set. Returns false when the
    /// provider does not exist.
    fn update_provider_and_reset_tools(&self, provider_id: &str, draft: ProviderDraft) -> AppResult<bool>;

    /// Loads one tool, with its provider, by `operationId`.
    fn get_tool_by_operation_id(
        &self,
        account_id: &str,
        provider_id: &str,
        operation_id: &str,
    ) -> AppResult<Option<(ApiTool, ApiToolProvider)>>;
}

impl<T: ApiToolRepository + ?Sized> ApiToolRepository for Arc<T> {
    fn has_same_provider_name(
        &self,
        account_id: &str,
        name: &str,
        exclude_provider_id: Option<&str>,
    ) -> AppResult<bool> {
        (**self).has_same_provider_name(account_id, name, exclude_provider_id)
    }

    fn save_provider(&self, draft: ProviderDraft) -> AppResult<ApiToolProvider> {
        (**self).save_provider(draft)
    }

    fn list_providers_with_tools(
        &self,
        account_id: &str,
        name_like: Option<&str>,
        window: TakeSkip,
    ) -> AppResult<(Vec<ProviderWithTools>, i64)> {
        (**self).list_providers_with_tools(account_id, name_like, window)
    }

    fn delete_provider_and_tools(&self, account_id: &str, provider_id: &str) -> AppResult<()> {
        (**self).delete_provider_and_tools(account_id, provider_id)
    }

    fn get_provider(&self, account_id: &str, provider_id: &str) -> AppResult<Option<ApiToolProvider>> {
        (**self).get_provider(account_id, provider_id)
    }

    fn update_provider_and_reset_tools(&self, provider_id: &str, draft: ProviderDraft) -> AppResult<bool> {
        (**self).update_provider_and_reset_tools(provider_id, draft)
    }

    fn get_tool_by_operation_id(
        &self,
        account_id: &str,
        provider_id: &str,
        operation_id: &str,
    ) -> AppResult<Option<(ApiTool, ApiToolProvider)>> {
        (**self).get_tool_by_operation_id(account_id, provider_id, operation_id)
    }
}

/// Body of the create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiToolReq {
    /// Provider name.
    pub name: String,
    /// Icon URL.
    pub icon: String,
    /// Schema as JSON text.
    pub openapi_schema: String,
    /// Headers sent with every tool call.
    #[serde(default)]
    pub headers: Vec<Header>,
}

/// Body of the update request. Same shape as [`CreateApiToolReq`].
pub type UpdateApiToolProviderReq = CreateApiToolReq;

impl CreateApiToolReq {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::bad_request("tool name should be a non-empty string"));
        }
        if self.name.chars().count() > MAX_PROVIDER_NAME_CHARS {
            return Err(AppError::bad_request(format!(
                "tool name should be at most {MAX_PROVIDER_NAME_CHARS} characters"
            )));
        }
        if Url::parse(&self.icon).is_err() {
            return Err(AppError::bad_request("tool icon should be a url"));
        }
        Ok(())
    }
}

/// A tool input as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ToolInput {
    /// Primitive type.
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub kind: ParameterType,
    /// Parameter name.
    pub name: String,
    /// Parameter description.
    pub description: String,
    /// Whether it must be supplied.
    pub required: bool,
}

fn inputs_of(parameters: &[ParameterDescriptor]) -> Vec<ToolInput> {
    parameters
        .iter()
        .map(|p| ToolInput {
            kind: p.kind,
            name: p.name.clone(),
            description: p.description.clone(),
            required: p.required,
        })
        .collect()
}

/// A tool inside a provider list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ToolSummary {
    /// Tool id.
    pub id: String,
    /// `operationId`.
    pub name: String,
    /// Description.
    pub description: String,
    /// Inputs.
    pub inputs: Vec<ToolInput>,
}

/// One provider of the paginated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderListItem {
    /// Provider id.
    pub id: String,
    /// Name.
    pub name: String,
    /// Icon URL.
    pub icon: String,
    /// Description.
    pub description: String,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
    /// Headers.
    pub headers: Vec<Header>,
    /// Tools.
    pub tools: Vec<ToolSummary>,
}

/// Provider details, with the schema re-serialised as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    /// Provider id.
    pub id: String,
    /// Name.
    pub name: String,
    /// Icon URL.
    pub icon: String,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
    /// The stored schema as JSON text.
    pub openapi_schema: String,
    /// Headers.
    pub headers: Vec<Header>,
}

/// Provider fields embedded in [`ToolInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProviderSummary {
    /// Provider id.
    pub id: String,
    /// Name.
    pub name: String,
    /// Icon URL.
    pub icon: String,
    /// Description.
    pub description: String,
    /// Headers.
    pub headers: Vec<Header>,
}

/// One tool with its provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ToolInfo {
    /// Tool id.
    pub id: String,
    /// `operationId`.
    pub name: String,
    /// Description.
    pub description: String,
    /// Inputs.
    pub inputs: Vec<ToolInput>,
    /// Owning provider.
    pub provider: ProviderSummary,
}

/// The provider registration workflow.
#[derive(Debug, Clone)]
pub struct ApiToolService<R> {
    repository: R,
}

impl<R: ApiToolRepository> ApiToolService<R> {
    /// Wraps a repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Validates a schema without storing anything.
    pub fn validate_schema(&self, openapi_schema: &str) -> AppResult<Openapi> {
        validate_openapi_schema(openapi_schema)
    }

    /// Registers a new provider and its tools.
    pub fn create(&self, account_id: &str, req: CreateApiToolReq) -> AppResult<ApiToolProvider> {
        req.validate()?;
        let openapi = validate_openapi_schema(&req.openapi_schema)?;
        if self
            .repository
            .has_same_provider_name(account_id, &req.name, None)?
        {
            return Err(AppError::bad_request(DUPLICATE_NAME_MESSAGE));
        }

        let draft = ProviderDraft::new(account_id, req.name, req.icon, req.headers, openapi);
        let provider = self.repository.save_provider(draft)?;
        info!(
            "api tool provider created (account={}, provider={}, tools={})",
            account_id,
            provider.id,
            provider.openapi_schema.operations().count()
        );
        Ok(provider)
    }

    /// Lists one page of providers, returning the page and the total count.
    pub fn list(&self, account_id: &str, req: &PaginatorReq) -> AppResult<(Vec<ProviderListItem>, i64)> {
        req.validate()?;
        let (providers, count) = self.repository.list_providers_with_tools(
            account_id,
            req.search_word(),
            calculate_take_skip(req),
        )?;

        let list = providers
            .into_iter()
            .map(|ProviderWithTools { provider, tools }| ProviderListItem {
                id: provider.id,
                name: provider.name,
                icon: provider.icon,
                description: provider.description,
                created_at: provider.created_at.timestamp_millis(),
                headers: provider.headers,
                tools: tools
                    .into_iter()
                    .map(|tool| ToolSummary {
                        inputs: inputs_of(&tool.parameters),
                        id: tool.id,
                        name: tool.name,
                        description: tool.description,
                    })
                    .collect(),
            })
            .collect();
        Ok((list, count))
    }

    /// Deletes a provider and all of its tools.
    pub fn delete(&self, account_id: &str, provider_id: &str) -> AppResult<()> {
        self.repository
            .delete_provider_and_tools(account_id, provider_id)?;
        info!("api tool provider deleted (account={account_id}, provider={provider_id})");
        Ok(())
    }

    /// Loads a provider's details.
    pub fn provider_info(&self, account_id: &str, provider_id: &str) -> AppResult<ProviderInfo> {
        let provider = self
            .repository
            .get_provider(account_id, provider_id)?
            .ok_or_else(|| AppError::not_found(PROVIDER_NOT_FOUND_MESSAGE))?;
        let openapi_schema = serde_json::to_string(&provider.openapi_schema)
            .map_err(|e| AppError::General(e.to_string()))?;
        Ok(ProviderInfo {
            id: provider.id,
            name: provider.name,
            icon: provider.icon,
            created_at: provider.created_at.timestamp_millis(),
            openapi_schema,
            headers: provider.headers,
        })
    }

    /// Loads one tool by its `operationId`.
    pub fn tool_info(&self, account_id: &str, provider_id: &str, operation_id: &str) -> AppResult<ToolInfo> {
        let (tool, provider) = self
            .repository
            .get_tool_by_operation_id(account_id, provider_id, operation_id)?
            .ok_or_else(|| AppError::not_found(TOOL_NOT_FOUND_MESSAGE))?;
        Ok(ToolInfo {
            inputs: inputs_of(&tool.parameters),
            id: tool.id,
            name: tool.name,
            description: tool.description,
            provider: ProviderSummary {
                id: provider.id,
                name: provider.name,
                icon: provider.icon,
                description: provider.description,
                headers: provider.headers,
            },
        })
    }

    /// Replaces a provider and regenerates its tools from the new schema.
    pub fn update(&self, account_id: &str, provider_id: &str, req: UpdateApiToolProviderReq) -> AppResult<()> {
        req.validate()?;
        let openapi = validate_openapi_schema(&req.openapi_schema)?;
        if self
            .repository
            .has_same_provider_name(account_id, &req.name, Some(provider_id))?
        {
            return Err(AppError::bad_request(DUPLICATE_NAME_MESSAGE));
        }

        let draft = ProviderDraft::new(account_id, req.name, req.icon, req.headers, openapi);
        if !self
            .repository
            .update_provider_and_reset_tools(provider_id, draft)?
        {
            return Err(AppError::not_found(PROVIDER_NOT_FOUND_MESSAGE));
        }
        info!("api tool provider updated (account={account_id}, provider={provider_id})");
        Ok(())
    }
}
