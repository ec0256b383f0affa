//! # API Tool Routes
//!
//! CRUD over custom API tool providers, scoped to the calling account.

use crate::account::AccountId;
use crate::error::ApiResult;
use crate::response::{ok, ok_message, ok_paginator};
use crate::ToolService;
use actix_web::{delete, get, post, put, web, HttpResponse, Scope};
use llmops_core::api_tool::{ProviderInfo, ProviderListItem, ToolInfo};
use llmops_core::{CreateApiToolReq, PaginatorReq, UpdateApiToolProviderReq};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the schema validation request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOpenapiReq {
    /// Schema as JSON text.
    pub openapi_schema: String,
}

/// The `/api/api-tools` scope.
pub fn scope() -> Scope {
    web::scope("/api/api-tools")
        .service(validate_openapi_schema)
        .service(create_api_tool)
        .service(get_api_tools_with_page)
        .service(get_api_tool)
        .service(get_api_tool_provider)
        .service(update_api_tool_provider)
        .service(delete_api_tool_provider)
}

/// Checks a schema without storing it.
#[utoipa::path(
    post,
    path = "/api/api-tools/validate-openapi-schema",
    tag = "api-tools",
    request_body = ValidateOpenapiReq,
    responses(
        (status = 200, description = "The schema is valid"),
        (status = 400, description = "Every violation, joined into the message"),
    ),
)]
#[post("/validate-openapi-schema")]
pub(crate) async fn validate_openapi_schema(
    _account: AccountId,
    service: web::Data<ToolService>,
    body: web::Json<ValidateOpenapiReq>,
) -> ApiResult<HttpResponse> {
    service.validate_schema(&body.openapi_schema)?;
    Ok(ok_message("openapi schema is valid"))
}

/// Registers a provider and one tool per operation.
#[utoipa::path(
    post,
    path = "/api/api-tools",
    tag = "api-tools",
    request_body = CreateApiToolReq,
    responses(
        (status = 200, description = "Provider created"),
        (status = 400, description = "Invalid schema or duplicate name"),
    ),
)]
#[post("")]
pub(crate) async fn create_api_tool(
    account: AccountId,
    service: web::Data<ToolService>,
    body: web::Json<CreateApiToolReq>,
) -> ApiResult<HttpResponse> {
    web::block(move || service.create(account.as_str(), body.into_inner())).await??;
    Ok(ok_message("api tool created"))
}

/// Lists the caller's providers, newest first.
#[utoipa::path(
    get,
    path = "/api/api-tools",
    tag = "api-tools",
    params(PaginatorReq),
    responses(
        (status = 200, description = "One page of providers with their tools", body = [ProviderListItem]),
        (status = 400, description = "Page bounds exceeded"),
    ),
)]
#[get("")]
pub(crate) async fn get_api_tools_with_page(
    account: AccountId,
    service: web::Data<ToolService>,
    query: web::Query<PaginatorReq>,
) -> ApiResult<HttpResponse> {
    let req = query.into_inner();
    let page_req = req.clone();
    let (list, total) = web::block(move || service.list(account.as_str(), &page_req)).await??;
    Ok(ok_paginator(&req, list, total))
}

/// Loads one tool of a provider by its `operationId`.
#[utoipa::path(
    get,
    path = "/api/api-tools/{provider_id}/tools/{operation_id}",
    tag = "api-tools",
    params(
        ("provider_id" = String, Path, description = "Provider id"),
        ("operation_id" = String, Path, description = "Tool operationId"),
    ),
    responses(
        (status = 200, description = "The tool and its provider", body = ToolInfo),
        (status = 404, description = "No such tool"),
    ),
)]
#[get("/{provider_id}/tools/{operation_id}")]
pub(crate) async fn get_api_tool(
    account: AccountId,
    service: web::Data<ToolService>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (provider_id, operation_id) = path.into_inner();
    let tool = web::block(move || {
        service.tool_info(account.as_str(), &provider_id, &operation_id)
    })
    .await??;
    Ok(ok(tool))
}

/// Loads a provider with its stored schema.
#[utoipa::path(
    get,
    path = "/api/api-tools/{provider_id}",
    tag = "api-tools",
    params(("provider_id" = String, Path, description = "Provider id")),
    responses(
        (status = 200, description = "The provider", body = ProviderInfo),
        (status = 404, description = "No such provider"),
    ),
)]
#[get("/{provider_id}")]
pub(crate) async fn get_api_tool_provider(
    account: AccountId,
    service: web::Data<ToolService>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let provider_id = path.into_inner();
    let provider =
        web::block(move || service.provider_info(account.as_str(), &provider_id)).await??;
    Ok(ok(provider))
}

/// Replaces a provider and regenerates its tools.
#[utoipa::path(
    put,
    path = "/api/api-tools/{provider_id}",
    tag = "api-tools",
    params(("provider_id" = String, Path, description = "Provider id")),
    request_body = CreateApiToolReq,
    responses(
        (status = 200, description = "Provider updated"),
        (status = 400, description = "Invalid schema or duplicate name"),
        (status = 404, description = "No such provider"),
    ),
)]
#[put("/{provider_id}")]
pub(crate) async fn update_api_tool_provider(
    account: AccountId,
    service: web::Data<ToolService>,
    path: web::Path<String>,
    body: web::Json<UpdateApiToolProviderReq>,
) -> ApiResult<HttpResponse> {
    let provider_id = path.into_inner();
    web::block(move || service.update(account.as_str(), &provider_id, body.into_inner())).await??;
    Ok(ok_message("api tool updated"))
}

/// Deletes a provider and its tools.
#[utoipa::path(
    delete,
    path = "/api/api-tools/{provider_id}",
    tag = "api-tools",
    params(("provider_id" = String, Path, description = "Provider id")),
    responses((status = 200, description = "Provider deleted")),
)]
#[delete("/{provider_id}")]
pub(crate) async fn delete_api_tool_provider(
    account: AccountId,
    service: web::Data<ToolService>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let provider_id = path.into_inner();
    web::block(move || service.delete(account.as_str(), &provider_id)).await??;
    Ok(ok_message("api tool deleted"))
}
