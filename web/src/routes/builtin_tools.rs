//! # Builtin Tool Routes
//!
//! Read-only views of the static builtin catalog.

use crate::account::AccountId;
use crate::error::ApiResult;
use crate::response::ok;
use actix_web::{get, web, HttpResponse, Scope};
use llmops_core::builtin::{all_builtin_tools, builtin_tool_categories, specific_builtin_tool};
use llmops_core::AppError;

/// The `/api/builtin-tools` scope.
pub fn scope() -> Scope {
    web::scope("/api/builtin-tools")
        .service(get_categories)
        .service(get_builtin_tools)
        .service(get_provider_tool)
}

/// Lists the catalog categories.
#[utoipa::path(
    get,
    path = "/api/builtin-tools/categories",
    tag = "builtin-tools",
    responses((status = 200, description = "Every category")),
)]
#[get("/categories")]
pub(crate) async fn get_categories(_account: AccountId) -> HttpResponse {
    ok(builtin_tool_categories())
}

/// Lists every builtin provider with its tools.
#[utoipa::path(
    get,
    path = "/api/builtin-tools",
    tag = "builtin-tools",
    responses((status = 200, description = "Every provider with its tools")),
)]
#[get("")]
pub(crate) async fn get_builtin_tools(_account: AccountId) -> HttpResponse {
    ok(all_builtin_tools())
}

/// Loads one builtin tool with its provider.
#[utoipa::path(
    get,
    path = "/api/builtin-tools/{provider}/tools/{tool}",
    tag = "builtin-tools",
    params(
        ("provider" = String, Path, description = "Provider name"),
        ("tool" = String, Path, description = "Tool name"),
    ),
    responses(
        (status = 200, description = "The tool and its provider"),
        (status = 404, description = "No such tool"),
    ),
)]
#[get("/{provider}/tools/{tool}")]
pub(crate) async fn get_provider_tool(
    _account: AccountId,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (provider, tool) = path.into_inner();
    let tool = specific_builtin_tool(&provider, &tool)
        .ok_or_else(|| AppError::not_found("the requested tool does not exist"))?;
    Ok(ok(tool))
}
