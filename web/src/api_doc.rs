//! # API Document
//!
//! The service's own OpenAPI description, served at `/openapi`, and a
//! Swagger UI page at `/swagger` that renders it.

use crate::account::ACCOUNT_HEADER;
use crate::routes::{api_tools, builtin_tools};
use actix_web::{get, HttpResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Every `/api` route, guarded by the account header.
#[derive(OpenApi)]
#[openapi(
    info(title = "LLM Ops API", version = "1.0.0", description = "API for LLM Ops"),
    servers((url = "http://localhost:8000", description = "Local development server")),
    paths(
        api_tools::validate_openapi_schema,
        api_tools::create_api_tool,
        api_tools::get_api_tools_with_page,
        api_tools::get_api_tool,
        api_tools::get_api_tool_provider,
        api_tools::update_api_tool_provider,
        api_tools::delete_api_tool_provider,
        builtin_tools::get_categories,
        builtin_tools::get_builtin_tools,
        builtin_tools::get_provider_tool,
    ),
    modifiers(&AccountIdSecurity),
    security(("X-Account-Id" = [])),
    tags(
        (name = "api-tools", description = "Custom API tool providers"),
        (name = "builtin-tools", description = "Builtin tool catalog"),
    ),
)]
pub struct ApiDoc;

/// Declares the `X-Account-Id` header as an API key scheme.
struct AccountIdSecurity;

impl Modify for AccountIdSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            ACCOUNT_HEADER,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ACCOUNT_HEADER))),
        );
    }
}

const SWAGGER_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>LLM Ops API</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: '/openapi', dom_id: '#swagger-ui' });
    };
  </script>
</body>
</html>
"#;

/// The OpenAPI document as JSON.
#[get("/openapi")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Swagger UI pointed at `/openapi`.
#[get("/swagger")]
pub async fn swagger_ui() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(SWAGGER_PAGE)
}
