#![deny(missing_docs)]

//! # LLM Ops Web Library
//!
//! Route handlers, response envelope, Postgres persistence and schema
//! definitions for the tool service.

use actix_web::{get, web, HttpResponse, Responder};
use llmops_core::{ApiToolRepository, ApiToolService};
use std::sync::Arc;

/// Re-export diesel so generated models can access `crate::diesel`.
pub use diesel;

/// Caller identity extraction.
pub mod account;

/// The service's OpenAPI document and Swagger UI.
pub mod api_doc;

/// Command line and environment configuration.
pub mod config;

/// Postgres repository and connection pool.
pub mod db;

/// Domain error to HTTP mapping.
pub mod error;

/// Table models and domain conversions.
pub mod models;

/// Response envelope helpers.
pub mod response;

/// HTTP routes.
pub mod routes;

/// Diesel table definitions.
pub mod schema;

/// The service shared by every API tool handler.
pub type ToolService = ApiToolService<Arc<dyn ApiToolRepository>>;

/// Shared application state for `repository`.
pub fn app_state(repository: Arc<dyn ApiToolRepository>) -> web::Data<ToolService> {
    web::Data::new(ApiToolService::new(repository))
}

/// A simple health check handler.
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
