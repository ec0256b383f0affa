//! # Routes
//!
//! Route registration and extractor configuration.

use crate::api_doc::{openapi_json, swagger_ui};
use crate::response::{fail, HttpCode};
use actix_web::error::InternalError;
use actix_web::{web, Error, HttpRequest};
use log::warn;
use std::fmt::{Debug, Display};

/// Custom API tool endpoints.
pub mod api_tools;
/// Builtin tool catalog endpoints.
pub mod builtin_tools;

/// Rejections from the Json, Query and Path extractors become 400 envelopes.
fn bad_input<E: Debug + Display + 'static>(err: E, req: &HttpRequest) -> Error {
    warn!("rejected request input on {}: {}", req.path(), err);
    let response = fail(HttpCode::Fail, err.to_string());
    InternalError::from_response(err, response).into()
}

/// Registers every `/api` route, the API document and the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| bad_input(err, req)))
        .app_data(web::QueryConfig::default().error_handler(|err, req| bad_input(err, req)))
        .app_data(web::PathConfig::default().error_handler(|err, req| bad_input(err, req)))
        .service(openapi_json)
        .service(swagger_ui)
        .service(api_tools::scope())
        .service(builtin_tools::scope());
}
