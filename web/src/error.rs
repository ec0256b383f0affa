//! # HTTP Errors
//!
//! Maps domain errors onto the response envelope. Server-side failures are
//! logged and answered with a fixed message.

use crate::response::{fail, HttpCode};
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::{Display, From};
use llmops_core::AppError;
use log::error;

/// Message returned for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// A domain error travelling out of a handler.
#[derive(Debug, Display, From)]
pub struct ApiError(pub AppError);

impl ApiError {
    fn code(&self) -> HttpCode {
        match self.0 {
            AppError::BadRequest(_) => HttpCode::Fail,
            AppError::Unauthorized(_) => HttpCode::Unauthorized,
            AppError::NotFound(_) => HttpCode::NotFound,
            AppError::Database(_) | AppError::General(_) => HttpCode::InternalServerError,
        }
    }
}

impl std::error::Error for ApiError {}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        ApiError(AppError::General(err.to_string()))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.code().status()
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.code();
        if code == HttpCode::InternalServerError {
            error!("request failed: {}", self.0);
            return fail(code, INTERNAL_ERROR_MESSAGE);
        }
        fail(code, self.0.to_string())
    }
}

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;
