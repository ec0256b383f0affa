//! # Account Extractor
//!
//! Resolves the calling account from the `X-Account-Id` header set by the
//! upstream authentication gateway.

use crate::error::ApiError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use llmops_core::AppError;
use std::future::{ready, Ready};

/// Header carrying the authenticated account id.
pub const ACCOUNT_HEADER: &str = "X-Account-Id";

/// The authenticated account of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(pub String);

impl AccountId {
    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn account_of(req: &HttpRequest) -> Result<AccountId, ApiError> {
    req.headers()
        .get(ACCOUNT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| AccountId(value.to_string()))
        .ok_or_else(|| ApiError(AppError::Unauthorized("missing account id".into())))
}

impl FromRequest for AccountId {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(account_of(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_reads_header() {
        let req = TestRequest::default()
            .insert_header((ACCOUNT_HEADER, " acc-1 "))
            .to_http_request();
        assert_eq!(account_of(&req).unwrap(), AccountId("acc-1".into()));
    }

    #[test]
    fn test_missing_or_blank_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            account_of(&req),
            Err(ApiError(AppError::Unauthorized(_)))
        ));

        let req = TestRequest::default()
            .insert_header((ACCOUNT_HEADER, ""))
            .to_http_request();
        assert!(account_of(&req).is_err());
    }
}
