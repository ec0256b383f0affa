//! # Response Envelope
//!
//! Every JSON endpoint answers `{code, message, data}` where `code` is the
//! HTTP status rendered as a string.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use derive_more::Display;
use llmops_core::{Paginator, PaginatorReq};
use serde::Serialize;
use serde_json::Value;

/// Business status code carried in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum HttpCode {
    /// Success.
    #[display("200")]
    #[serde(rename = "200")]
    Success,
    /// Client sent an invalid request.
    #[display("400")]
    #[serde(rename = "400")]
    Fail,
    /// Missing or invalid credentials.
    #[display("401")]
    #[serde(rename = "401")]
    Unauthorized,
    /// Caller may not access the resource.
    #[display("403")]
    #[serde(rename = "403")]
    Forbidden,
    /// Resource does not exist.
    #[display("404")]
    #[serde(rename = "404")]
    NotFound,
    /// Unexpected server failure.
    #[display("500")]
    #[serde(rename = "500")]
    InternalServerError,
}

impl HttpCode {
    /// The HTTP status matching this code.
    pub fn status(self) -> StatusCode {
        match self {
            HttpCode::Success => StatusCode::OK,
            HttpCode::Fail => StatusCode::BAD_REQUEST,
            HttpCode::Unauthorized => StatusCode::UNAUTHORIZED,
            HttpCode::Forbidden => StatusCode::FORBIDDEN,
            HttpCode::NotFound => StatusCode::NOT_FOUND,
            HttpCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The envelope itself.
#[derive(Debug, Clone, Serialize)]
pub struct BaseResponse<T: Serialize> {
    /// Status code.
    pub code: HttpCode,
    /// Human readable message; `ok` on plain data responses.
    pub message: String,
    /// Payload, `null` when there is none.
    pub data: T,
}

impl<T: Serialize> BaseResponse<T> {
    /// Renders the envelope with the status matching `code`.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.code.status()).json(self)
    }
}

/// A page of records with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PageData<T: Serialize> {
    /// Records of the page.
    pub list: Vec<T>,
    /// Page metadata.
    pub paginator: Paginator,
}

/// Message carried by plain data responses.
pub const OK_MESSAGE: &str = "ok";

/// 200 with a payload.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    BaseResponse {
        code: HttpCode::Success,
        message: OK_MESSAGE.into(),
        data,
    }
    .into_response()
}

/// 200 with a message and no payload.
pub fn ok_message(message: impl Into<String>) -> HttpResponse {
    BaseResponse {
        code: HttpCode::Success,
        message: message.into(),
        data: Value::Null,
    }
    .into_response()
}

/// 200 with one page of records.
pub fn ok_paginator<T: Serialize>(req: &PaginatorReq, list: Vec<T>, total: i64) -> HttpResponse {
    ok(PageData {
        list,
        paginator: Paginator::new(req, total),
    })
}

/// An error envelope with no payload.
pub fn fail(code: HttpCode, message: impl Into<String>) -> HttpResponse {
    BaseResponse {
        code,
        message: message.into(),
        data: Value::Null,
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    async fn body_of(resp: HttpResponse) -> Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_ok_message_has_null_data() {
        let resp = ok_message("done");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_of(resp).await,
            json!({"code": "200", "message": "done", "data": null})
        );
    }

    #[actix_web::test]
    async fn test_ok_carries_ok_message() {
        assert_eq!(
            body_of(ok(1)).await,
            json!({"code": "200", "message": "ok", "data": 1})
        );
    }

    #[actix_web::test]
    async fn test_paginator_envelope() {
        let req = PaginatorReq {
            current_page: 2,
            page_size: 2,
            search_word: None,
        };
        let body = body_of(ok_paginator(&req, vec!["c"], 3)).await;
        assert_eq!(body["code"], json!("200"));
        assert_eq!(body["message"], json!("ok"));
        assert_eq!(
            body["data"],
            json!({
                "list": ["c"],
                "paginator": {"currentPage": 2, "pageSize": 2, "totalPage": 2, "totalRecord": 3}
            })
        );
    }

    #[actix_web::test]
    async fn test_fail_uses_matching_status() {
        let resp = fail(HttpCode::NotFound, "missing");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(resp).await["code"], json!("404"));
    }
}
