use actix_web::http::StatusCode;
use actix_web::{test, App};
use llmops_core::MemoryRepository;
use llmops_web::account::ACCOUNT_HEADER;
use llmops_web::{app_state, health_check, routes};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

const SCHEMA: &str = r#"{"server":"https://dict.youdao.com","description":"dictionary lookup","paths":{"/suggest":{"get":{"description":"suggest words","operationId":"YoudaoSuggest","parameters":[{"name":"q","in":"query","description":"word","required":true,"type":"string"}]}}}}"#;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(app_state(Arc::new(MemoryRepository::default())))
                .service(health_check)
                .configure(routes::configure),
        )
        .await
    };
}

fn create_body(name: &str) -> Value {
    json!({
        "name": name,
        "icon": "https://example.com/icon.png",
        "openapiSchema": SCHEMA,
        "headers": [{"key": "Authorization", "value": "Bearer x"}],
    })
}

#[actix_web::test]
async fn test_requests_without_account_are_rejected() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/api-tools").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "missing account id");

    let req = test::TestRequest::get().uri("/health").to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
}

#[actix_web::test]
async fn test_validate_openapi_schema() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/api-tools/validate-openapi-schema")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .set_json(json!({"openapiSchema": SCHEMA}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        json!({"code": "200", "message": "openapi schema is valid", "data": null})
    );

    let req = test::TestRequest::post()
        .uri("/api/api-tools/validate-openapi-schema")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .set_json(json!({"openapiSchema": "not json"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "400");
    assert_eq!(body["message"], "openapi schema has invalid format");
}

#[actix_web::test]
async fn test_malformed_body_is_a_bad_request() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/api-tools")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .set_json(json!({"name": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "400");
}

#[actix_web::test]
async fn test_provider_lifecycle() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/api-tools")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .set_json(create_body("dict"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "api tool created");

    let req = test::TestRequest::post()
        .uri("/api/api-tools")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .set_json(create_body("dict"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/api-tools?currentPage=1&pageSize=10&searchWord=di")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"]["paginator"],
        json!({"currentPage": 1, "pageSize": 10, "totalPage": 1, "totalRecord": 1})
    );
    let item = &body["data"]["list"][0];
    assert_eq!(item["name"], "dict");
    assert_eq!(item["description"], "dictionary lookup");
    assert_eq!(item["tools"][0]["name"], "YoudaoSuggest");
    assert_eq!(
        item["tools"][0]["inputs"],
        json!([{"type": "string", "name": "q", "description": "word", "required": true}])
    );
    let provider_id = item["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/api-tools/{provider_id}"))
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let schema: Value =
        serde_json::from_str(body["data"]["openapiSchema"].as_str().unwrap()).unwrap();
    assert_eq!(schema["server"], "https://dict.youdao.com");

    let req = test::TestRequest::get()
        .uri(&format!("/api/api-tools/{provider_id}/tools/YoudaoSuggest"))
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["provider"]["name"], "dict");
    assert_eq!(
        body["data"]["provider"]["headers"],
        json!([{"key": "Authorization", "value": "Bearer x"}])
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/api-tools/{provider_id}"))
        .insert_header((ACCOUNT_HEADER, "someone-else"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&format!("/api/api-tools/{provider_id}"))
        .insert_header((ACCOUNT_HEADER, "acc"))
        .set_json(create_body("dictionary"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "api tool updated");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/api-tools/{provider_id}"))
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "api tool deleted");

    let req = test::TestRequest::get()
        .uri(&format!("/api/api-tools/{provider_id}/tools/YoudaoSuggest"))
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "api tool does not exist");
}

#[actix_web::test]
async fn test_out_of_range_page_is_rejected() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/api/api-tools?pageSize=51")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_builtin_catalog() {
    let app = app!();

    let req = test::TestRequest::get()
        .uri("/api/builtin-tools/categories")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().is_some_and(|c| !c.is_empty()));

    let req = test::TestRequest::get()
        .uri("/api/builtin-tools")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["name"] == "duckduckgo"));

    let req = test::TestRequest::get()
        .uri("/api/builtin-tools/time/tools/current_time")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "current_time");
    assert_eq!(body["data"]["provider"]["name"], "time");
    assert!(body["data"].get("createdAt").is_none());

    let req = test::TestRequest::get()
        .uri("/api/builtin-tools/time/tools/missing")
        .insert_header((ACCOUNT_HEADER, "acc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "the requested tool does not exist");
}

#[actix_web::test]
async fn test_openapi_document_lists_every_api_route() {
    let app = app!();
    let req = test::TestRequest::get().uri("/openapi").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let doc: Value = test::read_body_json(resp).await;

    let expected = [
        ("/api/api-tools/validate-openapi-schema", &["post"][..]),
        ("/api/api-tools", &["get", "post"][..]),
        ("/api/api-tools/{provider_id}", &["get", "put", "delete"][..]),
        ("/api/api-tools/{provider_id}/tools/{operation_id}", &["get"][..]),
        ("/api/builtin-tools/categories", &["get"][..]),
        ("/api/builtin-tools", &["get"][..]),
        ("/api/builtin-tools/{provider}/tools/{tool}", &["get"][..]),
    ];
    for (path, methods) in expected {
        for method in methods {
            assert!(
                doc["paths"][path][method].is_object(),
                "{method} {path} is not documented"
            );
        }
    }
    let documented = doc["paths"].as_object().unwrap();
    assert!(documented.keys().all(|p| p.starts_with("/api/")));
    assert_eq!(documented.len(), expected.len());

    let scheme = &doc["components"]["securitySchemes"][ACCOUNT_HEADER];
    assert_eq!(scheme["type"], "apiKey");
    assert_eq!(scheme["in"], "header");
    assert_eq!(scheme["name"], ACCOUNT_HEADER);
    assert_eq!(doc["security"], json!([{ ACCOUNT_HEADER: [] }]));
}

#[actix_web::test]
async fn test_swagger_page_points_at_document() {
    let app = app!();
    let req = test::TestRequest::get().uri("/swagger").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    let page = std::str::from_utf8(&body).unwrap();
    assert!(page.contains("url: '/openapi'"));
}
