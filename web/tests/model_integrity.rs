use chrono::Utc;
use llmops_core::api_tool::format_api_tools;
use llmops_core::{validate_openapi_schema, HttpMethod, ProviderDraft};
use llmops_web::models::api_tool_providers::{ApiToolProviders, CreateApiToolProviders};
use llmops_web::models::api_tools::{ApiTools, CreateApiTools};
use pretty_assertions::assert_eq;
use uuid::Uuid;

const SCHEMA: &str = r#"{
    "server": "https://api.example.com",
    "description": "weather lookups",
    "paths": {
        "/now": {"get": {"description": "current weather", "operationId": "Now", "parameters": [
            {"name": "city", "in": "query", "description": "city name", "required": true, "type": "string"}
        ]}},
        "/alerts": {"post": {"description": "alerts", "operationId": "Alerts", "parameters": []}}
    }
}"#;

fn draft() -> ProviderDraft {
    let openapi = validate_openapi_schema(SCHEMA).unwrap();
    ProviderDraft {
        account_id: "acc".into(),
        name: "weather".into(),
        icon: "https://example.com/w.png".into(),
        headers: vec![],
        tools: format_api_tools(&openapi),
        openapi_schema: openapi,
    }
}

#[test]
fn test_provider_row_round_trips_to_domain() {
    let now = Utc::now().naive_utc();
    let id = Uuid::new_v4();
    let draft = draft();
    let row = CreateApiToolProviders::from_draft(id, &draft, now).unwrap();
    assert_eq!(row.description, "weather lookups");

    let stored = ApiToolProviders {
        id: row.id,
        account_id: row.account_id,
        name: row.name,
        icon: row.icon,
        description: row.description,
        openapi_schema: row.openapi_schema,
        headers: row.headers,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    let provider = stored.into_domain().unwrap();
    assert_eq!(provider.id, id.to_string());
    assert_eq!(provider.openapi_schema, draft.openapi_schema);
}

#[test]
fn test_schema_column_keeps_key_order() {
    let migration = include_str!("../migrations/2025-03-01-000000_create_api_tools/up.sql");
    assert!(migration.contains("openapi_schema JSON NOT NULL"));

    let openapi = validate_openapi_schema(
        r#"{"server":"https://dict.youdao.com","description":"dict","paths":{
            "/suggest":{"post":{"description":"p","operationId":"P","parameters":[]},
                        "get":{"description":"g","operationId":"G","parameters":[]}},
            "/a":{"get":{"description":"a","operationId":"A","parameters":[]}}}}"#,
    )
    .unwrap();
    let draft = ProviderDraft {
        account_id: "acc".into(),
        name: "dict".into(),
        icon: "https://example.com/d.png".into(),
        headers: vec![],
        tools: format_api_tools(&openapi),
        openapi_schema: openapi,
    };
    let now = Utc::now().naive_utc();
    let row = CreateApiToolProviders::from_draft(Uuid::new_v4(), &draft, now).unwrap();

    // A `json` column hands back the text as written.
    let stored: serde_json::Value =
        serde_json::from_str(&row.openapi_schema.to_string()).unwrap();
    let provider = ApiToolProviders {
        id: row.id,
        account_id: row.account_id,
        name: row.name,
        icon: row.icon,
        description: row.description,
        openapi_schema: stored,
        headers: row.headers,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
    .into_domain()
    .unwrap();

    let paths: Vec<_> = provider.openapi_schema.paths.keys().map(String::as_str).collect();
    assert_eq!(paths, ["/suggest", "/a"]);
    let methods: Vec<_> = provider.openapi_schema.paths["/suggest"].keys().copied().collect();
    assert_eq!(methods, [HttpMethod::Post, HttpMethod::Get]);

    let text = serde_json::to_string(&provider.openapi_schema).unwrap();
    assert!(text.find("/suggest") < text.find("\"/a\""));
}

#[test]
fn test_tool_rows_keep_schema_order() {
    let now = Utc::now().naive_utc();
    let provider_id = Uuid::new_v4();
    let rows = CreateApiTools::from_draft(provider_id, &draft(), now).unwrap();

    let summary: Vec<_> = rows
        .iter()
        .map(|r| (r.position, r.name.as_str(), r.method.as_str(), r.url.as_str()))
        .collect();
    assert_eq!(
        summary,
        [
            (0, "Now", "get", "https://api.example.com/now"),
            (1, "Alerts", "post", "https://api.example.com/alerts"),
        ]
    );

    let first = rows.into_iter().next().unwrap();
    let tool = ApiTools {
        id: first.id,
        account_id: first.account_id,
        provider_id: first.provider_id,
        position: first.position,
        name: first.name,
        description: first.description,
        url: first.url,
        method: first.method,
        parameters: first.parameters,
        created_at: first.created_at,
        updated_at: first.updated_at,
    }
    .into_domain()
    .unwrap();
    assert_eq!(tool.method, HttpMethod::Get);
    assert_eq!(tool.parameters[0].name, "city");
}

#[test]
fn test_corrupt_method_column_is_a_database_error() {
    let now = Utc::now().naive_utc();
    let row = ApiTools {
        id: Uuid::new_v4(),
        account_id: "acc".into(),
        provider_id: Uuid::new_v4(),
        position: 0,
        name: "x".into(),
        description: "x".into(),
        url: "https://x".into(),
        method: "trace".into(),
        parameters: serde_json::json!([]),
        created_at: now,
        updated_at: now,
    };
    let err = row.into_domain().unwrap_err();
    assert!(err.to_string().starts_with("Database Error"));
}
