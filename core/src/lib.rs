#![deny(missing_docs)]

//! # LLM Ops Core
//!
//! Domain library for the tool registry: validation of provider schemas,
//! the provider registration workflow, pagination and the builtin catalog.

/// Shared error types.
pub mod error;

/// OpenAPI subset parsing and validation.
pub mod openapi_schema;

/// Page requests and take/skip arithmetic.
pub mod paginator;

/// API tool provider workflow and persistence seam.
pub mod api_tool;

/// In-process repository implementation.
pub mod memory;

/// Builtin tool catalog.
pub mod builtin;

/// Object-storage upload keys and credential policies.
pub mod upload;

pub use api_tool::{
    ApiTool, ApiToolProvider, ApiToolRepository, ApiToolService, CreateApiToolReq, Header,
    ProviderDraft, ProviderWithTools, UpdateApiToolProviderReq,
};
pub use error::{AppError, AppResult};
pub use memory::MemoryRepository;
pub use openapi_schema::{validate_openapi_schema, HttpMethod, Openapi};
pub use paginator::{calculate_take_skip, Paginator, PaginatorReq, TakeSkip};
