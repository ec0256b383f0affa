#![deny(missing_docs)]

//! # OpenAPI Subset Validation
//!
//! Parses and validates the narrow OpenAPI dialect accepted for API tool
//! providers: one server, a description, and `paths` mapping each path to
//! up to five HTTP methods, each carrying a flat parameter list.
//!
//! Validation runs in two passes:
//! 1. A structural pass driven by the field rules declared below. Every
//!    violation is collected in document order and reported together.
//! 2. An invariant pass over the typed document enforcing that every
//!    `operationId` is unique across all paths and methods.
//!
//! All failures surface as [`AppError::BadRequest`].

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use url::Url;

/// HTTP methods accepted as keys of a path item.
pub const ALLOWED_METHODS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

/// Accepted values of a parameter's `in` field.
pub const ALLOWED_PARAMETER_LOCATIONS: [&str; 5] = ["path", "query", "header", "cookie", "body"];

/// Accepted values of a parameter's `type` field.
pub const ALLOWED_PARAMETER_TYPES: [&str; 4] = ["string", "integer", "float", "boolean"];

/// Message returned when the input is not a JSON object.
pub const FORMAT_ERROR_MESSAGE: &str = "openapi schema has invalid format";

const LOG_MARKER: &str = "validate openapi schema error";
const ISSUE_SEPARATOR: &str = ", ";

const PATHS_MESSAGE: &str = "paths should be an object";
const METHOD_MESSAGE: &str = "method should be one of get, post, put, delete, patch";
const OPERATION_MESSAGE: &str = "operation should be an object";
const PARAMETERS_MESSAGE: &str = "parameters should be an array of objects";

/// The validated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Openapi {
    /// Absolute base URL every path is appended to.
    pub server: String,
    /// Provider description.
    pub description: String,
    /// Path -> method -> operation, in input order.
    pub paths: IndexMap<String, IndexMap<HttpMethod, OperationDescriptor>>,
}

impl Openapi {
    /// Iterates every `(path, method, operation)` triple in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &OperationDescriptor)> {
        self.paths.iter().flat_map(|(path, methods)| {
            methods
                .iter()
                .map(move |(method, operation)| (path.as_str(), *method, operation))
        })
    }
}

/// One operation on one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Human readable summary shown to the LLM.
    pub description: String,
    /// Document-wide unique identifier; becomes the tool name.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Flat parameter list, possibly empty.
    pub parameters: Vec<ParameterDescriptor>,
}

/// A single flat parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name.
    pub name: String,
    /// Where the parameter is sent.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Human readable description.
    pub description: String,
    /// Whether the caller must supply it.
    pub required: bool,
    /// Primitive type of the value.
    #[serde(rename = "type")]
    pub kind: ParameterType,
}

macro_rules! closed_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Parses the exact lowercase spelling.
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The wire spelling.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_set! {
    /// Method key of a path item.
    HttpMethod { Get => "get", Post => "post", Put => "put", Delete => "delete", Patch => "patch" }
}

closed_set! {
    /// Parameter location.
    ParameterLocation {
        Path => "path",
        Query => "query",
        Header => "header",
        Cookie => "cookie",
        Body => "body",
    }
}

closed_set! {
    /// Parameter primitive type.
    ParameterType { String => "string", Integer => "integer", Float => "float", Boolean => "boolean" }
}

/// What a single field must satisfy.
#[derive(Debug, Clone, Copy)]
enum Constraint {
    /// A string that is non-empty after trimming. The trimmed value is kept.
    NonEmpty,
    /// A string that parses as an absolute URL after trimming. The trimmed value is kept.
    AbsoluteUrl,
    /// A string from a closed set (exact match).
    OneOf(&'static [&'static str]),
    /// A JSON boolean.
    Boolean,
}

/// A field name, its constraint and the message reported when it fails.
#[derive(Debug, Clone, Copy)]
struct FieldRule {
    field: &'static str,
    constraint: Constraint,
    message: &'static str,
}

const fn rule(field: &'static str, constraint: Constraint, message: &'static str) -> FieldRule {
    FieldRule {
        field,
        constraint,
        message,
    }
}

const SERVER: FieldRule = rule("server", Constraint::AbsoluteUrl, "server should be a valid url");
const DESCRIPTION: FieldRule = rule(
    "description",
    Constraint::NonEmpty,
    "description should be a non-empty string",
);
const OPERATION_ID: FieldRule = rule(
    "operationId",
    Constraint::NonEmpty,
    "operationId should be a non-empty string",
);
const PARAMETER_NAME: FieldRule = rule("name", Constraint::NonEmpty, "name should be a non-empty string");
const PARAMETER_IN: FieldRule = rule(
    "in",
    Constraint::OneOf(&ALLOWED_PARAMETER_LOCATIONS),
    "in should be one of path, query, header, cookie, body",
);
const PARAMETER_REQUIRED: FieldRule = rule("required", Constraint::Boolean, "required should be a boolean");
const PARAMETER_TYPE: FieldRule = rule(
    "type",
    Constraint::OneOf(&ALLOWED_PARAMETER_TYPES),
    "type should be one of string, integer, float, boolean",
);

/// Violations collected during the structural pass, in document order.
#[derive(Debug, Default)]
struct Issues(Vec<&'static str>);

impl Issues {
    fn push(&mut self, message: &'static str) {
        self.0.push(message);
    }

    fn into_message(self) -> Option<String> {
        (!self.0.is_empty()).then(|| self.0.join(ISSUE_SEPARATOR))
    }
}

impl FieldRule {
    /// Checks a string-valued field, returning the stored form on success.
    fn string(&self, object: &Map<String, Value>, issues: &mut Issues) -> Option<String> {
        let checked = match (object.get(self.field), self.constraint) {
            (Some(Value::String(s)), Constraint::NonEmpty) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            (Some(Value::String(s)), Constraint::AbsoluteUrl) => {
                let trimmed = s.trim();
                Url::parse(trimmed).ok().map(|_| trimmed.to_string())
            }
            (Some(Value::String(s)), Constraint::OneOf(allowed)) => {
                allowed.contains(&s.as_str()).then(|| s.clone())
            }
            _ => None,
        };
        if checked.is_none() {
            issues.push(self.message);
        }
        checked
    }

    /// Checks a boolean-valued field.
    fn boolean(&self, object: &Map<String, Value>, issues: &mut Issues) -> Option<bool> {
        debug_assert!(matches!(self.constraint, Constraint::Boolean));
        match object.get(self.field) {
            Some(Value::Bool(b)) => Some(*b),
            _ => {
                issues.push(self.message);
                None
            }
        }
    }
}

/// Parses `input` and validates it as a tool provider schema.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] carrying:
/// * [`FORMAT_ERROR_MESSAGE`] when `input` is not a JSON object,
/// * the joined field messages when fields violate their constraints,
/// * `operationId <id> is duplicated` for the first repeated id.
pub fn validate_openapi_schema(input: &str) -> AppResult<Openapi> {
    let root = match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(root)) => root,
        Ok(other) => {
            error!("{LOG_MARKER}: expected a JSON object, found {}", json_kind(&other));
            return Err(AppError::bad_request(FORMAT_ERROR_MESSAGE));
        }
        Err(err) => {
            error!("{LOG_MARKER}: {err}");
            return Err(AppError::bad_request(FORMAT_ERROR_MESSAGE));
        }
    };

    let mut issues = Issues::default();
    let document = read_document(&root, &mut issues);
    if let Some(message) = issues.into_message() {
        return Err(reject(message));
    }
    // Every rule passed, so the document is complete.
    let document = document.ok_or_else(|| reject(FORMAT_ERROR_MESSAGE.to_string()))?;

    ensure_unique_operation_ids(&document)?;
    Ok(document)
}

fn reject(message: String) -> AppError {
    error!("{LOG_MARKER}: {message}");
    AppError::BadRequest(message)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn read_document(root: &Map<String, Value>, issues: &mut Issues) -> Option<Openapi> {
    let server = SERVER.string(root, issues);
    let description = DESCRIPTION.string(root, issues);
    let paths = read_paths(root.get("paths"), issues);
    Some(Openapi {
        server: server?,
        description: description?,
        paths: paths?,
    })
}

fn read_paths(
    value: Option<&Value>,
    issues: &mut Issues,
) -> Option<IndexMap<String, IndexMap<HttpMethod, OperationDescriptor>>> {
    let Some(Value::Object(paths)) = value else {
        issues.push(PATHS_MESSAGE);
        return None;
    };

    let mut complete = true;
    let mut result = IndexMap::with_capacity(paths.len());
    for (path, methods) in paths {
        let Value::Object(methods) = methods else {
            issues.push(PATHS_MESSAGE);
            complete = false;
            continue;
        };

        let mut operations = IndexMap::with_capacity(methods.len());
        for (key, operation) in methods {
            let method = HttpMethod::parse(key);
            if method.is_none() {
                issues.push(METHOD_MESSAGE);
            }
            match (method, read_operation(operation, issues)) {
                (Some(method), Some(operation)) => {
                    operations.insert(method, operation);
                }
                _ => complete = false,
            }
        }
        result.insert(path.clone(), operations);
    }

    complete.then_some(result)
}

fn read_operation(value: &Value, issues: &mut Issues) -> Option<OperationDescriptor> {
    let Value::Object(operation) = value else {
        issues.push(OPERATION_MESSAGE);
        return None;
    };

    let description = DESCRIPTION.string(operation, issues);
    let operation_id = OPERATION_ID.string(operation, issues);
    let parameters = read_parameters(operation.get("parameters"), issues);
    Some(OperationDescriptor {
        description: description?,
        operation_id: operation_id?,
        parameters: parameters?,
    })
}

fn read_parameters(value: Option<&Value>, issues: &mut Issues) -> Option<Vec<ParameterDescriptor>> {
    let Some(Value::Array(items)) = value else {
        issues.push(PARAMETERS_MESSAGE);
        return None;
    };

    let mut complete = true;
    let mut parameters = Vec::with_capacity(items.len());
    for item in items {
        match read_parameter(item, issues) {
            Some(parameter) => parameters.push(parameter),
            None => complete = false,
        }
    }
    complete.then_some(parameters)
}

fn read_parameter(value: &Value, issues: &mut Issues) -> Option<ParameterDescriptor> {
    let Value::Object(parameter) = value else {
        issues.push(PARAMETERS_MESSAGE);
        return None;
    };

    let name = PARAMETER_NAME.string(parameter, issues);
    let location = PARAMETER_IN
        .string(parameter, issues)
        .and_then(|s| ParameterLocation::parse(&s));
    let description = DESCRIPTION.string(parameter, issues);
    let required = PARAMETER_REQUIRED.boolean(parameter, issues);
    let kind = PARAMETER_TYPE
        .string(parameter, issues)
        .and_then(|s| ParameterType::parse(&s));
    Some(ParameterDescriptor {
        name: name?,
        location: location?,
        description: description?,
        required: required?,
        kind: kind?,
    })
}

fn ensure_unique_operation_ids(openapi: &Openapi) -> AppResult<()> {
    let mut seen = HashSet::new();
    for (_, _, operation) in openapi.operations() {
        if !seen.insert(operation.operation_id.as_str()) {
            return Err(reject(format!(
                "operationId {} is duplicated",
                operation.operation_id
            )));
        }
    }
    Ok(())
}
