//! Endpoint extraction from a raw OpenAPI document
//!
//! Walks `paths` in document order and produces one [`Endpoint`] per
//! recognized HTTP method. Missing or malformed fragments never fail the
//! walk; they fall back to defaults.

use crate::models::{Endpoint, HttpMethod};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Server URL used when the document declares none
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Paths containing this substring are never tested
pub const EXCLUDED_PATH_MARKER: &str = "/admin";

static PATH_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("path parameter pattern is valid"));

/// Extract all testable endpoints, preserving path-then-method order
pub fn extract_endpoints(spec: &Value) -> Vec<Endpoint> {
    let base_url = resolve_base_url(spec);
    let mut endpoints = Vec::new();

    let Some(paths) = spec.get("paths").and_then(Value::as_object) else {
        tracing::debug!("Document has no paths");
        return endpoints;
    };

    for (path, path_item) in paths {
        if path.contains(EXCLUDED_PATH_MARKER) {
            tracing::debug!("Skipping excluded path {}", path);
            continue;
        }

        let Some(path_item) = path_item.as_object() else {
            continue;
        };

        for (key, operation) in path_item {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };

            let operation = match operation {
                Value::Object(_) => operation.clone(),
                _ => Value::Object(Default::default()),
            };

            let operation_id = operation
                .get("operationId")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| derive_operation_id(method, path));

            tracing::debug!("Extracted {} {} ({})", method, path, operation_id);

            endpoints.push(Endpoint {
                path: path.clone(),
                method,
                operation,
                operation_id,
                base_url: base_url.clone(),
            });
        }
    }

    endpoints
}

/// URL of the first declared server, or [`DEFAULT_BASE_URL`]
pub fn resolve_base_url(spec: &Value) -> String {
    spec.pointer("/servers/0/url")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

/// Derive a stable identifier such as `post__franchises_id`
pub fn derive_operation_id(method: HttpMethod, path: &str) -> String {
    let slug: String = path
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .map(|c| if c == '/' { '_' } else { c })
        .collect();
    format!("{}_{}", method.as_str().to_ascii_lowercase(), slug)
}

/// Ordered `{name}` placeholders of a path template, duplicates included
pub fn extract_path_parameters(path: &str) -> Vec<String> {
    PATH_PARAM_RE
        .captures_iter(path)
        .map(|caps| caps[1].to_string())
        .collect()
}
