//! Value tracking between requests
//!
//! Decides which response fields are captured into the registry and how
//! path placeholders read them back. The rules are name-based heuristics
//! and their priority order is part of the generated output's contract.

use super::js;
use super::registry::{FRANCHISE_KEY, Registry};
use crate::extractor::extract_path_parameters;
use crate::models::{Endpoint, HttpMethod};
use serde_json::Value;

/// Response status codes searched for a capturable field, in order
const TRACKED_STATUS_CODES: [&str; 4] = ["200", "201", "202", "default"];

/// A response property selected for capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseField {
    pub name: String,
}

impl ResponseField {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Access expression on the parsed response body (`json.id`)
    pub fn expression(&self) -> String {
        js::member("json", &self.name)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Whether a name looks like it carries a resource identifier
pub fn is_trackable_name(name: &str) -> bool {
    contains_ignore_case(name, "id") || contains_ignore_case(name, "franchise")
}

/// Find the response field whose value should feed `param_name`
///
/// Only the top-level `properties` of JSON response schemas are inspected.
pub fn find_response_field(operation: &Value, param_name: &str) -> Option<ResponseField> {
    let responses = operation.get("responses")?;

    for status in TRACKED_STATUS_CODES {
        let Some(content) = responses
            .get(status)
            .and_then(|response| response.get("content"))
            .and_then(Value::as_object)
        else {
            continue;
        };

        for (content_type, media_type) in content {
            if !contains_ignore_case(content_type, "json") {
                continue;
            }

            let schema = media_type.get("schema");
            let Some(properties) = schema
                .and_then(|s| s.get("properties"))
                .and_then(Value::as_object)
            else {
                continue;
            };

            if properties.contains_key(param_name) {
                return Some(ResponseField::new(param_name));
            }

            if properties.contains_key("id") {
                return Some(ResponseField::new("id"));
            }

            let is_object = schema
                .and_then(|s| s.get("type"))
                .and_then(Value::as_str)
                == Some("object");
            if is_object {
                if let Some(name) = properties
                    .keys()
                    .find(|name| contains_ignore_case(name, "id"))
                {
                    return Some(ResponseField::new(name));
                }
            }
        }
    }

    None
}

/// Replace each `{name}` placeholder with a registry lookup
///
/// Falls back to the lower-cased name and finally to the name itself, so
/// the resulting template literal never contains an unresolved placeholder.
pub fn resolve_path(path: &str, registry: &Registry) -> String {
    let mut resolved = path.to_string();
    for param in extract_path_parameters(path) {
        let lower = param.to_lowercase();
        let fallback = js::string_literal(&param);
        let lookup = registry.lookup_chain(&[param.as_str(), lower.as_str()], &fallback);
        resolved = resolved.replace(&format!("{{{}}}", param), &format!("${{{}}}", lookup));
    }
    resolved
}

/// Generate the code capturing values from `res_var` into the registry
///
/// Returns an empty string when the endpoint tracks nothing.
pub fn generate_value_tracker(endpoint: &Endpoint, res_var: &str, registry: &Registry) -> String {
    let mut trackers = Vec::new();

    if endpoint.method.creates_resource() {
        for param in extract_path_parameters(&endpoint.path) {
            if !is_trackable_name(&param) {
                continue;
            }
            if let Some(field) = find_response_field(&endpoint.operation, &param) {
                tracing::debug!(
                    "{}: tracking {} from {}",
                    endpoint.operation_id,
                    param,
                    field.expression()
                );
                trackers.push(param_tracker(&param, &field, res_var, registry));
            }
        }
    }

    // Independent of the path parameter rule; both may capture the same value.
    if endpoint.method == HttpMethod::Post && contains_ignore_case(&endpoint.path, "franchise") {
        trackers.push(franchise_tracker(res_var, registry));
    }

    trackers.join("\n")
}

fn guarded(res_var: &str, body: &[String]) -> String {
    let mut lines = vec![
        "    try {".to_string(),
        format!(
            "        if ({res}.status === 201 || {res}.status === 200) {{",
            res = res_var
        ),
    ];
    lines.extend(body.iter().map(|line| format!("            {}", line)));
    lines.extend([
        "        }".to_string(),
        "    } catch (e) {".to_string(),
        "        // Response might not be JSON".to_string(),
        "    }".to_string(),
    ]);
    lines.join("\n")
}

fn param_tracker(param: &str, field: &ResponseField, res_var: &str, registry: &Registry) -> String {
    guarded(
        res_var,
        &[
            format!("const json = {}.json();", res_var),
            format!("const value = {};", field.expression()),
            "if (value) {".to_string(),
            format!("    {}", registry.store(param, "value")),
            format!("    console.log(`Tracked {}: ${{value}}`);", param),
            "}".to_string(),
        ],
    )
}

fn franchise_tracker(res_var: &str, registry: &Registry) -> String {
    let mut body = vec![format!("const body = {}.json();", res_var)];
    for (i, field) in ["id", FRANCHISE_KEY].iter().enumerate() {
        let access = js::member("body", field);
        let keyword = if i == 0 { "if" } else { "} else if" };
        body.push(format!("{} (body && {}) {{", keyword, access));
        body.push(format!("    {}", registry.store(FRANCHISE_KEY, &access)));
        body.push(format!(
            "    console.log(`Tracked {}: ${{{}}}`);",
            FRANCHISE_KEY, access
        ));
    }
    body.push("}".to_string());
    guarded(res_var, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint(method: HttpMethod, path: &str, operation: Value) -> Endpoint {
        Endpoint {
            path: path.to_string(),
            method,
            operation,
            operation_id: "op".to_string(),
            base_url: "http://localhost".to_string(),
        }
    }

    fn created_with(properties: Value) -> Value {
        json!({
            "responses": {
                "201": {
                    "content": {
                        "application/json": {
                            "schema": { "type": "object", "properties": properties }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_exact_property_match_wins() {
        let op = created_with(json!({ "id": {}, "itemId": {} }));
        let field = find_response_field(&op, "itemId").unwrap();
        assert_eq!(field.expression(), "json.itemId");
    }

    #[test]
    fn test_id_property_is_surrogate() {
        let op = created_with(json!({ "id": { "type": "string" }, "name": { "type": "string" } }));
        let field = find_response_field(&op, "itemId").unwrap();
        assert_eq!(field.expression(), "json.id");
    }

    #[test]
    fn test_first_id_like_property_for_objects() {
        let op = created_with(json!({ "name": {}, "orderUUID": {}, "ownerId": {} }));
        let field = find_response_field(&op, "itemId").unwrap();
        assert_eq!(field.name, "orderUUID");
    }

    #[test]
    fn test_id_like_scan_requires_object_type() {
        let op = json!({
            "responses": {
                "200": {
                    "content": {
                        "application/json": {
                            "schema": { "properties": { "ownerId": {} } }
                        }
                    }
                }
            }
        });
        assert_eq!(find_response_field(&op, "itemId"), None);
    }

    #[test]
    fn test_status_codes_searched_in_order() {
        let op = json!({
            "responses": {
                "default": {
                    "content": {
                        "application/json": {
                            "schema": { "type": "object", "properties": { "errorId": {} } }
                        }
                    }
                },
                "202": {
                    "content": {
                        "application/problem+json": {
                            "schema": { "type": "object", "properties": { "jobId": {} } }
                        }
                    }
                }
            }
        });
        let field = find_response_field(&op, "itemId").unwrap();
        assert_eq!(field.name, "jobId");
    }

    #[test]
    fn test_non_json_and_missing_responses() {
        let op = json!({
            "responses": {
                "200": {
                    "content": {
                        "text/plain": { "schema": { "type": "object", "properties": { "id": {} } } }
                    }
                }
            }
        });
        assert_eq!(find_response_field(&op, "id"), None);
        assert_eq!(find_response_field(&json!({}), "id"), None);
        assert_eq!(find_response_field(&json!({ "responses": { "200": null } }), "id"), None);
    }

    #[test]
    fn test_resolve_path() {
        let registry = Registry::default();
        assert_eq!(
            resolve_path("/franchises/{franchiseId}/items", &registry),
            "/franchises/${trackedValues.franchiseId || trackedValues.franchiseid || 'franchiseId'}/items"
        );
        assert_eq!(resolve_path("/health", &registry), "/health");
    }

    #[test]
    fn test_resolve_path_repeated_parameter() {
        let resolved = resolve_path("/pairs/{id}/{id}", &Registry::default());
        assert_eq!(resolved.matches("${").count(), 2);
        assert!(!resolved.contains("{id}"));
    }

    #[test]
    fn test_tracker_for_path_parameter() {
        let ep = endpoint(
            HttpMethod::Put,
            "/items/{itemId}",
            created_with(json!({ "id": {}, "name": {} })),
        );
        let code = generate_value_tracker(&ep, "res3", &Registry::default());

        assert!(code.contains("if (res3.status === 201 || res3.status === 200) {"));
        assert!(code.contains("const value = json.id;"));
        assert!(code.contains("trackedValues['itemId'] = value;"));
        assert!(code.contains("} catch (e) {"));
        assert!(!code.contains("franchiseId"));
    }

    #[test]
    fn test_tracker_skips_untracked_methods_and_names() {
        let op = created_with(json!({ "id": {} }));
        let registry = Registry::default();

        let get = endpoint(HttpMethod::Get, "/items/{itemId}", op.clone());
        assert!(generate_value_tracker(&get, "res0", &registry).is_empty());

        let patch = endpoint(HttpMethod::Patch, "/items/{itemId}", op.clone());
        assert!(generate_value_tracker(&patch, "res0", &registry).is_empty());

        let slug = endpoint(HttpMethod::Post, "/pages/{slug}", op);
        assert!(generate_value_tracker(&slug, "res0", &registry).is_empty());
    }

    #[test]
    fn test_franchise_post_captures_fixed_key() {
        let ep = endpoint(HttpMethod::Post, "/franchises", created_with(json!({ "id": {} })));
        let code = generate_value_tracker(&ep, "res0", &Registry::default());

        assert!(code.contains("if (body && body.id) {"));
        assert!(code.contains("trackedValues['franchiseId'] = body.id;"));
        assert!(code.contains("} else if (body && body.franchiseId) {"));
        assert!(code.contains("trackedValues['franchiseId'] = body.franchiseId;"));
    }

    #[test]
    fn test_franchise_post_double_capture() {
        let ep = endpoint(
            HttpMethod::Post,
            "/Franchises/{franchiseId}/stores",
            created_with(json!({ "id": {} })),
        );
        let code = generate_value_tracker(&ep, "res1", &Registry::default());

        assert_eq!(code.matches("try {").count(), 2);
        assert!(code.contains("trackedValues['franchiseId'] = value;"));
        assert!(code.contains("trackedValues['franchiseId'] = body.id;"));
    }

    #[test]
    fn test_franchise_put_has_no_fixed_capture() {
        let ep = endpoint(HttpMethod::Put, "/franchises", created_with(json!({ "id": {} })));
        assert!(generate_value_tracker(&ep, "res0", &Registry::default()).is_empty());
    }
}
