//! Request body synthesis from JSON schema fragments

use super::js;
use super::registry::{FRANCHISE_KEY, Registry};
use super::tracking::is_trackable_name;
use indexmap::IndexMap;
use serde_json::Value;

/// Synthesized value of one request body property
#[derive(Debug, Clone, PartialEq)]
pub enum BodyValue {
    /// The schema's declared default, emitted verbatim
    Default(Value),
    /// `'<name>_value'`
    Placeholder,
    /// Registry lookup by name, then `franchiseId`, then the placeholder
    TrackedLookup,
    Zero,
    False,
    EmptyArray,
    EmptyObject,
}

impl BodyValue {
    /// Pick the value for one property schema
    pub fn for_property(name: &str, schema: &Value) -> Self {
        if let Some(default) = schema.get("default").filter(|d| !d.is_null()) {
            return Self::Default(default.clone());
        }

        match schema_type(schema) {
            "integer" | "number" => Self::Zero,
            "boolean" => Self::False,
            "array" => Self::EmptyArray,
            "object" => Self::EmptyObject,
            _ if is_trackable_name(name) => Self::TrackedLookup,
            _ => Self::Placeholder,
        }
    }

    pub fn to_js(&self, name: &str, registry: &Registry) -> String {
        match self {
            Self::Default(value) => js::json_to_js(value),
            Self::Placeholder => placeholder(name),
            Self::TrackedLookup => {
                registry.lookup_chain(&[name, FRANCHISE_KEY], &placeholder(name))
            }
            Self::Zero => "0".to_string(),
            Self::False => "false".to_string(),
            Self::EmptyArray => "[]".to_string(),
            Self::EmptyObject => "{}".to_string(),
        }
    }
}

fn placeholder(name: &str) -> String {
    js::string_literal(&format!("{}_value", name))
}

/// Declared type of a schema; absent types count as `string`
///
/// OpenAPI 3.1 type lists use their first non-null entry.
fn schema_type(schema: &Value) -> &str {
    match schema.get("type") {
        Some(Value::String(t)) => t.as_str(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .unwrap_or("string"),
        _ => "string",
    }
}

/// Synthesized body of one request, keyed by property in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodySpec {
    pub properties: IndexMap<String, BodyValue>,
    /// Parsed from the schema; optional and required properties are
    /// currently synthesized alike.
    pub required: Vec<String>,
}

impl RequestBodySpec {
    /// Build a body from a schema; `None` when it declares no properties
    pub fn from_schema(schema: &Value) -> Option<Self> {
        let declared = schema.get("properties").and_then(Value::as_object)?;
        if declared.is_empty() {
            return None;
        }

        let properties: IndexMap<String, BodyValue> = declared
            .iter()
            .map(|(name, prop)| (name.clone(), BodyValue::for_property(name, prop)))
            .collect();

        let required: Vec<String> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            properties,
            required,
        })
    }

    /// Render as a `const <var_name> = { ... };` statement
    pub fn render(&self, var_name: &str, registry: &Registry) -> String {
        let entries: Vec<String> = self
            .properties
            .iter()
            .map(|(name, value)| {
                format!(
                    "        {}: {}",
                    js::property_key(name),
                    value.to_js(name, registry)
                )
            })
            .collect();
        format!("    const {} = {{\n{}\n    }};", var_name, entries.join(",\n"))
    }
}

/// Locate the JSON request body schema of an operation
///
/// `application/json` wins when it declares a non-empty schema, otherwise
/// the first content type mentioning `json` is used.
pub fn request_body_schema(operation: &Value) -> Option<&Value> {
    let content = operation
        .get("requestBody")
        .and_then(|body| body.get("content"))
        .and_then(Value::as_object)?;

    let exact = content
        .get("application/json")
        .and_then(|media| media.get("schema"))
        .filter(|schema| !is_empty_schema(schema));
    if exact.is_some() {
        return exact;
    }

    content
        .iter()
        .find(|(content_type, _)| content_type.to_lowercase().contains("json"))
        .and_then(|(_, media)| media.get("schema"))
}

fn is_empty_schema(schema: &Value) -> bool {
    match schema {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Synthesize the request body of an operation, if it has one
pub fn synthesize_request_body(operation: &Value) -> Option<RequestBodySpec> {
    request_body_schema(operation).and_then(RequestBodySpec::from_schema)
}
