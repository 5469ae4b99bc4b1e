use crate::error::{K6GenError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load an OpenAPI document from a YAML or JSON file
///
/// The document is kept as a generic, order-preserving mapping; no schema
/// validation is performed. The parser is chosen by file extension
/// (`.yaml`/`.yml` or `.json`); any other extension tries JSON first and
/// falls back to YAML.
pub fn load_openapi<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(K6GenError::InputNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let spec = match extension.as_deref() {
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        Some("json") => parse_json(&content)?,
        _ => match parse_json(&content) {
            Ok(spec) => spec,
            Err(e) => {
                tracing::debug!("JSON parse failed ({}), retrying as YAML", e);
                parse_yaml(&content)?
            }
        },
    };

    tracing::info!("Loaded OpenAPI document from {}", path.display());
    Ok(spec)
}

fn parse_json(content: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| K6GenError::SpecParseError(e.to_string()))
}

fn parse_yaml(content: &str) -> Result<Value> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| K6GenError::SpecParseError(e.to_string()))?;
    Ok(yaml_to_json(yaml))
}

/// Convert a YAML tree into the JSON model, keeping mapping order
///
/// Non-string keys such as an unquoted `200:` status code become strings.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
