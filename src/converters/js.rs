//! JavaScript literal rendering shared by the k6 converter

use serde_json::Value;

/// Render a single-quoted JavaScript string literal
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Whether `s` can be used bare as a property name or after a dot
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Object literal key: bare when possible, quoted otherwise
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Property access expression (`obj.name` or `obj['na-me']`)
pub fn member(object: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{}.{}", object, name)
    } else {
        format!("{}[{}]", object, string_literal(name))
    }
}

/// Convert a JSON value to an inline JavaScript literal
pub fn json_to_js(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(json_to_js).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(obj) => {
            if obj.is_empty() {
                "{}".to_string()
            } else {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| format!("{}: {}", property_key(k), json_to_js(v)))
                    .collect();
                format!("{{ {} }}", items.join(", "))
            }
        }
    }
}
