use crate::framework::core::Body;
use serde_json::Value;

/// Display text for a request body, response body or failure value.
///
/// Null renders empty, strings render verbatim, lists and maps render as
/// two-space indented JSON, and anything else uses its plain string form.
pub fn render_body(body: &Body) -> String {
    match body {
        Body::Null => String::new(),
        Body::Text(text) => text.clone(),
        Body::Json(value) => render_value(value),
        Body::Bytes(bytes) => bytes_to_string(bytes),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

/// JSON text of a body as it is sent on the wire.
///
/// Bytes are not JSON-encodable; they fall back to a JSON string of their
/// text form instead of failing.
pub fn body_to_json(body: &Body) -> String {
    match body {
        Body::Null => Value::Null.to_string(),
        Body::Text(text) => Value::String(text.clone()).to_string(),
        Body::Json(value) => value.to_string(),
        Body::Bytes(bytes) => Value::String(bytes_to_string(bytes)).to_string(),
    }
}

/// UTF-8 text when possible, otherwise a `HEX:` dump
fn bytes_to_string(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) if text.chars().all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t')) => {
            text.to_string()
        }
        _ => format!("HEX:{}", hex::encode(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_null_is_empty() {
        assert_eq!(render_body(&Body::Null), "");
        assert_eq!(render_body(&Body::Json(Value::Null)), "");
    }

    #[test]
    fn test_render_string_is_verbatim() {
        assert_eq!(render_body(&Body::Text("abc".to_string())), "abc");
        assert_eq!(render_body(&Body::Json(json!("abc"))), "abc");
    }

    #[test]
    fn test_render_map_is_pretty_printed() {
        assert_eq!(render_body(&Body::Json(json!({"a": 1}))), "{\n  \"a\": 1\n}");
        assert_eq!(render_body(&Body::Json(json!([1, 2]))), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_render_scalars_use_plain_form() {
        assert_eq!(render_body(&Body::Json(json!(42))), "42");
        assert_eq!(render_body(&Body::Json(json!(true))), "true");
    }

    #[test]
    fn test_render_bytes() {
        assert_eq!(render_body(&Body::Bytes(b"plain".to_vec())), "plain");
        assert_eq!(render_body(&Body::Bytes(vec![0x00, 0xff])), "HEX:00ff");
    }

    #[test]
    fn test_body_to_json() {
        assert_eq!(body_to_json(&Body::Null), "null");
        assert_eq!(body_to_json(&Body::Text("it's".to_string())), "\"it's\"");
        assert_eq!(body_to_json(&Body::Json(json!({"a": [1, "b"]}))), "{\"a\":[1,\"b\"]}");
        assert_eq!(body_to_json(&Body::Bytes(vec![0x01])), "\"HEX:01\"");
    }
}
