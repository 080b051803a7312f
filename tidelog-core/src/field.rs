//! Structured key/value fields attached to log entries.

use std::fmt::{Debug, Display};
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    value: Value,
}

impl Field {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.key, self.value)
    }
}

pub fn string(key: impl Into<String>, value: impl Into<String>) -> Field {
    Field::new(key, value.into())
}

pub fn int(key: impl Into<String>, value: i64) -> Field {
    Field::new(key, value)
}

pub fn uint(key: impl Into<String>, value: u64) -> Field {
    Field::new(key, value)
}

/// Non-finite floats have no JSON form and are recorded as strings.
pub fn float(key: impl Into<String>, value: f64) -> Field {
    match serde_json::Number::from_f64(value) {
        Some(number) => Field::new(key, Value::Number(number)),
        None => Field::new(key, value.to_string()),
    }
}

pub fn bool(key: impl Into<String>, value: bool) -> Field {
    Field::new(key, value)
}

/// Durations are recorded in seconds.
pub fn duration(key: impl Into<String>, value: Duration) -> Field {
    float(key, value.as_secs_f64())
}

/// Records an error under the `error` key.
pub fn error(err: &(dyn std::error::Error + 'static)) -> Field {
    Field::new("error", err.to_string())
}

pub fn display(key: impl Into<String>, value: &dyn Display) -> Field {
    Field::new(key, value.to_string())
}

pub fn debug(key: impl Into<String>, value: &dyn Debug) -> Field {
    Field::new(key, format!("{:?}", value))
}

/// Records any serializable value as nested JSON.
pub fn json<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Field {
    let value = serde_json::to_value(value)
        .unwrap_or_else(|e| Value::String(format!("<unserializable: {}>", e)));
    Field::new(key, value)
}

/// Collect fields into a JSON object. Later keys overwrite earlier ones.
pub fn to_map(fields: &[Field]) -> Map<String, Value> {
    let mut map = Map::new();
    for field in fields {
        map.insert(field.key.clone(), field.value.clone());
    }
    map
}

/// Build a `Vec<Field>` from `key => value` pairs.
///
/// Usage:
/// ```
/// use tidelog_core::fields;
/// let fields = fields! {
///     "request_id" => "abc123",
///     "attempt" => 2
/// };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut fields: ::std::vec::Vec<$crate::field::Field> = ::std::vec::Vec::new();
        $(
            fields.push($crate::field::Field::new($key, $value));
        )*
        fields
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_constructors() {
        assert_eq!(string("user", "alice").value(), &json!("alice"));
        assert_eq!(int("attempt", -3).value(), &json!(-3));
        assert_eq!(uint("bytes", 42).value(), &json!(42));
        assert_eq!(bool("cached", true).value(), &json!(true));
        assert_eq!(float("ratio", 0.5).value(), &json!(0.5));
        assert_eq!(float("bad", f64::NAN).value(), &json!("NaN"));
        assert_eq!(
            duration("elapsed", Duration::from_millis(1500)).value(),
            &json!(1.5)
        );
    }

    #[test]
    fn test_error_and_rendered_fields() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let field = error(&err);
        assert_eq!(field.key(), "error");
        assert_eq!(field.value(), &json!("disk full"));

        assert_eq!(display("addr", &"127.0.0.1:80").value(), &json!("127.0.0.1:80"));
        assert_eq!(debug("path", &"a b").value(), &json!("\"a b\""));
    }

    #[test]
    fn test_json_field() {
        #[derive(Serialize)]
        struct Peer {
            host: &'static str,
            port: u16,
        }
        let field = json("peer", &Peer { host: "db", port: 5432 });
        assert_eq!(field.value(), &json!({"host": "db", "port": 5432}));
    }

    #[test]
    fn test_fields_macro_and_map() {
        let fields = fields! {
            "request_id" => "req123",
            "attempt" => 1,
            "attempt" => 2,
        };
        assert_eq!(fields.len(), 3);

        let map = to_map(&fields);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("attempt"), Some(&json!(2)));
        assert_eq!(map.get("request_id"), Some(&json!("req123")));
    }
}
