//! JSON decoding through `serde_json`

use crate::value::{Mapping, Value};

pub fn parse(text: &str) -> Result<Value, serde_json::Error> {
    let raw: serde_json::Value = serde_json::from_str(text)?;
    Ok(convert(raw))
}

fn convert(raw: serde_json::Value) -> Value {
    match raw {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                n.as_f64().map_or(Value::Null, Value::Float)
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Sequence(items.into_iter().map(convert).collect()),
        serde_json::Value::Object(entries) => Value::Mapping(
            entries.into_iter().map(|(k, v)| (Value::String(k), convert(v))).collect::<Mapping>(),
        ),
    }
}
