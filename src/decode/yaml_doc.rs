//! YAML decoding through `serde_yaml`

use crate::value::{Mapping, Value};

pub fn parse(text: &str) -> Result<Value, serde_yaml::Error> {
    let mut raw: serde_yaml::Value = serde_yaml::from_str(text)?;
    raw.apply_merge()?;
    Ok(convert(raw))
}

fn convert(raw: serde_yaml::Value) -> Value {
    match raw {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                n.as_f64().map_or(Value::Null, Value::Float)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(convert).collect())
        }
        serde_yaml::Value::Mapping(entries) => Value::Mapping(
            entries.into_iter().map(|(k, v)| (convert(k), convert(v))).collect::<Mapping>(),
        ),
        // Tags carry no meaning for configuration; keep the tagged value.
        serde_yaml::Value::Tagged(tagged) => convert(tagged.value),
    }
}
