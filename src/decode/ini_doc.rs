//! INI decoding through `rust-ini`
//!
//! Keys outside any section land at the root, each section becomes a nested
//! mapping. INI has no typed scalars, so values that read as integers,
//! floats or booleans are lowered to those kinds and everything else stays a
//! string.

use crate::value::{Mapping, Value};
use ini::Ini;

pub fn parse(text: &str) -> Result<Value, ini::ParseError> {
    let document = Ini::load_from_str(text)?;
    let mut root = Mapping::new();

    for (section, properties) in document.iter() {
        let entries = properties.iter().map(|(k, v)| (k, scalar(v)));
        match section {
            None => {
                for (key, value) in entries {
                    root.insert(key, value);
                }
            }
            Some(name) => {
                // Repeated section headers merge into one mapping.
                if let Some(Value::Mapping(existing)) = root.get_mut(name) {
                    for (key, value) in entries {
                        existing.insert(key, value);
                    }
                } else {
                    root.insert(name, entries.collect::<Mapping>());
                }
            }
        }
    }

    Ok(Value::Mapping(root))
}

fn scalar(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Value::UInt(u);
    }
    if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
        return Value::Float(f);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}
