//! TOML decoding through the `toml` crate

use crate::value::{Mapping, Value};

pub fn parse(text: &str) -> Result<Value, toml::de::Error> {
    let table: toml::Table = toml::from_str(text)?;
    Ok(convert_table(table))
}

fn convert_table(table: toml::Table) -> Value {
    Value::Mapping(table.into_iter().map(|(k, v)| (Value::String(k), convert(v))).collect::<Mapping>())
}

fn convert(raw: toml::Value) -> Value {
    match raw {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(convert).collect()),
        toml::Value::Table(table) => convert_table(table),
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::value::Value;

    #[test]
    fn datetimes_become_strings() {
        let value = parse("released = 1979-05-27T07:32:00Z").expect("toml");
        assert_eq!(
            value.as_mapping().and_then(|m| m.get("released")),
            Some(&Value::String("1979-05-27T07:32:00Z".into()))
        );
    }

    #[test]
    fn arrays_of_tables() {
        let value = parse("[[hosts]]\nname = 'a'\n[[hosts]]\nname = 'b'").expect("toml");
        let hosts = value.as_mapping().and_then(|m| m.get("hosts")).and_then(Value::as_sequence);
        assert_eq!(hosts.map(<[Value]>::len), Some(2));
    }
}
