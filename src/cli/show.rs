//! Show command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use eagle::Value;
use std::collections::BTreeMap;

use super::EngineArgs;

#[derive(Args)]
pub struct ShowArgs {
    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = Output::Yaml)]
    pub output: Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    Yaml,
    Json,
}

pub fn run(engine_args: &EngineArgs, args: ShowArgs) -> Result<()> {
    let engine = engine_args.engine()?;

    // Top-level keys overlay first-wins; each key's value comes whole from
    // the highest-priority source that defines it.
    let mut merged: BTreeMap<String, Value> = BTreeMap::new();
    engine.map_all(&mut merged).context("Failed merging configuration sources")?;

    print!("{}", render(&merged, args.output)?);
    Ok(())
}

fn render(merged: &BTreeMap<String, Value>, output: Output) -> Result<String> {
    match output {
        Output::Yaml => serde_yaml::to_string(merged).context("Failed rendering YAML"),
        Output::Json => {
            let mut json = serde_json::to_string_pretty(merged).context("Failed rendering JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_json_sorted_by_key() {
        let mut merged = BTreeMap::new();
        merged.insert("b".to_string(), Value::Int(2));
        merged.insert("a".to_string(), Value::String("x".into()));

        let json = render(&merged, Output::Json).expect("json");
        assert_eq!(json, "{\n  \"a\": \"x\",\n  \"b\": 2\n}\n");
    }

    #[test]
    fn renders_yaml() {
        let mut merged = BTreeMap::new();
        merged.insert("debug".to_string(), Value::Bool(true));

        assert_eq!(render(&merged, Output::Yaml).expect("yaml"), "debug: true\n");
    }
}
