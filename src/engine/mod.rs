//! Configuration engine
//!
//! Resolves the configuration sources for the active environment, decodes
//! them once, and maps the resulting entities onto caller-owned structures.

use crate::decode::{decode, Format};
use crate::error::{Error, Result};
use crate::mapper::{map_layers, MapError};
use crate::slot::Settable;
use crate::value::Value;
use std::fs;
use std::path::PathBuf;

pub mod discover;
mod options;

pub use options::Options;

/// One contributing configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub format: Format,
}

/// Decoded configuration sources, ready to be mapped.
///
/// Entities are ordered highest priority first: the environment overlay comes
/// before the base file. The engine never changes after construction.
#[derive(Debug, Clone)]
pub struct Engine {
    options: Options,
    sources: Vec<Source>,
    entities: Vec<Value>,
}

impl Engine {
    /// Discover, read and decode every source for `options`.
    pub fn new(options: Options) -> Result<Self> {
        let sources = discover::resolve_sources(&options)?;
        let entities = sources.iter().map(load_source).collect::<Result<Vec<_>>>()?;
        Ok(Self { options, sources, entities })
    }

    /// Build an engine over trees decoded elsewhere, highest priority first.
    pub fn from_entities(entities: Vec<Value>, options: Options) -> Self {
        Self { options, sources: Vec::new(), entities }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn entities(&self) -> &[Value] {
        &self.entities
    }

    /// Layer every entity onto `dst`, first-wins per field.
    ///
    /// On error `dst` is left as it was.
    pub fn map_all<T: Settable + Clone>(&self, dst: &mut T) -> Result<(), MapError> {
        map_layers(dst, &self.entities, &self.options.map_options())
    }

    /// Map into a fresh default value.
    pub fn load<T: Settable + Clone + Default>(&self) -> Result<T, MapError> {
        let mut dst = T::default();
        self.map_all(&mut dst)?;
        Ok(dst)
    }
}

fn load_source(source: &Source) -> Result<Value> {
    let text = fs::read_to_string(&source.path)
        .map_err(|err| Error::Io { path: source.path.clone(), source: err })?;
    tracing::debug!(path = %source.path.display(), format = %source.format, "decoding config source");
    decode(source.format, &text).map_err(|err| Error::Decode {
        path: source.path.clone(),
        format: source.format,
        source: err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Database {
        host: String,
        port: u16,
    }

    crate::record!(Database { host, port });

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Settings {
        name: String,
        debug: bool,
        database: Database,
        features: Vec<String>,
        limits: HashMap<String, u32>,
    }

    crate::record!(Settings { name, debug, database = "db", features, limits });

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).expect("write");
    }

    #[test]
    fn overlay_takes_priority_over_base() {
        let tmp = TempDir::new().expect("tmp");
        write(
            &tmp,
            "application.yaml",
            "name: base\ndebug: false\ndb:\n  host: db.internal\n  port: 5432\nfeatures: [a, b]\n",
        );
        write(&tmp, "application-local.yaml", "debug: true\ndb:\n  host: localhost\n");

        let engine = Engine::new(Options::new().base_path(tmp.path()).env("local")).expect("engine");
        assert_eq!(engine.entities().len(), 2);

        let settings: Settings = engine.load().expect("map");
        assert_eq!(settings.name, "base");
        assert!(settings.debug);
        assert_eq!(settings.database, Database { host: "localhost".into(), port: 5432 });
        assert_eq!(settings.features, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn loads_each_format() {
        let cases = [
            ("application.json", r#"{"name": "svc", "db": {"port": 1}}"#),
            ("application.ini", "name = svc\n[db]\nport = 1\n"),
            ("application.toml", "name = 'svc'\n[db]\nport = 1\n"),
        ];
        for (file, content) in cases {
            let tmp = TempDir::new().expect("tmp");
            write(&tmp, file, content);
            let engine = Engine::new(Options::new().base_path(tmp.path())).expect(file);
            let settings: Settings = engine.load().expect(file);
            assert_eq!(settings.name, "svc", "{file}");
            assert_eq!(settings.database.port, 1, "{file}");
        }
    }

    #[test]
    fn decode_errors_name_the_file() {
        let tmp = TempDir::new().expect("tmp");
        write(&tmp, "application.json", "{ not json");

        let err = Engine::new(Options::new().base_path(tmp.path())).expect_err("bad json");
        assert!(matches!(err, Error::Decode { format: Format::Json, .. }));
        assert!(err.to_string().contains("application.json"), "{err}");
    }

    #[test]
    fn conversion_errors_surface_from_map_all() {
        let tmp = TempDir::new().expect("tmp");
        write(&tmp, "application.yaml", "db:\n  port: high\n");

        let engine = Engine::new(Options::new().base_path(tmp.path())).expect("engine");
        let mut settings = Settings::default();
        let err = engine.map_all(&mut settings).expect_err("bad port");
        assert_eq!(err.to_string(), "database.port convert u16 error");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn engine_from_entities() {
        let entities = vec![
            decode(Format::Yaml, "limits:\n  cpu: 2").expect("yaml"),
            decode(Format::Yaml, "limits:\n  cpu: 4\n  mem: 256").expect("yaml"),
        ];
        let engine = Engine::from_entities(entities, Options::new());
        assert!(engine.sources().is_empty());

        let settings: Settings = engine.load().expect("map");
        assert_eq!(settings.limits.get("cpu"), Some(&2));
        assert_eq!(settings.limits.get("mem"), Some(&256));
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
