//! Format decoders: configuration text into a [`Value`] tree

use crate::value::Value;
use std::fmt;
use std::path::Path;
use thiserror::Error;

mod ini_doc;
mod json_doc;
mod toml_doc;
mod yaml_doc;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Json,
    Ini,
    Toml,
}

impl Format {
    /// Detect the format from a file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "ini" => Some(Format::Ini),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|e| e.to_str()).and_then(Self::from_extension)
    }

    /// Canonical extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Ini => "ini",
            Format::Toml => "toml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Yaml => "YAML",
            Format::Json => "JSON",
            Format::Ini => "INI",
            Format::Toml => "TOML",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Ini(#[from] ini::ParseError),

    #[error("document root must be a mapping, found {0}")]
    RootNotMapping(&'static str),
}

/// Decode a document of the given format.
///
/// The root of every configuration document must be a mapping; an empty
/// document decodes to an empty mapping.
pub fn decode(format: Format, text: &str) -> Result<Value, DecodeError> {
    let value = match format {
        Format::Yaml => yaml_doc::parse(text)?,
        Format::Json => json_doc::parse(text)?,
        Format::Ini => ini_doc::parse(text)?,
        Format::Toml => toml_doc::parse(text)?,
    };

    match value {
        Value::Null => Ok(Value::Mapping(Default::default())),
        Value::Mapping(_) => Ok(value),
        other => Err(DecodeError::RootNotMapping(other.kind())),
    }
}
