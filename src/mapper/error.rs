//! Mapping errors

use super::FieldPath;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The node at `path` does not have the shape the destination needs.
    #[error("{path} convert {kind} error")]
    Conversion { path: String, kind: &'static str },

    #[error("{path} type {kind} not supported")]
    Unsupported { path: String, kind: &'static str },

    #[error("{path} exceeds the maximum nesting depth of {limit}")]
    TooDeep { path: String, limit: usize },
}

impl MapError {
    pub fn conversion(path: &FieldPath, kind: &'static str) -> Self {
        MapError::Conversion { path: path.to_string(), kind }
    }

    pub fn unsupported(path: &FieldPath, kind: &'static str) -> Self {
        MapError::Unsupported { path: path.to_string(), kind }
    }

    pub fn too_deep(path: &FieldPath, limit: usize) -> Self {
        MapError::TooDeep { path: path.to_string(), limit }
    }

    pub fn path(&self) -> &str {
        match self {
            MapError::Conversion { path, .. }
            | MapError::Unsupported { path, .. }
            | MapError::TooDeep { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_message_format() {
        let path = FieldPath::root().child("server").child("port");
        let err = MapError::conversion(&path, "u16");
        assert_eq!(err.to_string(), "server.port convert u16 error");
        assert_eq!(err.path(), "server.port");
    }

    #[test]
    fn root_errors_name_the_root() {
        let err = MapError::conversion(&FieldPath::root(), "struct");
        assert_eq!(err.to_string(), ". convert struct error");
    }
}
