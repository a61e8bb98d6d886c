//! Engine-level errors

use crate::decode::{DecodeError, Format};
use crate::mapper::MapError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found (searched: {})", .searched.join(", "))]
    ConfigNotFound { searched: Vec<String> },

    #[error("unsupported config format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} in {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        format: Format,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Map(#[from] MapError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
