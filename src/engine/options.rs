//! Engine construction options

use crate::decode::Format;
use crate::mapper::{MapOptions, DEFAULT_MAX_DEPTH};
use std::path::PathBuf;

/// How the engine finds and maps its configuration sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Base file name relative to `base_path`. Discovered when unset.
    pub file_name: Option<String>,
    /// Active environment; selects the `<stem>-<env>.<ext>` overlay.
    pub env: Option<String>,
    /// Format of the sources. Inferred from the file extension when unset.
    pub format: Option<Format>,
    pub merge_anonymous: bool,
    pub base_path: PathBuf,
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file_name: None,
            env: None,
            format: None,
            merge_anonymous: false,
            base_path: PathBuf::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn merge_anonymous(mut self, enabled: bool) -> Self {
        self.merge_anonymous = enabled;
        self
    }

    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions { merge_anonymous: self.merge_anonymous, max_depth: self.max_depth }
    }
}
