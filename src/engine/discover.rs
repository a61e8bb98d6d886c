//! Config file discovery and environment overlays

use super::{Options, Source};
use crate::decode::Format;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_STEM: &str = "application";

/// Probed in order when no file name is configured.
const DEFAULT_EXTENSIONS: [&str; 5] = ["yaml", "yml", "json", "ini", "toml"];

/// Resolve the contributing files, highest priority first.
pub fn resolve_sources(options: &Options) -> Result<Vec<Source>> {
    let base = locate_base(options)?;
    let format = match options.format {
        Some(format) => format,
        None => Format::from_path(&base).ok_or_else(|| Error::UnsupportedFormat(base.clone()))?,
    };

    let mut sources = vec![Source { path: base.clone(), format }];

    if let Some(env) = options.env.as_deref().filter(|env| !env.is_empty()) {
        let overlay = overlay_path(&base, env);
        if overlay.is_file() {
            tracing::debug!(path = %overlay.display(), env, "using environment overlay");
            sources.insert(0, Source { path: overlay, format });
        } else {
            tracing::debug!(path = %overlay.display(), env, "no environment overlay");
        }
    }

    Ok(sources)
}

fn locate_base(options: &Options) -> Result<PathBuf> {
    let candidates: Vec<PathBuf> = match &options.file_name {
        Some(name) => vec![options.base_path.join(name)],
        None => DEFAULT_EXTENSIONS
            .iter()
            .map(|ext| options.base_path.join(format!("{DEFAULT_STEM}.{ext}")))
            .collect(),
    };

    match candidates.iter().find(|path| path.is_file()) {
        Some(found) => {
            tracing::debug!(path = %found.display(), "found config file");
            Ok(found.clone())
        }
        None => Err(Error::ConfigNotFound {
            searched: candidates.iter().map(|path| path.display().to_string()).collect(),
        }),
    }
}

/// `conf/app.yaml` with env `local` becomes `conf/app-local.yaml`.
pub fn overlay_path(base: &Path, env: &str) -> PathBuf {
    let stem = base.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}-{env}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{env}"),
    };
    base.with_file_name(name)
}
