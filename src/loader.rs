//! Reading raw settings documents saved by the host.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::models::RawSettings;

/// Errors that can occur while loading a raw settings document.
#[derive(Debug)]
pub enum SettingsLoadError {
  /// Failed to read the document from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON document.
  Json {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// Failed to parse the YAML document.
  Yaml {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_yaml::Error,
  },
  /// The document parsed but its top level is not a mapping.
  NotAMapping {
    /// Path that caused the error.
    path: PathBuf,
  },
}

/// Load a raw settings mapping from a JSON or YAML file.
///
/// Files ending in `.yaml` or `.yml` are read as YAML, everything else as JSON.
pub fn load_raw_settings(path: impl AsRef<Path>) -> Result<RawSettings, SettingsLoadError> {
  let path = path.as_ref();
  let contents = fs::read_to_string(path).map_err(|source| SettingsLoadError::Io {
    path: path.to_path_buf(),
    source,
  })?;

  let document: Value = if is_yaml(path) {
    serde_yaml::from_str(&contents).map_err(|source| SettingsLoadError::Yaml {
      path: path.to_path_buf(),
      source,
    })?
  } else {
    serde_json::from_str(&contents).map_err(|source| SettingsLoadError::Json {
      path: path.to_path_buf(),
      source,
    })?
  };

  match document {
    Value::Object(map) => Ok(map),
    _ => Err(SettingsLoadError::NotAMapping {
      path: path.to_path_buf(),
    }),
  }
}

fn is_yaml(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

impl std::fmt::Display for SettingsLoadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Json { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::Yaml { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::NotAMapping { path } => {
        write!(f, "{} does not contain a settings mapping", path.display())
      }
    }
  }
}

impl std::error::Error for SettingsLoadError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Json { source, .. } => Some(source),
      Self::Yaml { source, .. } => Some(source),
      Self::NotAMapping { .. } => None,
    }
  }
}
