//! Settings resolver wrapping a coerced raw mapping and its environment collaborators.
//!
//! Reads are split across focused submodules: resolving and template accessors, the
//! name-based read entry point, and validation.

mod accessors;
mod dispatch;
mod validation;

use std::fmt;
use std::sync::Arc;

use crate::coercion::normalize;
use crate::environment::{DocumentRootProvider, EnvironmentStringExpander, SiteBaseUrlProvider};
use crate::models::{RawSettings, Settings};

pub use validation::{CACHE_PAIR_MESSAGE, ValidationError};

/// Resolves effective settings values on demand and validates cross-field rules.
///
/// The raw mapping is coerced once on construction and never mutated afterwards; only the
/// accumulated validation errors change over the resolver's lifetime.
#[derive(Clone)]
pub struct SettingsResolver {
  raw: RawSettings,
  settings: Settings,
  expander: Arc<dyn EnvironmentStringExpander>,
  site_url: Arc<dyn SiteBaseUrlProvider>,
  document_root: Arc<dyn DocumentRootProvider>,
  errors: Vec<ValidationError>,
}

impl SettingsResolver {
  /// Coerce `raw` and wrap it together with its environment collaborators.
  pub fn from_raw(
    raw: RawSettings,
    expander: impl EnvironmentStringExpander + 'static,
    site_url: impl SiteBaseUrlProvider + 'static,
    document_root: impl DocumentRootProvider + 'static,
  ) -> Self {
    Self::from_shared(
      raw,
      Arc::new(expander),
      Arc::new(site_url),
      Arc::new(document_root),
    )
  }

  /// Same as [`SettingsResolver::from_raw`] for collaborators that are already shared.
  pub fn from_shared(
    raw: RawSettings,
    expander: Arc<dyn EnvironmentStringExpander>,
    site_url: Arc<dyn SiteBaseUrlProvider>,
    document_root: Arc<dyn DocumentRootProvider>,
  ) -> Self {
    let raw = normalize(&raw);
    let settings = Settings::from_raw(&raw);
    Self {
      raw,
      settings,
      expander,
      site_url,
      document_root,
      errors: Vec::new(),
    }
  }

  /// Coerced raw mapping.
  pub fn raw(&self) -> &RawSettings {
    &self.raw
  }

  /// Typed view of the stored values, before any resolution.
  pub fn settings(&self) -> &Settings {
    &self.settings
  }
}

impl fmt::Debug for SettingsResolver {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SettingsResolver")
      .field("settings", &self.settings)
      .field("errors", &self.errors)
      .finish_non_exhaustive()
  }
}

/// Compact flag form used in cache keys: `1` when enabled, `0` otherwise.
impl fmt::Display for SettingsResolver {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(if self.settings.enabled { "1" } else { "0" })
  }
}
