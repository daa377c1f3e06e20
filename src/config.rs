//! Deployment configuration loader describing the environment settings resolve against.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::environment::{
  DocumentRootProvider, EnvironmentVariables, ServerDocumentRoot, StaticDocumentRoot,
  StaticSiteUrl,
};
use crate::models::RawSettings;
use crate::resolver::SettingsResolver;

/// File name searched for by [`ResolverConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "asset-settings.config.json";

/// Host environment: canonical site URL, document root and placeholder values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
  /// Canonical site URL used when `baseUrl` is not configured.
  pub site_url: String,
  /// Document root used when `filesystemPath` is not configured. When unset the
  /// `DOCUMENT_ROOT` process variable is consulted instead.
  pub document_root: Option<String>,
  /// Values substituted into `{name}` placeholders.
  pub environment_variables: BTreeMap<String, String>,
}

impl ResolverConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or unparsable file yields the default configuration.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Placeholder expander built from [`Self::environment_variables`].
  pub fn expander(&self) -> EnvironmentVariables {
    EnvironmentVariables::new(self.environment_variables.clone())
  }

  /// Document root provider honouring an explicit [`Self::document_root`].
  pub fn document_root_provider(&self) -> Arc<dyn DocumentRootProvider> {
    match &self.document_root {
      Some(root) => Arc::new(StaticDocumentRoot::new(root.clone())),
      None => Arc::new(ServerDocumentRoot),
    }
  }

  /// Wrap `raw` in a resolver wired to this environment.
  pub fn resolver(&self, raw: RawSettings) -> SettingsResolver {
    SettingsResolver::from_shared(
      raw,
      Arc::new(self.expander()),
      Arc::new(StaticSiteUrl::new(self.site_url.clone())),
      self.document_root_provider(),
    )
  }
}
