//! Deployment-environment collaborators used while resolving settings.
//!
//! The resolver never reads process state directly. Placeholder expansion, the canonical site
//! URL and the document root are all supplied through the traits below so hosts can plug in
//! their own sources and tests can substitute fixed values or closures.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Substitutes deployment-specific placeholders embedded in a raw settings string.
pub trait EnvironmentStringExpander: Send + Sync {
  /// Return `raw` with every known placeholder replaced.
  fn expand(&self, raw: &str) -> String;
}

/// Supplies the canonical site URL used when no base URL is configured.
pub trait SiteBaseUrlProvider: Send + Sync {
  /// Canonical URL of the site.
  fn site_url(&self) -> String;
}

/// Supplies the document root used when no filesystem path is configured.
pub trait DocumentRootProvider: Send + Sync {
  /// Filesystem path the web server serves from.
  fn document_root(&self) -> String;
}

impl<F> EnvironmentStringExpander for F
where
  F: Fn(&str) -> String + Send + Sync,
{
  fn expand(&self, raw: &str) -> String {
    self(raw)
  }
}

impl<F> SiteBaseUrlProvider for F
where
  F: Fn() -> String + Send + Sync,
{
  fn site_url(&self) -> String {
    self()
  }
}

impl<F> DocumentRootProvider for F
where
  F: Fn() -> String + Send + Sync,
{
  fn document_root(&self) -> String {
    self()
  }
}

/// Expander that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityExpander;

impl EnvironmentStringExpander for IdentityExpander {
  fn expand(&self, raw: &str) -> String {
    raw.to_string()
  }
}

fn placeholder_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("invalid placeholder regex"))
}

/// Named environment values substituted into `{name}` placeholders.
///
/// Placeholders whose name is not in the table are left as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentVariables {
  values: BTreeMap<String, String>,
}

impl EnvironmentVariables {
  /// Create an expander from a name to value table.
  pub fn new(values: BTreeMap<String, String>) -> Self {
    Self { values }
  }

  /// Add or replace a single value.
  pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.values.insert(name.into(), value.into());
    self
  }

  /// Value registered for `name`, if any.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.values.get(name).map(String::as_str)
  }
}

impl EnvironmentStringExpander for EnvironmentVariables {
  fn expand(&self, raw: &str) -> String {
    if self.values.is_empty() {
      return raw.to_string();
    }

    placeholder_pattern()
      .replace_all(raw, |caps: &Captures| match self.get(&caps[1]) {
        Some(value) => value.to_string(),
        None => caps[0].to_string(),
      })
      .into_owned()
  }
}

/// Fixed site URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSiteUrl(String);

impl StaticSiteUrl {
  /// Wrap a fixed site URL.
  pub fn new(url: impl Into<String>) -> Self {
    Self(url.into())
  }
}

impl SiteBaseUrlProvider for StaticSiteUrl {
  fn site_url(&self) -> String {
    self.0.clone()
  }
}

/// Fixed document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDocumentRoot(String);

impl StaticDocumentRoot {
  /// Wrap a fixed document root.
  pub fn new(path: impl Into<String>) -> Self {
    Self(path.into())
  }
}

impl DocumentRootProvider for StaticDocumentRoot {
  fn document_root(&self) -> String {
    self.0.clone()
  }
}

/// Process variable consulted by [`ServerDocumentRoot`].
pub const DOCUMENT_ROOT_VAR: &str = "DOCUMENT_ROOT";

/// Document root taken from the `DOCUMENT_ROOT` process variable.
///
/// Falls back to the current working directory, then to an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerDocumentRoot;

impl DocumentRootProvider for ServerDocumentRoot {
  fn document_root(&self) -> String {
    match std::env::var(DOCUMENT_ROOT_VAR) {
      Ok(value) if !value.is_empty() => value,
      _ => std::env::current_dir()
        .map(|dir| dir.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default(),
    }
  }
}
