//! Accumulating validation for resolved settings.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::SettingsResolver;
use crate::attributes::{ATTRIBUTES, AttributeDefinition, AttributeKind};
use crate::models::SettingField;

/// Message attached to both cache fields when only one of them resolves.
pub const CACHE_PAIR_MESSAGE: &str = "cachePath and cacheUrl must both either be empty or non-empty.";

/// Field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
  /// camelCase name of the offending attribute.
  pub field: String,
  /// Human readable message, shown as-is next to the field.
  pub message: String,
}

impl ValidationError {
  /// Create an error for `field`.
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

impl std::error::Error for ValidationError {}

impl SettingsResolver {
  /// Run every validation rule and return the accumulated errors. An empty slice means the
  /// settings are safe to hand to the asset pipeline.
  ///
  /// With `clear_errors` unset, errors from earlier runs are kept and new ones appended.
  pub fn validate(&mut self, clear_errors: bool) -> &[ValidationError] {
    if clear_errors {
      self.clear_errors();
    }

    self.validate_cache_path_and_url();
    self.validate_schema();

    if !self.errors.is_empty() {
      warn!(count = self.errors.len(), "settings failed validation");
    }
    &self.errors
  }

  /// Require `cachePath` and `cacheUrl` to be both set or both unset.
  ///
  /// Checked on resolved values, so a placeholder that expands to nothing counts as unset.
  pub fn validate_cache_path_and_url(&mut self) {
    let cache_path_empty = self.cache_path().is_none();
    let cache_url_empty = self.cache_url().is_none();

    if cache_path_empty != cache_url_empty {
      self.add_error(SettingField::CachePath.name(), CACHE_PAIR_MESSAGE);
      self.add_error(SettingField::CacheUrl.name(), CACHE_PAIR_MESSAGE);
    }
  }

  /// Check stored values against their declared type and length.
  pub fn validate_schema(&mut self) {
    let failures: Vec<ValidationError> = ATTRIBUTES
      .iter()
      .filter_map(|definition| {
        let value = self.raw.get(definition.name)?;
        schema_violation(definition, value)
      })
      .collect();
    self.errors.extend(failures);
  }

  /// Record an error against `field`.
  pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.errors.push(ValidationError::new(field, message));
  }

  /// Drop every accumulated error.
  pub fn clear_errors(&mut self) {
    self.errors.clear();
  }

  /// Errors accumulated so far.
  pub fn errors(&self) -> &[ValidationError] {
    &self.errors
  }

  /// Whether any error has been recorded.
  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  /// Messages recorded against a single field.
  pub fn errors_for(&self, field: &str) -> Vec<&str> {
    self
      .errors
      .iter()
      .filter(|error| error.field == field)
      .map(|error| error.message.as_str())
      .collect()
  }
}

fn schema_violation(definition: &AttributeDefinition, value: &Value) -> Option<ValidationError> {
  match (definition.kind, value) {
    (AttributeKind::Bool, Value::Bool(_)) => None,
    (AttributeKind::Bool, _) => Some(ValidationError::new(
      definition.name,
      format!("{} must be a boolean.", definition.name),
    )),
    (AttributeKind::String, Value::Null) => None,
    (AttributeKind::String, Value::String(text)) => {
      let limit = definition.max_length?;
      (text.chars().count() > limit).then(|| {
        ValidationError::new(
          definition.name,
          format!("{} should contain at most {limit} characters.", definition.name),
        )
      })
    }
    (AttributeKind::String, _) => Some(ValidationError::new(
      definition.name,
      format!("{} must be a string.", definition.name),
    )),
  }
}

#[cfg(test)]
mod tests {
  use super::super::tests::resolver;
  use super::*;
  use crate::environment::{EnvironmentVariables, StaticDocumentRoot, StaticSiteUrl};
  use serde_json::json;

  #[test]
  fn reports_half_configured_cache_on_both_fields() {
    let mut resolver = resolver(json!({ "cachePath": "", "cacheUrl": "/cache/" }));
    let errors = resolver.validate(true).to_vec();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].field, "cachePath");
    assert_eq!(errors[1].field, "cacheUrl");
    for error in &errors {
      assert!(error.message.contains("cachePath"));
      assert!(error.message.contains("cacheUrl"));
    }
  }

  #[test]
  fn accepts_fully_configured_cache() {
    let mut resolver = resolver(json!({
      "cachePath": "/var/cache",
      "cacheUrl": "https://cdn.example.com/cache",
    }));
    assert!(resolver.validate(true).is_empty());
    assert!(!resolver.has_errors());
  }

  #[test]
  fn accepts_fully_unconfigured_cache() {
    let mut resolver = resolver(json!({ "cachePath": "", "cacheUrl": "" }));
    assert!(resolver.validate(true).is_empty());
  }

  #[test]
  fn pairing_rule_holds_for_every_combination() {
    let values = [json!(null), json!(""), json!("0"), json!("/x")];
    for path in &values {
      for url in &values {
        let mut resolver = resolver(json!({ "cachePath": path, "cacheUrl": url }));
        let path_set = path.as_str() == Some("/x");
        let url_set = url.as_str() == Some("/x");
        assert_eq!(
          !resolver.validate(true).is_empty(),
          path_set != url_set,
          "{path} / {url}"
        );
      }
    }
  }

  #[test]
  fn validates_after_expansion() {
    let mut resolver = SettingsResolver::from_raw(
      json!({ "cachePath": "{cacheDir}", "cacheUrl": "/cache" })
        .as_object()
        .cloned()
        .unwrap(),
      EnvironmentVariables::default().with("cacheDir", ""),
      StaticSiteUrl::new("https://example.com"),
      StaticDocumentRoot::new("/srv/www"),
    );

    assert_eq!(resolver.validate(true).len(), 2);
  }

  #[test]
  fn keeps_previous_errors_when_asked() {
    let mut resolver = resolver(json!({ "cachePath": "/only" }));
    resolver.add_error("baseUrl", "rejected upstream");

    assert_eq!(resolver.validate(false).len(), 3);
    assert_eq!(resolver.errors_for("baseUrl"), vec!["rejected upstream"]);

    assert_eq!(resolver.validate(true).len(), 2);
    assert!(resolver.errors_for("baseUrl").is_empty());
  }

  #[test]
  fn reports_type_mismatches() {
    let mut resolver = resolver(json!({ "returnType": ["url"], "baseUrl": 8080 }));
    let errors = resolver.validate(true).to_vec();

    assert_eq!(errors, vec![
      ValidationError::new("baseUrl", "baseUrl must be a string."),
      ValidationError::new("returnType", "returnType must be a string."),
    ]);
  }

  #[test]
  fn reports_overlong_strings() {
    let mut resolver = resolver(json!({ "cssPrependUrl": "a".repeat(256) }));
    assert_eq!(resolver.validate(true), &[ValidationError::new(
      "cssPrependUrl",
      "cssPrependUrl should contain at most 255 characters."
    )]);
  }

  #[test]
  fn coerced_flags_always_pass_schema_checks() {
    let mut resolver = resolver(json!({ "enabled": "yes", "minifyJsEnabled": [] }));
    assert!(resolver.validate(true).is_empty());
    assert!(!resolver.minify_js_enabled());
  }

  #[test]
  fn displays_field_and_message() {
    let error = ValidationError::new("cacheUrl", CACHE_PAIR_MESSAGE);
    assert_eq!(
      error.to_string(),
      "cacheUrl: cachePath and cacheUrl must both either be empty or non-empty."
    );
  }
}
