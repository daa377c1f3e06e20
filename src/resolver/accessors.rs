use tracing::debug;

use super::SettingsResolver;
use crate::attributes::default_text;
use crate::coercion::is_truthy_str;
use crate::models::{AssetKind, ResolvedSettings, SettingField};
use crate::paths::force_trailing_slash;

impl SettingsResolver {
  /// Master on/off switch.
  pub fn enabled(&self) -> bool {
    self.settings.enabled
  }

  /// Whether CSS files should be combined.
  pub fn combine_css_enabled(&self) -> bool {
    self.settings.combine_css_enabled
  }

  /// Whether JS files should be combined.
  pub fn combine_js_enabled(&self) -> bool {
    self.settings.combine_js_enabled
  }

  /// Whether combined CSS should be minified.
  pub fn minify_css_enabled(&self) -> bool {
    self.settings.minify_css_enabled
  }

  /// Whether combined JS should be minified.
  pub fn minify_js_enabled(&self) -> bool {
    self.settings.minify_js_enabled
  }

  /// Whether relative URLs inside CSS are rewritten with [`Self::css_prepend_url`].
  pub fn css_prepend_url_enabled(&self) -> bool {
    self.settings.css_prepend_url_enabled
  }

  /// Filesystem root used to locate source assets.
  ///
  /// Falls back to the document root when nothing is configured.
  pub fn filesystem_path(&self) -> String {
    match self.resolve_location(SettingField::FilesystemPath) {
      Some(path) => path,
      None => {
        let root = self.document_root.document_root();
        debug!(document_root = %root, "filesystemPath not configured, using document root");
        force_trailing_slash(&root)
      }
    }
  }

  /// Base URL used to locate source assets.
  ///
  /// Falls back to the site URL when nothing is configured.
  pub fn base_url(&self) -> String {
    match self.resolve_location(SettingField::BaseUrl) {
      Some(url) => url,
      None => {
        let site_url = self.site_url.site_url();
        debug!(site_url = %site_url, "baseUrl not configured, using site URL");
        force_trailing_slash(&site_url)
      }
    }
  }

  /// Directory combined assets are cached in, or `None` when not configured.
  pub fn cache_path(&self) -> Option<String> {
    self.resolve_location(SettingField::CachePath)
  }

  /// URL combined assets are served from, or `None` when not configured.
  pub fn cache_url(&self) -> Option<String> {
    self.resolve_location(SettingField::CacheUrl)
  }

  /// Prefix for relative URLs inside CSS, or `None` when not configured.
  pub fn css_prepend_url(&self) -> Option<String> {
    self.resolve_location(SettingField::CssPrependUrl)
  }

  /// Markup template for stylesheets.
  pub fn css_return_template(&self) -> String {
    self.text_or_default(SettingField::CssReturnTemplate)
  }

  /// Markup template for scripts.
  pub fn js_return_template(&self) -> String {
    self.text_or_default(SettingField::JsReturnTemplate)
  }

  /// Output mode requested by the consumer. Opaque to the resolver.
  pub fn return_type(&self) -> String {
    self.text_or_default(SettingField::ReturnType)
  }

  /// True when neither a cache path nor a cache URL resolves, so assets are cached through
  /// the host's own resource location.
  ///
  /// Both fields are checked independently, so an unvalidated resolver with only one of the
  /// pair configured still answers `false`.
  pub fn use_resource_cache(&self) -> bool {
    self.cache_path().is_none() && self.cache_url().is_none()
  }

  /// Template for the given asset kind.
  pub fn return_template(&self, kind: AssetKind) -> String {
    match kind {
      AssetKind::Css => self.css_return_template(),
      AssetKind::Js => self.js_return_template(),
    }
  }

  /// Render the return template for `kind`, substituting `url` for its `%s` placeholder.
  pub fn render_tag(&self, kind: AssetKind, url: &str) -> String {
    self.return_template(kind).replacen("%s", url, 1)
  }

  /// Snapshot of every effective value.
  pub fn resolve(&self) -> ResolvedSettings {
    ResolvedSettings {
      enabled: self.enabled(),
      cache_path: self.cache_path(),
      cache_url: self.cache_url(),
      filesystem_path: self.filesystem_path(),
      base_url: self.base_url(),
      combine_css_enabled: self.combine_css_enabled(),
      combine_js_enabled: self.combine_js_enabled(),
      minify_css_enabled: self.minify_css_enabled(),
      minify_js_enabled: self.minify_js_enabled(),
      css_prepend_url_enabled: self.css_prepend_url_enabled(),
      css_prepend_url: self.css_prepend_url(),
      css_return_template: self.css_return_template(),
      js_return_template: self.js_return_template(),
      return_type: self.return_type(),
      use_resource_cache: self.use_resource_cache(),
    }
  }

  fn stored_value(&self, field: SettingField) -> Option<&str> {
    self
      .settings
      .stored_text(field)
      .filter(|value| is_truthy_str(value))
  }

  // An expansion that yields nothing counts as not configured.
  fn resolve_location(&self, field: SettingField) -> Option<String> {
    let expanded = self.expander.expand(self.stored_value(field)?);
    if expanded.is_empty() {
      return None;
    }
    Some(force_trailing_slash(&expanded))
  }

  fn text_or_default(&self, field: SettingField) -> String {
    match self.stored_value(field) {
      Some(value) => value.to_string(),
      None => default_text(field.name()).to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::super::tests::resolver;
  use super::*;
  use crate::environment::{EnvironmentVariables, StaticDocumentRoot, StaticSiteUrl};
  use serde_json::json;

  #[test]
  fn resolves_configured_cache_locations() {
    let resolver = resolver(json!({
      "cachePath": "/var/cache",
      "cacheUrl": "https://cdn.example.com/cache",
    }));

    assert_eq!(resolver.cache_path().as_deref(), Some("/var/cache/"));
    assert_eq!(
      resolver.cache_url().as_deref(),
      Some("https://cdn.example.com/cache/")
    );
    assert!(!resolver.use_resource_cache());
  }

  #[test]
  fn unconfigured_cache_uses_resource_cache() {
    let resolver = resolver(json!({ "cachePath": "", "cacheUrl": "" }));
    assert_eq!(resolver.cache_path(), None);
    assert_eq!(resolver.cache_url(), None);
    assert!(resolver.use_resource_cache());
  }

  #[test]
  fn half_configured_cache_is_not_resource_cache() {
    let resolver = resolver(json!({ "cachePath": "", "cacheUrl": "/cache/" }));
    assert!(!resolver.use_resource_cache());
  }

  #[test]
  fn falls_back_to_document_root_and_site_url() {
    let resolver = resolver(json!({ "filesystemPath": "", "baseUrl": "0" }));
    assert_eq!(resolver.filesystem_path(), "/srv/www/");
    assert_eq!(resolver.base_url(), "https://example.com/");
  }

  #[test]
  fn expands_placeholders_before_slashing() {
    let variables = EnvironmentVariables::default()
      .with("cdn", "https://cdn.example.com//")
      .with("root", "/srv/site");
    let resolver = SettingsResolver::from_raw(
      json!({
        "filesystemPath": "{root}",
        "cssPrependUrl": "{cdn}",
        "cachePath": "{root}/cache///",
        "cacheUrl": "{cdn}cache",
      })
      .as_object()
      .cloned()
      .unwrap(),
      variables,
      StaticSiteUrl::new("https://example.com"),
      StaticDocumentRoot::new("/unused"),
    );

    assert_eq!(resolver.filesystem_path(), "/srv/site/");
    assert_eq!(
      resolver.css_prepend_url().as_deref(),
      Some("https://cdn.example.com/")
    );
    assert_eq!(resolver.cache_path().as_deref(), Some("/srv/site/cache/"));
    assert_eq!(
      resolver.cache_url().as_deref(),
      Some("https://cdn.example.com//cache/")
    );
  }

  #[test]
  fn placeholder_expanding_to_nothing_is_absent() {
    let resolver = SettingsResolver::from_raw(
      json!({ "cachePath": "{empty}", "baseUrl": "{empty}" })
        .as_object()
        .cloned()
        .unwrap(),
      EnvironmentVariables::default().with("empty", ""),
      StaticSiteUrl::new("https://example.com"),
      StaticDocumentRoot::new("/srv/www"),
    );

    assert_eq!(resolver.cache_path(), None);
    assert_eq!(resolver.base_url(), "https://example.com/");
  }

  #[test]
  fn substitutes_declared_template_defaults() {
    let resolver = resolver(json!({
      "cssReturnTemplate": "",
      "jsReturnTemplate": null,
      "returnType": "",
    }));

    assert_eq!(
      resolver.css_return_template(),
      r#"<link rel="stylesheet" href="%s">"#
    );
    assert_eq!(resolver.js_return_template(), r#"<script src="%s"></script>"#);
    assert_eq!(resolver.return_type(), "url");
  }

  #[test]
  fn returns_configured_templates_verbatim() {
    let resolver = resolver(json!({
      "cssReturnTemplate": "<link href=\"%s\" media=\"print\">",
      "returnType": "tag",
      "jsReturnTemplate": "{notExpanded}%s",
    }));

    assert_eq!(
      resolver.css_return_template(),
      "<link href=\"%s\" media=\"print\">"
    );
    assert_eq!(resolver.return_type(), "tag");
    assert_eq!(resolver.js_return_template(), "{notExpanded}%s");
  }

  #[test]
  fn renders_asset_tags() {
    let resolver = resolver(json!({}));
    assert_eq!(
      resolver.render_tag(AssetKind::Js, "/cache/app.js"),
      r#"<script src="/cache/app.js"></script>"#
    );
    assert_eq!(
      resolver.render_tag(AssetKind::Css, "/cache/site.css"),
      r#"<link rel="stylesheet" href="/cache/site.css">"#
    );
  }

  #[test]
  fn resolved_snapshot_matches_accessors() {
    let resolver = resolver(json!({ "minifyJsEnabled": "0", "cssPrependUrl": "/assets" }));
    let snapshot = resolver.resolve();

    assert!(!snapshot.minify_js_enabled);
    assert_eq!(snapshot.css_prepend_url.as_deref(), Some("/assets/"));
    assert_eq!(snapshot.filesystem_path, "/srv/www/");
    assert!(snapshot.use_resource_cache);
  }

  #[test]
  fn every_located_value_ends_with_one_separator() {
    let resolver = resolver(json!({
      "filesystemPath": "/a//",
      "baseUrl": "https://b.example.com",
      "cachePath": "c",
      "cacheUrl": "d////",
      "cssPrependUrl": "e/",
    }));

    let values = [
      Some(resolver.filesystem_path()),
      Some(resolver.base_url()),
      resolver.cache_path(),
      resolver.cache_url(),
      resolver.css_prepend_url(),
    ];
    for value in values.into_iter().flatten() {
      assert!(value.ends_with('/') && !value.ends_with("//"), "{value}");
    }
  }
}
