//! Data structures describing raw, typed and resolved settings.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::attributes::default_flag;
use crate::coercion::is_truthy;

/// Flat, loosely typed mapping of attribute names to stored values.
pub type RawSettings = Map<String, Value>;

/// Every attribute the resolver knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingField {
  /// `enabled`
  Enabled,
  /// `cachePath`
  CachePath,
  /// `cacheUrl`
  CacheUrl,
  /// `filesystemPath`
  FilesystemPath,
  /// `baseUrl`
  BaseUrl,
  /// `combineCssEnabled`
  CombineCssEnabled,
  /// `combineJsEnabled`
  CombineJsEnabled,
  /// `minifyCssEnabled`
  MinifyCssEnabled,
  /// `minifyJsEnabled`
  MinifyJsEnabled,
  /// `cssPrependUrlEnabled`
  CssPrependUrlEnabled,
  /// `cssPrependUrl`
  CssPrependUrl,
  /// `cssReturnTemplate`
  CssReturnTemplate,
  /// `jsReturnTemplate`
  JsReturnTemplate,
  /// `returnType`
  ReturnType,
}

impl SettingField {
  /// All fields in declaration order.
  pub const ALL: [SettingField; 14] = [
    SettingField::CachePath,
    SettingField::CacheUrl,
    SettingField::Enabled,
    SettingField::FilesystemPath,
    SettingField::BaseUrl,
    SettingField::CombineCssEnabled,
    SettingField::CombineJsEnabled,
    SettingField::MinifyCssEnabled,
    SettingField::MinifyJsEnabled,
    SettingField::CssReturnTemplate,
    SettingField::JsReturnTemplate,
    SettingField::ReturnType,
    SettingField::CssPrependUrlEnabled,
    SettingField::CssPrependUrl,
  ];

  /// camelCase name used in raw mappings and error reports.
  pub fn name(self) -> &'static str {
    match self {
      Self::Enabled => "enabled",
      Self::CachePath => "cachePath",
      Self::CacheUrl => "cacheUrl",
      Self::FilesystemPath => "filesystemPath",
      Self::BaseUrl => "baseUrl",
      Self::CombineCssEnabled => "combineCssEnabled",
      Self::CombineJsEnabled => "combineJsEnabled",
      Self::MinifyCssEnabled => "minifyCssEnabled",
      Self::MinifyJsEnabled => "minifyJsEnabled",
      Self::CssPrependUrlEnabled => "cssPrependUrlEnabled",
      Self::CssPrependUrl => "cssPrependUrl",
      Self::CssReturnTemplate => "cssReturnTemplate",
      Self::JsReturnTemplate => "jsReturnTemplate",
      Self::ReturnType => "returnType",
    }
  }

  /// Whether reads of this field go through a resolving or default-substituting accessor.
  pub fn has_custom_resolution(self) -> bool {
    !matches!(
      self,
      Self::Enabled
        | Self::CombineCssEnabled
        | Self::CombineJsEnabled
        | Self::MinifyCssEnabled
        | Self::MinifyJsEnabled
        | Self::CssPrependUrlEnabled
    )
  }
}

impl fmt::Display for SettingField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Returned when parsing a name that is not a known attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown settings attribute `{}`", self.0)
  }
}

impl std::error::Error for UnknownField {}

impl FromStr for SettingField {
  type Err = UnknownField;

  fn from_str(name: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|field| field.name() == name)
      .ok_or_else(|| UnknownField(name.to_string()))
  }
}

/// Typed view over a coerced raw mapping.
///
/// String attributes are `None` when the key was never configured and `Some("")` when it was
/// saved empty. Accessors on the resolver treat both as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  /// Master on/off switch.
  pub enabled: bool,
  /// Raw cache directory, possibly containing placeholders.
  pub cache_path: Option<String>,
  /// Raw cache URL, possibly containing placeholders.
  pub cache_url: Option<String>,
  /// Raw filesystem root for locating source assets.
  pub filesystem_path: Option<String>,
  /// Raw base URL for locating source assets.
  pub base_url: Option<String>,
  /// Combine CSS files into one.
  pub combine_css_enabled: bool,
  /// Combine JS files into one.
  pub combine_js_enabled: bool,
  /// Minify combined CSS.
  pub minify_css_enabled: bool,
  /// Minify combined JS.
  pub minify_js_enabled: bool,
  /// Rewrite relative URLs inside CSS with a prefix.
  pub css_prepend_url_enabled: bool,
  /// Prefix used when rewriting relative CSS URLs.
  pub css_prepend_url: Option<String>,
  /// Markup emitted for a CSS asset, with one `%s` placeholder.
  pub css_return_template: Option<String>,
  /// Markup emitted for a JS asset, with one `%s` placeholder.
  pub js_return_template: Option<String>,
  /// Output mode requested by the consumer.
  pub return_type: Option<String>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      enabled: default_flag("enabled"),
      cache_path: None,
      cache_url: None,
      filesystem_path: None,
      base_url: None,
      combine_css_enabled: default_flag("combineCssEnabled"),
      combine_js_enabled: default_flag("combineJsEnabled"),
      minify_css_enabled: default_flag("minifyCssEnabled"),
      minify_js_enabled: default_flag("minifyJsEnabled"),
      css_prepend_url_enabled: default_flag("cssPrependUrlEnabled"),
      css_prepend_url: None,
      css_return_template: None,
      js_return_template: None,
      return_type: None,
    }
  }
}

impl Settings {
  /// Build the typed view from a mapping that has already been through
  /// [`crate::coercion::normalize`].
  ///
  /// Values of the wrong type never fail here; schema checks during validation report them.
  pub fn from_raw(raw: &RawSettings) -> Self {
    let text = |field: SettingField| raw.get(field.name()).and_then(text_value);
    let flag = |field: SettingField| match raw.get(field.name()) {
      Some(value) => is_truthy(value),
      None => default_flag(field.name()),
    };

    Self {
      enabled: flag(SettingField::Enabled),
      cache_path: text(SettingField::CachePath),
      cache_url: text(SettingField::CacheUrl),
      filesystem_path: text(SettingField::FilesystemPath),
      base_url: text(SettingField::BaseUrl),
      combine_css_enabled: flag(SettingField::CombineCssEnabled),
      combine_js_enabled: flag(SettingField::CombineJsEnabled),
      minify_css_enabled: flag(SettingField::MinifyCssEnabled),
      minify_js_enabled: flag(SettingField::MinifyJsEnabled),
      css_prepend_url_enabled: flag(SettingField::CssPrependUrlEnabled),
      css_prepend_url: text(SettingField::CssPrependUrl),
      css_return_template: text(SettingField::CssReturnTemplate),
      js_return_template: text(SettingField::JsReturnTemplate),
      return_type: text(SettingField::ReturnType),
    }
  }

  /// Stored string for a string attribute; `None` for boolean attributes.
  pub fn stored_text(&self, field: SettingField) -> Option<&str> {
    let value = match field {
      SettingField::CachePath => &self.cache_path,
      SettingField::CacheUrl => &self.cache_url,
      SettingField::FilesystemPath => &self.filesystem_path,
      SettingField::BaseUrl => &self.base_url,
      SettingField::CssPrependUrl => &self.css_prepend_url,
      SettingField::CssReturnTemplate => &self.css_return_template,
      SettingField::JsReturnTemplate => &self.js_return_template,
      SettingField::ReturnType => &self.return_type,
      _ => return None,
    };
    value.as_deref()
  }

  /// Stored flag for a boolean attribute; `None` for string attributes.
  pub fn stored_flag(&self, field: SettingField) -> Option<bool> {
    match field {
      SettingField::Enabled => Some(self.enabled),
      SettingField::CombineCssEnabled => Some(self.combine_css_enabled),
      SettingField::CombineJsEnabled => Some(self.combine_js_enabled),
      SettingField::MinifyCssEnabled => Some(self.minify_css_enabled),
      SettingField::MinifyJsEnabled => Some(self.minify_js_enabled),
      SettingField::CssPrependUrlEnabled => Some(self.css_prepend_url_enabled),
      _ => None,
    }
  }
}

fn text_value(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(text) => Some(text.clone()),
    Value::Number(number) => Some(number.to_string()),
    Value::Bool(true) => Some("1".to_string()),
    Value::Bool(false) => Some(String::new()),
    Value::Array(_) | Value::Object(_) => None,
  }
}

/// Value produced by a read through [`crate::SettingsResolver::attribute`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
  /// Resolved string value.
  Text(String),
  /// Boolean toggle.
  Flag(bool),
  /// The attribute is not configured.
  Absent,
  /// Stored value of an attribute outside the schema.
  Raw(Value),
}

impl AttributeValue {
  /// Text content, if this is a text value.
  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Text(text) => Some(text),
      _ => None,
    }
  }

  /// Whether the value is absent.
  pub fn is_absent(&self) -> bool {
    matches!(self, Self::Absent)
  }
}

impl From<Option<String>> for AttributeValue {
  fn from(value: Option<String>) -> Self {
    value.map_or(Self::Absent, Self::Text)
  }
}

impl From<String> for AttributeValue {
  fn from(value: String) -> Self {
    Self::Text(value)
  }
}

impl From<bool> for AttributeValue {
  fn from(value: bool) -> Self {
    Self::Flag(value)
  }
}

/// Kind of asset a return template renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
  /// Stylesheet.
  Css,
  /// Script.
  Js,
}

/// Snapshot of every effective value, as seen by asset-pipeline consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
  /// Master on/off switch.
  pub enabled: bool,
  /// Resolved cache directory.
  pub cache_path: Option<String>,
  /// Resolved cache URL.
  pub cache_url: Option<String>,
  /// Resolved filesystem root.
  pub filesystem_path: String,
  /// Resolved base URL.
  pub base_url: String,
  /// Combine CSS files into one.
  pub combine_css_enabled: bool,
  /// Combine JS files into one.
  pub combine_js_enabled: bool,
  /// Minify combined CSS.
  pub minify_css_enabled: bool,
  /// Minify combined JS.
  pub minify_js_enabled: bool,
  /// Rewrite relative URLs inside CSS.
  pub css_prepend_url_enabled: bool,
  /// Resolved CSS URL prefix.
  pub css_prepend_url: Option<String>,
  /// Effective CSS markup template.
  pub css_return_template: String,
  /// Effective JS markup template.
  pub js_return_template: String,
  /// Effective output mode.
  pub return_type: String,
  /// Whether assets are cached through the host's resource path instead of a dedicated
  /// cache location.
  pub use_resource_cache: bool,
}
