//! Declared attribute table shared by the administration screen and the resolver.
//!
//! Defaults live here and nowhere else: accessors that substitute a default for an empty
//! value read it back out of [`ATTRIBUTES`].

/// Value type an attribute is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
  /// Free-form string, possibly containing environment placeholders.
  String,
  /// Boolean toggle.
  Bool,
}

/// Default value declared for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeDefault {
  /// No declared default; the attribute is empty until configured.
  None,
  /// Default for a string attribute.
  Text(&'static str),
  /// Default for a boolean attribute.
  Flag(bool),
}

/// Schema entry for a single settings attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDefinition {
  /// camelCase attribute name as it appears in the raw mapping.
  pub name: &'static str,
  /// Stored value type.
  pub kind: AttributeKind,
  /// Declared default.
  pub default: AttributeDefault,
  /// Upper bound on string length enforced during validation.
  pub max_length: Option<usize>,
}

/// Maximum length applied to string attributes unless declared otherwise.
pub const DEFAULT_STRING_MAX_LENGTH: usize = 255;

const fn string(name: &'static str, default: AttributeDefault) -> AttributeDefinition {
  AttributeDefinition {
    name,
    kind: AttributeKind::String,
    default,
    max_length: Some(DEFAULT_STRING_MAX_LENGTH),
  }
}

const fn flag(name: &'static str, default: bool) -> AttributeDefinition {
  AttributeDefinition {
    name,
    kind: AttributeKind::Bool,
    default: AttributeDefault::Flag(default),
    max_length: None,
  }
}

/// Every attribute understood by the resolver, in declaration order.
pub const ATTRIBUTES: &[AttributeDefinition] = &[
  string("cachePath", AttributeDefault::None),
  string("cacheUrl", AttributeDefault::None),
  flag("enabled", true),
  string("filesystemPath", AttributeDefault::None),
  string("baseUrl", AttributeDefault::None),
  flag("combineCssEnabled", true),
  flag("combineJsEnabled", true),
  flag("minifyCssEnabled", true),
  flag("minifyJsEnabled", true),
  string(
    "cssReturnTemplate",
    AttributeDefault::Text(r#"<link rel="stylesheet" href="%s">"#),
  ),
  string(
    "jsReturnTemplate",
    AttributeDefault::Text(r#"<script src="%s"></script>"#),
  ),
  string("returnType", AttributeDefault::Text("url")),
  flag("cssPrependUrlEnabled", true),
  string("cssPrependUrl", AttributeDefault::Text("")),
];

/// Look up the schema entry for an attribute name.
pub fn attribute_definition(name: &str) -> Option<&'static AttributeDefinition> {
  ATTRIBUTES.iter().find(|definition| definition.name == name)
}

/// Declared string default for an attribute, or `""` when none is declared.
pub fn default_text(name: &str) -> &'static str {
  match attribute_definition(name).map(|definition| definition.default) {
    Some(AttributeDefault::Text(value)) => value,
    _ => "",
  }
}

/// Declared boolean default for an attribute, or `false` when none is declared.
pub fn default_flag(name: &str) -> bool {
  matches!(
    attribute_definition(name).map(|definition| definition.default),
    Some(AttributeDefault::Flag(true))
  )
}

/// Names of every boolean attribute.
pub fn boolean_attributes() -> impl Iterator<Item = &'static str> {
  ATTRIBUTES
    .iter()
    .filter(|definition| definition.kind == AttributeKind::Bool)
    .map(|definition| definition.name)
}
