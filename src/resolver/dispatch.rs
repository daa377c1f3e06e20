//! Single read entry point for callers that address attributes by field or name.

use super::SettingsResolver;
use crate::models::{AttributeValue, SettingField};

impl SettingsResolver {
  /// Effective value of `field`, read through the same accessor a direct call would use.
  pub fn attribute(&self, field: SettingField) -> AttributeValue {
    match field {
      SettingField::BaseUrl => self.base_url().into(),
      SettingField::CachePath => self.cache_path().into(),
      SettingField::CacheUrl => self.cache_url().into(),
      SettingField::CssReturnTemplate => self.css_return_template().into(),
      SettingField::CssPrependUrl => self.css_prepend_url().into(),
      SettingField::FilesystemPath => self.filesystem_path().into(),
      SettingField::JsReturnTemplate => self.js_return_template().into(),
      SettingField::ReturnType => self.return_type().into(),
      SettingField::Enabled => self.enabled().into(),
      SettingField::CombineCssEnabled => self.combine_css_enabled().into(),
      SettingField::CombineJsEnabled => self.combine_js_enabled().into(),
      SettingField::MinifyCssEnabled => self.minify_css_enabled().into(),
      SettingField::MinifyJsEnabled => self.minify_js_enabled().into(),
      SettingField::CssPrependUrlEnabled => self.css_prepend_url_enabled().into(),
    }
  }

  /// Name-based form of [`Self::attribute`].
  ///
  /// Names outside the schema read the stored value unchanged; `None` means the name is
  /// neither known nor stored.
  pub fn attribute_by_name(&self, name: &str) -> Option<AttributeValue> {
    match name.parse::<SettingField>() {
      Ok(field) => Some(self.attribute(field)),
      Err(_) => self.raw.get(name).cloned().map(AttributeValue::Raw),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::super::tests::resolver;
  use super::*;
  use serde_json::json;

  fn direct(resolver: &SettingsResolver, field: SettingField) -> AttributeValue {
    match field {
      SettingField::BaseUrl => AttributeValue::Text(resolver.base_url()),
      SettingField::CachePath => resolver.cache_path().into(),
      SettingField::CacheUrl => resolver.cache_url().into(),
      SettingField::CssReturnTemplate => AttributeValue::Text(resolver.css_return_template()),
      SettingField::CssPrependUrl => resolver.css_prepend_url().into(),
      SettingField::FilesystemPath => AttributeValue::Text(resolver.filesystem_path()),
      SettingField::JsReturnTemplate => AttributeValue::Text(resolver.js_return_template()),
      SettingField::ReturnType => AttributeValue::Text(resolver.return_type()),
      other => AttributeValue::Flag(resolver.settings().stored_flag(other).unwrap()),
    }
  }

  #[test]
  fn reads_match_direct_accessors_in_every_state() {
    let states = [
      json!({}),
      json!({
        "cachePath": "", "cacheUrl": "", "filesystemPath": "", "baseUrl": "",
        "cssPrependUrl": "", "cssReturnTemplate": "", "jsReturnTemplate": "", "returnType": "",
      }),
      json!({
        "cachePath": "/c", "cacheUrl": "https://c.example.com", "filesystemPath": "/f//",
        "baseUrl": "https://b.example.com/", "cssPrependUrl": "/p",
        "cssReturnTemplate": "<style>%s</style>", "jsReturnTemplate": "%s",
        "returnType": "contents", "enabled": "0", "minifyCssEnabled": 0,
      }),
    ];

    for state in states {
      let resolver = resolver(state);
      for field in SettingField::ALL {
        assert_eq!(resolver.attribute(field), direct(&resolver, field), "{field}");
        assert_eq!(
          resolver.attribute_by_name(field.name()),
          Some(direct(&resolver, field)),
          "{field}"
        );
      }
    }
  }

  #[test]
  fn unknown_names_read_raw_storage() {
    let resolver = resolver(json!({ "legacyOption": "1" }));
    assert_eq!(
      resolver.attribute_by_name("legacyOption"),
      Some(AttributeValue::Raw(json!("1")))
    );
    assert_eq!(resolver.attribute_by_name("missing"), None);
  }

  #[test]
  fn absent_cache_reads_as_absent() {
    let resolver = resolver(json!({ "cachePath": "" }));
    assert!(resolver.attribute(SettingField::CachePath).is_absent());
    assert_eq!(
      resolver
        .attribute(SettingField::FilesystemPath)
        .as_text(),
      Some("/srv/www/")
    );
  }
}
