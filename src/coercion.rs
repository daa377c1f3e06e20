//! Boolean coercion applied to raw settings before anything else reads them.

use serde_json::Value;

use crate::attributes::{boolean_attributes, default_flag};
use crate::models::RawSettings;

/// Conventional truthiness for loosely typed raw values.
///
/// `false`, `null`, numeric zero, the empty string, the string `"0"` and empty
/// arrays/objects are false. Everything else is true.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(flag) => *flag,
    Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
    Value::String(text) => is_truthy_str(text),
    Value::Array(items) => !items.is_empty(),
    Value::Object(map) => !map.is_empty(),
  }
}

/// String form of [`is_truthy`].
pub fn is_truthy_str(text: &str) -> bool {
  !text.is_empty() && text != "0"
}

/// Return a copy of `raw` with every boolean attribute coerced to a real boolean.
///
/// Keys that are not boolean attributes are passed through untouched. A boolean attribute
/// missing from the mapping takes its declared default.
pub fn normalize(raw: &RawSettings) -> RawSettings {
  let mut normalized = raw.clone();
  for name in boolean_attributes() {
    let flag = match raw.get(name) {
      Some(value) => is_truthy(value),
      None => default_flag(name),
    };
    normalized.insert(name.to_string(), Value::Bool(flag));
  }
  normalized
}
