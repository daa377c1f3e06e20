//! Path and URL normalisation shared by the resolving accessors.

/// Separator appended to resolved paths and URLs.
pub const PATH_SEPARATOR: char = '/';

/// Strip every trailing `/` from `value` and append exactly one.
///
/// The result is stable under repeated application, so accessors can apply it without
/// knowing whether the stored value was already normalised.
pub fn force_trailing_slash(value: &str) -> String {
  let mut normalised = value.trim_end_matches(PATH_SEPARATOR).to_string();
  normalised.push(PATH_SEPARATOR);
  normalised
}
