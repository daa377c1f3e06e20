#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod attributes;
pub mod coercion;
pub mod config;
pub mod environment;
pub mod loader;
pub mod models;
pub mod paths;
pub mod resolver;

pub use attributes::{
  ATTRIBUTES, AttributeDefault, AttributeDefinition, AttributeKind, attribute_definition,
};
pub use coercion::{is_truthy, normalize};
pub use config::ResolverConfig;
pub use environment::{
  DocumentRootProvider, EnvironmentStringExpander, EnvironmentVariables, IdentityExpander,
  ServerDocumentRoot, SiteBaseUrlProvider, StaticDocumentRoot, StaticSiteUrl,
};
pub use loader::{SettingsLoadError, load_raw_settings};
pub use models::{
  AssetKind, AttributeValue, RawSettings, ResolvedSettings, SettingField, Settings, UnknownField,
};
pub use paths::force_trailing_slash;
pub use resolver::{CACHE_PAIR_MESSAGE, SettingsResolver, ValidationError};
