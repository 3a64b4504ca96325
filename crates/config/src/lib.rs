//! `tabforge-config` — settings file and API-key resolution.
//!
//! Keys are never stored in settings.toml: the system keychain (behind the
//! `keychain` feature) and `TABFORGE_<PROVIDER>_KEY` environment variables
//! are the only sources.

pub mod keys;
pub mod settings;

pub use keys::{get_api_key, set_api_key, KeyLookup, KeySource};
pub use settings::{Diagnostics, ModelSettings, Settings, TableSettings};
