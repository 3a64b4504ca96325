// Application settings
// Loaded from ~/.config/tabforge/settings.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::keys::{get_api_key, KeySource};

/// Model flow settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelSettings {
    /// Provider name, used for key lookup (TABFORGE_<PROVIDER>_KEY)
    pub provider: String,

    /// Base URL of the hosted flow server
    pub endpoint: String,

    /// Field delimiter hint forwarded with uploads, if set
    pub delimiter: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: "hosted".to_string(),
            endpoint: "http://localhost:3400".to_string(),
            delimiter: None,
        }
    }
}

/// Table/reconciler settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableSettings {
    /// Fixed header list. Empty = free-form union of observed keys.
    pub fixed_headers: Vec<String>,

    /// Title printed on exports
    pub export_title: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            fixed_headers: Vec::new(),
            export_title: "Action Plan".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub model: ModelSettings,
    pub table: TableSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tabforge");
        config_dir.join("settings.toml")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path (tests, --config overrides)
    pub fn load_from(path: &PathBuf) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Error parsing {}: {}", path.display(), e);
                    eprintln!("Using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    /// Save to an explicit path (tests, --config overrides)
    pub fn save_to(&self, path: &PathBuf) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let text = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, text).map_err(|e| e.to_string())
    }

    /// Fixed header list, or None when the free-form union applies
    pub fn fixed_headers(&self) -> Option<Vec<String>> {
        if self.table.fixed_headers.is_empty() {
            None
        } else {
            Some(self.table.fixed_headers.clone())
        }
    }
}

// ============================================================================
// Diagnostics (for CLI doctor and debugging)
// ============================================================================

/// Diagnostic information about the resolved configuration
#[derive(Debug)]
pub struct Diagnostics {
    pub provider: String,
    pub endpoint: String,
    pub key_present: bool,
    pub key_source: KeySource,
    pub fixed_schema: bool,
    pub export_title: String,
    pub config_path: String,
}

impl Diagnostics {
    pub fn from_settings(settings: &Settings) -> Self {
        let lookup = get_api_key(&settings.model.provider);
        Self {
            provider: settings.model.provider.clone(),
            endpoint: settings.model.endpoint.clone(),
            key_present: lookup.key.is_some(),
            key_source: lookup.source,
            fixed_schema: !settings.table.fixed_headers.is_empty(),
            export_title: settings.table.export_title.clone(),
            config_path: Settings::config_path().to_string_lossy().to_string(),
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TabForge Configuration")?;
        writeln!(f, "──────────────────────────────")?;
        writeln!(f, "Config file:   {}", self.config_path)?;
        writeln!(f, "Provider:      {}", self.provider)?;
        writeln!(f, "Endpoint:      {}", self.endpoint)?;
        writeln!(f, "Key present:   {}", if self.key_present { "yes" } else { "no" })?;
        writeln!(f, "Key source:    {}", self.key_source.as_str())?;
        writeln!(f, "Header schema: {}", if self.fixed_schema { "fixed" } else { "observed" })?;
        writeln!(f, "Export title:  {}", self.export_title)?;
        Ok(())
    }
}
