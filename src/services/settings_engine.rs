// QRGen Settings Engine
// Manages user settings: loading, saving, updating individual values, and resetting to defaults.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::QrSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<QrSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &QrSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: QrSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: QrSettings::default(),
        }
    }

    fn validate(settings: &QrSettings) -> Result<(), SettingsError> {
        settings
            .render
            .validate()
            .map_err(|e| SettingsError::InvalidValue(e.to_string()))?;
        if settings.export.png_filename.trim().is_empty()
            || settings.export.svg_filename.trim().is_empty()
        {
            return Err(SettingsError::InvalidValue(
                "export file names cannot be empty".to_string(),
            ));
        }
        if settings.history.storage_key.is_empty() {
            return Err(SettingsError::InvalidValue(
                "history storage key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Replaces the leaf at dot-separated `key` inside `root`.
///
/// Only existing keys can be replaced; new keys are never created.
fn replace_at_path(
    root: &mut serde_json::Value,
    key: &str,
    value: serde_json::Value,
) -> Result<(), SettingsError> {
    let unknown = || SettingsError::InvalidKey(format!("unknown settings key '{}'", key));
    let parts: Vec<&str> = key.split('.').collect();
    let (leaf, sections) = parts.split_last().ok_or_else(unknown)?;

    let mut node = root;
    for section in sections {
        node = node.get_mut(*section).ok_or_else(unknown)?;
    }
    let slot = node
        .as_object_mut()
        .and_then(|map| map.get_mut(*leaf))
        .ok_or_else(unknown)?;
    *slot = value;
    Ok(())
}

impl SettingsEngineTrait for SettingsEngine {
    /// Reads `settings.json`. A missing file yields defaults.
    ///
    /// A malformed or invalid file is an error and leaves the in-memory
    /// settings as they were.
    fn load(&mut self) -> Result<QrSettings, SettingsError> {
        let path = Path::new(&self.config_path);
        if !path.exists() {
            self.settings = QrSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("reading {}: {}", self.config_path, e)))?;
        let settings: QrSettings = serde_json::from_str(&content)
            .map_err(|e| SettingsError::SerializationError(format!("parsing {}: {}", self.config_path, e)))?;
        Self::validate(&settings)?;

        debug!(path = %self.config_path, "loaded settings");
        self.settings = settings;
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| SettingsError::IoError(format!("creating {}: {}", dir.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("writing {}: {}", self.config_path, e)))
    }

    fn get_settings(&self) -> &QrSettings {
        &self.settings
    }

    /// Updates one setting by dot key (`render.width`, `export.output_dir`,
    /// `payload.escape_wifi_fields`, ...), validates the result and saves it.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("empty key".to_string()));
        }

        let mut tree = serde_json::to_value(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        replace_at_path(&mut tree, key, value)?;

        let updated: QrSettings = serde_json::from_value(tree)
            .map_err(|e| SettingsError::InvalidValue(format!("{}: {}", key, e)))?;
        Self::validate(&updated)?;

        self.settings = updated;
        self.save()?;
        debug!(key, "updated setting");
        Ok(())
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = QrSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
