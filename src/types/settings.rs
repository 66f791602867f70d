use serde::{Deserialize, Serialize};

use super::render::RenderOptions;

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QrSettings {
    /// Startup defaults for a session's render options.
    pub render: RenderOptions,
    pub export: ExportSettings,
    pub payload: PayloadSettings,
    pub history: HistorySettings,
}

/// Where and under which names exported files are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportSettings {
    pub png_filename: String,
    pub svg_filename: String,
    /// Target directory; `None` means the current working directory.
    pub output_dir: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            png_filename: "qrcode.png".to_string(),
            svg_filename: "qrcode.svg".to_string(),
            output_dir: None,
        }
    }
}

/// Payload formatting switches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PayloadSettings {
    /// Backslash-escape `\ ; , : "` inside WiFi SSID and password.
    pub escape_wifi_fields: bool,
}

/// History persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySettings {
    pub storage_key: String,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            storage_key: "qrgen-history".to_string(),
        }
    }
}
