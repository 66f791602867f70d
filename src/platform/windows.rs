// QRGen platform support for Windows
// Config: %APPDATA%/QRGen
// Data:   %APPDATA%/QRGen
// Clipboard: PowerShell for images, clip.exe for text

use std::env;
use std::path::{Path, PathBuf};

use super::ClipboardCommand;

/// `%APPDATA%/QRGen`
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("QRGen")
}

/// `%APPDATA%/QRGen`
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

pub fn image_copy_commands(png_path: &Path) -> Vec<ClipboardCommand> {
    let script = format!(
        "Add-Type -AssemblyName System.Windows.Forms; Add-Type -AssemblyName System.Drawing; \
         [System.Windows.Forms.Clipboard]::SetImage([System.Drawing.Image]::FromFile('{}'))",
        png_path.to_string_lossy().replace('\'', "''")
    );
    vec![ClipboardCommand::new(
        "powershell",
        &["-NoProfile", "-STA", "-Command", script.as_str()],
        false,
    )]
}

pub fn text_copy_commands() -> Vec<ClipboardCommand> {
    vec![ClipboardCommand::new("clip", &[], true)]
}
