// QRGen platform support for macOS
// Config: ~/Library/Application Support/QRGen
// Data:   ~/Library/Application Support/QRGen
// Clipboard: osascript for images, pbcopy for text

use std::env;
use std::path::{Path, PathBuf};

use super::ClipboardCommand;

/// Returns the home directory on macOS.
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Application Support/QRGen`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("QRGen")
}

/// `~/Library/Application Support/QRGen`
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

pub fn image_copy_commands(png_path: &Path) -> Vec<ClipboardCommand> {
    let script = format!(
        "set the clipboard to (read (POSIX file \"{}\") as «class PNGf»)",
        png_path.to_string_lossy()
    );
    vec![ClipboardCommand::new("osascript", &["-e", script.as_str()], false)]
}

pub fn text_copy_commands() -> Vec<ClipboardCommand> {
    vec![ClipboardCommand::new("pbcopy", &[], true)]
}
