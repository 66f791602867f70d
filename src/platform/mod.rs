// QRGen platform abstraction
// Provides platform-specific paths and clipboard tool invocations for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::{Path, PathBuf};

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as current;

#[cfg(target_os = "macos")]
use macos as current;

#[cfg(target_os = "windows")]
use windows as current;

/// An external program that writes to the system clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: &'static str,
    pub args: Vec<String>,
    /// Content is piped to stdin; otherwise it is referenced by path in `args`.
    pub reads_stdin: bool,
}

impl ClipboardCommand {
    pub fn new(program: &'static str, args: &[&str], reads_stdin: bool) -> Self {
        Self {
            program,
            args: args.iter().map(|a| a.to_string()).collect(),
            reads_stdin,
        }
    }
}

/// Returns the platform-specific configuration directory for QRGen.
///
/// - **Linux**: `~/.config/qrgen` (or `$XDG_CONFIG_HOME/qrgen`)
/// - **macOS**: `~/Library/Application Support/QRGen`
/// - **Windows**: `%APPDATA%/QRGen`
pub fn get_config_dir() -> PathBuf {
    current::get_config_dir()
}

/// Returns the platform-specific data directory for QRGen.
///
/// - **Linux**: `~/.local/share/qrgen` (or `$XDG_DATA_HOME/qrgen`)
/// - **macOS**: `~/Library/Application Support/QRGen`
/// - **Windows**: `%APPDATA%/QRGen`
pub fn get_data_dir() -> PathBuf {
    current::get_data_dir()
}

/// Clipboard tools able to take a PNG file, in order of preference.
pub fn image_copy_commands(png_path: &Path) -> Vec<ClipboardCommand> {
    current::image_copy_commands(png_path)
}

/// Clipboard tools that take plain text on stdin, in order of preference.
pub fn text_copy_commands() -> Vec<ClipboardCommand> {
    current::text_copy_commands()
}
