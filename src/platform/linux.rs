// QRGen platform support for Linux
// Config: ~/.config/qrgen
// Data:   ~/.local/share/qrgen
// Clipboard: wl-copy on Wayland, xclip on X11

use std::env;
use std::path::{Path, PathBuf};

use super::ClipboardCommand;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Resolves an XDG base directory: `$VAR/qrgen` if set, otherwise `~/<fallback>/qrgen`.
fn xdg_dir(xdg: Option<String>, home: &Path, fallback: &[&str]) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir).join("qrgen"),
        None => fallback
            .iter()
            .fold(home.to_path_buf(), |path, part| path.join(part))
            .join("qrgen"),
    }
}

/// Returns the configuration directory for QRGen on Linux.
pub fn get_config_dir() -> PathBuf {
    xdg_dir(env::var("XDG_CONFIG_HOME").ok(), &home_dir(), &[".config"])
}

/// Returns the data directory for QRGen on Linux.
pub fn get_data_dir() -> PathBuf {
    xdg_dir(env::var("XDG_DATA_HOME").ok(), &home_dir(), &[".local", "share"])
}

fn is_wayland() -> bool {
    env::var_os("WAYLAND_DISPLAY").is_some()
}

pub fn image_copy_commands(png_path: &Path) -> Vec<ClipboardCommand> {
    let path = png_path.to_string_lossy().into_owned();
    let wayland = ClipboardCommand::new("wl-copy", &["--type", "image/png"], true);
    let x11 = ClipboardCommand::new(
        "xclip",
        &["-selection", "clipboard", "-t", "image/png", "-i", path.as_str()],
        false,
    );
    if is_wayland() {
        vec![wayland, x11]
    } else {
        vec![x11, wayland]
    }
}

pub fn text_copy_commands() -> Vec<ClipboardCommand> {
    let wayland = ClipboardCommand::new("wl-copy", &[], true);
    let x11 = ClipboardCommand::new("xclip", &["-selection", "clipboard"], true);
    if is_wayland() {
        vec![wayland, x11]
    } else {
        vec![x11, wayland]
    }
}
