//! Clipboard Service for QRGen.
//!
//! Copies the rendered QR code as an image item. When the platform refuses
//! image content, the PNG is copied as a `data:` URI in plain text instead and
//! the caller is told so.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::platform::{self, ClipboardCommand};
use crate::types::errors::ClipboardError;
use crate::types::render::RasterImage;

/// Trait defining clipboard write operations.
pub trait ClipboardTrait {
    fn write_image_png(&self, png: &[u8]) -> Result<(), ClipboardError>;
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// How the image ended up on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Image,
    /// The image item was rejected; its data URI was copied as text.
    DataUriFallback,
}

/// Copies `image`, falling back to its data URI as text.
pub fn copy_with_fallback(
    clipboard: &dyn ClipboardTrait,
    image: &RasterImage,
) -> Result<CopyOutcome, ClipboardError> {
    let png = image.to_png()?;
    match clipboard.write_image_png(&png) {
        Ok(()) => Ok(CopyOutcome::Image),
        Err(e) => {
            warn!(error = %e, "image copy rejected, copying data URI as text");
            clipboard.write_text(&image.to_data_uri()?)?;
            Ok(CopyOutcome::DataUriFallback)
        }
    }
}

/// Clipboard backed by the platform's command-line clipboard tools.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    /// Runs the first available command. A missing program moves on to the
    /// next candidate; a program that fails is a rejection.
    fn run_first(commands: &[ClipboardCommand], stdin_data: &[u8]) -> Result<(), ClipboardError> {
        for cmd in commands {
            let mut process = Command::new(cmd.program);
            process
                .args(&cmd.args)
                .stdin(if cmd.reads_stdin { Stdio::piped() } else { Stdio::null() })
                .stdout(Stdio::null())
                .stderr(Stdio::piped());

            let mut child = match process.spawn() {
                Ok(child) => child,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(program = cmd.program, "clipboard tool not installed");
                    continue;
                }
                Err(e) => return Err(ClipboardError::Rejected(e.to_string())),
            };

            if cmd.reads_stdin {
                if let Some(mut stdin) = child.stdin.take() {
                    stdin
                        .write_all(stdin_data)
                        .map_err(|e| ClipboardError::Rejected(e.to_string()))?;
                }
            }

            let output = child
                .wait_with_output()
                .map_err(|e| ClipboardError::Rejected(e.to_string()))?;
            if output.status.success() {
                return Ok(());
            }
            return Err(ClipboardError::Rejected(format!(
                "{} exited with {}: {}",
                cmd.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Err(ClipboardError::Unavailable(
            "no clipboard tool found on this system".to_string(),
        ))
    }
}

impl ClipboardTrait for SystemClipboard {
    fn write_image_png(&self, png: &[u8]) -> Result<(), ClipboardError> {
        let mut file = tempfile::Builder::new()
            .prefix("qrgen-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        file.write_all(png)
            .and_then(|_| file.flush())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        Self::run_first(&platform::image_copy_commands(file.path()), png)
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        Self::run_first(&platform::text_copy_commands(), text.as_bytes())
    }
}
