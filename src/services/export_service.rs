//! Export Service for QRGen.
//!
//! Writes the active QR code to disk as `qrcode.png` (raster) or `qrcode.svg`
//! (vector). Existing files with the same name are overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::types::errors::ExportError;
use crate::types::render::{RasterImage, VectorDocument};
use crate::types::settings::ExportSettings;

/// File exporter configured with target names and directory.
pub struct ExportService {
    settings: ExportSettings,
}

impl ExportService {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    /// Resolves the output directory: the explicit argument, then the
    /// configured directory, then the current directory.
    pub fn output_dir(&self, dir: Option<&Path>) -> PathBuf {
        dir.map(Path::to_path_buf)
            .or_else(|| self.settings.output_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn export_png(&self, image: &RasterImage, dir: Option<&Path>) -> Result<PathBuf, ExportError> {
        let bytes = image.to_png()?;
        let path = self.output_dir(dir).join(&self.settings.png_filename);
        Self::write(&path, &bytes)?;
        Ok(path)
    }

    pub fn export_svg(
        &self,
        document: &VectorDocument,
        dir: Option<&Path>,
    ) -> Result<PathBuf, ExportError> {
        let path = self.output_dir(dir).join(&self.settings.svg_filename);
        Self::write(&path, document.as_str().as_bytes())?;
        Ok(path)
    }

    fn write(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ExportError::FileSystemError(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(path, bytes)
            .map_err(|e| ExportError::FileSystemError(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), bytes = bytes.len(), "exported QR code");
        Ok(())
    }
}
