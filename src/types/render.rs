use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use super::errors::EncodeError;

pub const MIN_WIDTH: u32 = 32;
pub const MAX_WIDTH: u32 = 4096;

/// QR error-correction level, from lowest (L, ~7%) to highest (H, ~30%) recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ErrorCorrectionLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl ErrorCorrectionLevel {
    pub fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrectionLevel::L => qrcode::EcLevel::L,
            ErrorCorrectionLevel::M => qrcode::EcLevel::M,
            ErrorCorrectionLevel::Q => qrcode::EcLevel::Q,
            ErrorCorrectionLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// Per-render configuration consumed by the encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub width: u32,
    pub dark: String,
    pub light: String,
    pub error_correction: ErrorCorrectionLevel,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 256,
            dark: "#000000".to_string(),
            light: "#ffffff".to_string(),
            error_correction: ErrorCorrectionLevel::M,
        }
    }
}

impl RenderOptions {
    /// Checks width bounds and color syntax.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.width) {
            return Err(EncodeError::InvalidOptions(format!(
                "width {} outside {}..={}",
                self.width, MIN_WIDTH, MAX_WIDTH
            )));
        }
        parse_hex_color(&self.dark)?;
        parse_hex_color(&self.light)?;
        Ok(())
    }
}

/// Partial update of [`RenderOptions`]; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptionsPatch {
    pub width: Option<u32>,
    pub dark: Option<String>,
    pub light: Option<String>,
    pub error_correction: Option<ErrorCorrectionLevel>,
}

impl RenderOptionsPatch {
    pub fn apply_to(&self, options: &RenderOptions) -> RenderOptions {
        RenderOptions {
            width: self.width.unwrap_or(options.width),
            dark: self.dark.clone().unwrap_or_else(|| options.dark.clone()),
            light: self.light.clone().unwrap_or_else(|| options.light.clone()),
            error_correction: self.error_correction.unwrap_or(options.error_correction),
        }
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` into RGBA bytes.
pub fn parse_hex_color(color: &str) -> Result<[u8; 4], EncodeError> {
    let invalid = || EncodeError::InvalidOptions(format!("invalid color: {}", color));
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return Err(invalid()),
    };

    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if expanded.len() == 8 { byte(6)? } else { 0xff };
    Ok([byte(0)?, byte(2)?, byte(4)?, alpha])
}

/// A rendered QR code bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Encodes the bitmap as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, EncodeError> {
        let mut png_bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| EncodeError::Image(e.to_string()))?;
        Ok(png_bytes)
    }

    /// Returns the PNG as a `data:image/png;base64,...` URI.
    pub fn to_data_uri(&self) -> Result<String, EncodeError> {
        let png = self.to_png()?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
    }
}

/// SVG markup of a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument {
    svg: String,
}

impl VectorDocument {
    pub fn new(svg: String) -> Self {
        Self { svg }
    }

    pub fn as_str(&self) -> &str {
        &self.svg
    }

    pub fn into_string(self) -> String {
        self.svg
    }
}
