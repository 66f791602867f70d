//! QR Encoding Adapter for QRGen.
//!
//! Thin, stateless wrapper around the `qrcode` crate. Raster output is painted
//! from the module matrix so the image is exactly the requested width with a
//! configurable quiet-zone margin; vector output uses the crate's SVG renderer.

use image::{Rgba, RgbaImage};
use qrcode::render::svg;
use qrcode::types::QrError;
use qrcode::{Color as ModuleColor, QrCode};
use tracing::debug;

use crate::types::errors::EncodeError;
use crate::types::render::{
    parse_hex_color, ErrorCorrectionLevel, RasterImage, RenderOptions, VectorDocument,
};

/// Quiet-zone width, in modules, around full-size renders.
pub const DEFAULT_MARGIN: u32 = 4;
/// Pixels per module when the requested width cannot fit one pixel per module.
pub const FALLBACK_SCALE: u32 = 4;
/// Edge length of history thumbnails.
pub const THUMBNAIL_SIZE: u32 = 50;
pub const THUMBNAIL_MARGIN: u32 = 1;

const BLACK: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
const WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Trait defining the QR rendering operations.
pub trait QrEncoderTrait {
    fn render(&self, payload: &str, options: &RenderOptions) -> Result<RasterImage, EncodeError>;
    fn render_vector(
        &self,
        payload: &str,
        options: &RenderOptions,
    ) -> Result<VectorDocument, EncodeError>;
    fn render_thumbnail(&self, payload: &str) -> Result<RasterImage, EncodeError>;
}

/// QR encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl QrEncoder {
    pub fn new() -> Self {
        Self
    }

    fn encode(payload: &str, level: ErrorCorrectionLevel) -> Result<QrCode, EncodeError> {
        if payload.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }
        QrCode::with_error_correction_level(payload.as_bytes(), level.to_qrcode()).map_err(|e| {
            match e {
                QrError::DataTooLong => EncodeError::DataTooLong(payload.len()),
                other => EncodeError::Unsupported(other.to_string()),
            }
        })
    }

    /// Edge length for a full-size render: the requested width, or
    /// `FALLBACK_SCALE` pixels per module when the width cannot hold the symbol.
    fn raster_size(code: &QrCode, width: u32, margin: u32) -> u32 {
        let total = code.width() as u32 + margin * 2;
        if width >= total {
            width
        } else {
            total * FALLBACK_SCALE
        }
    }

    /// Paints the module matrix onto a `size` x `size` bitmap.
    ///
    /// Each output pixel maps back to a module through a fractional scale of
    /// `size / (modules + 2 * margin)`. Below one pixel per module the modules
    /// are sampled.
    fn rasterize(
        code: &QrCode,
        size: u32,
        margin: u32,
        dark: [u8; 4],
        light: [u8; 4],
    ) -> RasterImage {
        let modules = code.width();
        let colors = code.to_colors();
        let total = modules as u32 + margin * 2;

        let scale = f64::from(size) / f64::from(total);
        let offset = f64::from(margin) * scale;
        let limit = f64::from(size) - offset;

        let pixels = RgbaImage::from_fn(size, size, |x, y| {
            let (px, py) = (f64::from(x), f64::from(y));
            if px < offset || py < offset || px >= limit || py >= limit {
                return Rgba(light);
            }
            let mx = ((px - offset) / scale) as usize;
            let my = ((py - offset) / scale) as usize;
            if mx < modules && my < modules && colors[my * modules + mx] == ModuleColor::Dark {
                Rgba(dark)
            } else {
                Rgba(light)
            }
        });

        RasterImage::new(pixels)
    }
}

impl QrEncoderTrait for QrEncoder {
    fn render(&self, payload: &str, options: &RenderOptions) -> Result<RasterImage, EncodeError> {
        options.validate()?;
        let dark = parse_hex_color(&options.dark)?;
        let light = parse_hex_color(&options.light)?;
        let code = Self::encode(payload, options.error_correction)?;
        debug!(
            version = ?code.version(),
            width = options.width,
            "rendering raster QR code"
        );
        let size = Self::raster_size(&code, options.width, DEFAULT_MARGIN);
        Ok(Self::rasterize(&code, size, DEFAULT_MARGIN, dark, light))
    }

    fn render_vector(
        &self,
        payload: &str,
        options: &RenderOptions,
    ) -> Result<VectorDocument, EncodeError> {
        options.validate()?;
        let code = Self::encode(payload, options.error_correction)?;
        let markup = code
            .render::<svg::Color<'_>>()
            .min_dimensions(options.width, options.width)
            .dark_color(svg::Color(&options.dark))
            .light_color(svg::Color(&options.light))
            .build();
        debug!(bytes = markup.len(), "rendered vector QR code");
        Ok(VectorDocument::new(markup))
    }

    /// Renders a 50x50 black-on-white preview, independent of session options.
    ///
    /// Encodes at `M`, dropping to `L` for payloads only `L` can hold.
    fn render_thumbnail(&self, payload: &str) -> Result<RasterImage, EncodeError> {
        let code = match Self::encode(payload, ErrorCorrectionLevel::M) {
            Err(EncodeError::DataTooLong(_)) => Self::encode(payload, ErrorCorrectionLevel::L)?,
            other => other?,
        };
        Ok(Self::rasterize(
            &code,
            THUMBNAIL_SIZE,
            THUMBNAIL_MARGIN,
            BLACK,
            WHITE,
        ))
    }
}
