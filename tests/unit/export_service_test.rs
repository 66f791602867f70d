//! Unit tests for PNG/SVG file export.

use qrgen::services::export_service::ExportService;
use qrgen::services::qr_encoder::{QrEncoder, QrEncoderTrait};
use qrgen::types::render::RenderOptions;
use qrgen::types::settings::ExportSettings;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_export_png_writes_default_name() {
    let dir = TempDir::new().unwrap();
    let image = QrEncoder::new()
        .render("https://example.com", &RenderOptions::default())
        .unwrap();

    let path = ExportService::new(ExportSettings::default())
        .export_png(&image, Some(dir.path()))
        .unwrap();

    assert_eq!(path, dir.path().join("qrcode.png"));
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_export_svg_writes_default_name() {
    let dir = TempDir::new().unwrap();
    let document = QrEncoder::new()
        .render_vector("https://example.com", &RenderOptions::default())
        .unwrap();

    let path = ExportService::new(ExportSettings::default())
        .export_svg(&document, Some(dir.path()))
        .unwrap();

    assert_eq!(path, dir.path().join("qrcode.svg"));
    let markup = std::fs::read_to_string(&path).unwrap();
    assert!(markup.contains("<svg"));
}

#[test]
fn test_export_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let service = ExportService::new(ExportSettings::default());
    let encoder = QrEncoder::new();

    let first = encoder.render("first", &RenderOptions::default()).unwrap();
    let second = encoder
        .render(
            "second",
            &RenderOptions {
                width: 512,
                ..Default::default()
            },
        )
        .unwrap();

    service.export_png(&first, Some(dir.path())).unwrap();
    let path = service.export_png(&second, Some(dir.path())).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), second.to_png().unwrap());
}

#[test]
fn test_output_dir_resolution_order() {
    let configured = ExportService::new(ExportSettings {
        output_dir: Some("/tmp/qrgen-out".to_string()),
        ..Default::default()
    });
    assert_eq!(configured.output_dir(None), PathBuf::from("/tmp/qrgen-out"));
    assert_eq!(
        configured.output_dir(Some(Path::new("/explicit"))),
        PathBuf::from("/explicit")
    );

    let unconfigured = ExportService::new(ExportSettings::default());
    assert_eq!(unconfigured.output_dir(None), PathBuf::from("."));
}

#[test]
fn test_custom_names_and_nested_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let service = ExportService::new(ExportSettings {
        png_filename: "wifi.png".to_string(),
        svg_filename: "wifi.svg".to_string(),
        output_dir: Some(nested.to_string_lossy().to_string()),
    });
    let image = QrEncoder::new()
        .render("WIFI:S:Home;T:WPA;P:pw;;", &RenderOptions::default())
        .unwrap();

    let path = service.export_png(&image, None).unwrap();
    assert_eq!(path, nested.join("wifi.png"));
    assert!(path.exists());
}
