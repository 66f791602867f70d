// QRGen services
// Services provide core functionality: payload formatting, QR rendering, export, clipboard, settings.

pub mod clipboard_service;
pub mod export_service;
pub mod payload_formatter;
pub mod qr_encoder;
pub mod settings_engine;
