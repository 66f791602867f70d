//! Unit tests for error types: Display messages and conversions.

use qrgen::types::errors::*;

#[test]
fn test_encode_error_display() {
    assert_eq!(
        EncodeError::EmptyPayload.to_string(),
        "Cannot encode an empty payload"
    );
    assert_eq!(
        EncodeError::DataTooLong(3000).to_string(),
        "Payload too long for QR code: 3000 bytes"
    );
    assert_eq!(
        EncodeError::InvalidOptions("invalid color: red".into()).to_string(),
        "Invalid render options: invalid color: red"
    );
}

#[test]
fn test_generate_error_display() {
    assert_eq!(
        GenerateError::MissingInput.to_string(),
        "Please enter the required information"
    );
    // Encoding failures are reported with the encoder's own message.
    let err: GenerateError = EncodeError::DataTooLong(10).into();
    assert_eq!(err.to_string(), "Payload too long for QR code: 10 bytes");
}

#[test]
fn test_history_error_conversions() {
    let err: HistoryError = StorageError::DatabaseError("disk full".into()).into();
    assert!(matches!(err, HistoryError::Storage(_)));
    assert_eq!(
        err.to_string(),
        "History storage error: Storage database error: disk full"
    );

    let err: HistoryError = EncodeError::EmptyPayload.into();
    assert!(matches!(err, HistoryError::Thumbnail(_)));
}

#[test]
fn test_export_and_clipboard_display() {
    assert_eq!(
        ExportError::NothingToExport.to_string(),
        "Nothing to export: generate a QR code first"
    );
    assert_eq!(
        ExportError::FileSystemError("denied".into()).to_string(),
        "Export file system error: denied"
    );
    assert_eq!(
        ClipboardError::Unavailable("no clipboard tool found".into()).to_string(),
        "Clipboard unavailable: no clipboard tool found"
    );
    assert_eq!(
        ClipboardError::NothingToCopy.to_string(),
        "Nothing to copy: generate a QR code first"
    );
}

#[test]
fn test_settings_error_display() {
    assert_eq!(
        SettingsError::InvalidKey("render.size".into()).to_string(),
        "Invalid settings key: render.size"
    );
    assert_eq!(
        SettingsError::IoError("boom".into()).to_string(),
        "Settings I/O error: boom"
    );
}

#[test]
fn test_errors_are_std_errors() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&EncodeError::EmptyPayload);
    assert_error(&GenerateError::MissingInput);
    assert_error(&ExportError::NothingToExport);
    assert_error(&ClipboardError::NothingToCopy);
    assert_error(&SettingsError::InvalidKey(String::new()));
}
