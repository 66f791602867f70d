use thiserror::Error;

// === EncodeError ===

/// Errors raised while turning a payload into a QR image.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EncodeError {
    /// Nothing to encode.
    #[error("Cannot encode an empty payload")]
    EmptyPayload,
    /// Payload exceeds the symbol capacity for the chosen error-correction level.
    #[error("Payload too long for QR code: {0} bytes")]
    DataTooLong(usize),
    /// The QR library rejected the payload for another reason.
    #[error("QR encoding failed: {0}")]
    Unsupported(String),
    /// Render options failed validation.
    #[error("Invalid render options: {0}")]
    InvalidOptions(String),
    /// Raster serialization failed.
    #[error("Image encoding failed: {0}")]
    Image(String),
}

// === StorageError ===

/// Errors from the durable key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("Storage database error: {0}")]
    DatabaseError(String),
}

// === HistoryError ===

/// Errors related to generation history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The thumbnail could not be rendered.
    #[error("History thumbnail error: {0}")]
    Thumbnail(#[from] EncodeError),
    /// The history could not be written to storage.
    #[error("History storage error: {0}")]
    Storage(#[from] StorageError),
    /// The history could not be serialized.
    #[error("History serialization error: {0}")]
    SerializationError(String),
}

// === GenerateError ===

/// Errors from the generate action.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerateError {
    /// A required form field is empty.
    #[error("Please enter the required information")]
    MissingInput,
    /// The payload could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

// === ExportError ===

/// Errors from PNG/SVG file export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No QR code has been generated yet.
    #[error("Nothing to export: generate a QR code first")]
    NothingToExport,
    /// Writing the file failed.
    #[error("Export file system error: {0}")]
    FileSystemError(String),
    /// Rendering the export artifact failed.
    #[error("Export encoding error: {0}")]
    Encode(#[from] EncodeError),
}

// === ClipboardError ===

/// Errors related to clipboard access.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard tool is available on this system.
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard tool ran but refused the content.
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
    /// No QR code has been generated yet.
    #[error("Nothing to copy: generate a QR code first")]
    NothingToCopy,
    /// The image could not be prepared for copying.
    #[error("Clipboard encoding error: {0}")]
    Encode(#[from] EncodeError),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
