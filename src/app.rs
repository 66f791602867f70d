//! App Core for QRGen.
//!
//! The presentation controller. Owns all session state (active type, form
//! fields, render options, active QR image, history, copy feedback) and
//! orchestrates formatter → encoder → display → history for every user action.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::database::connection::Database;
use crate::database::storage::KeyValueStorage;
use crate::managers::copy_feedback::CopyFeedback;
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::services::clipboard_service::{
    copy_with_fallback, ClipboardTrait, CopyOutcome, SystemClipboard,
};
use crate::services::export_service::ExportService;
use crate::services::payload_formatter::PayloadFormatter;
use crate::services::qr_encoder::{QrEncoder, QrEncoderTrait};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{ClipboardError, EncodeError, ExportError, GenerateError, HistoryError};
use crate::types::payload::{FormFields, PayloadType};
use crate::types::render::{RasterImage, RenderOptions, RenderOptionsPatch, VectorDocument};

/// Central application struct: one instance per UI session.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub history: HistoryManager,
    pub copy_feedback: CopyFeedback,
    encoder: QrEncoder,
    clipboard: Box<dyn ClipboardTrait>,
    current_type: PayloadType,
    fields: FormFields,
    options: RenderOptions,
    current_payload: Option<String>,
    current_image: Option<RasterImage>,
}

impl App {
    /// Opens the database at `db_path`, loads settings from the platform config
    /// dir and restores history. Uses the system clipboard.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let db = Arc::new(Database::open(db_path)?);

        let mut settings_engine = SettingsEngine::new(None);
        if let Err(e) = settings_engine.load() {
            warn!(error = %e, "settings unusable, falling back to defaults");
        }

        Ok(Self::with_parts(
            db,
            settings_engine,
            Box::new(SystemClipboard::new()),
        ))
    }

    /// Assembles an app from already-opened parts and restores history.
    pub fn with_parts(
        db: Arc<Database>,
        settings_engine: SettingsEngine,
        clipboard: Box<dyn ClipboardTrait>,
    ) -> Self {
        let settings = settings_engine.get_settings().clone();
        let storage: Arc<dyn KeyValueStorage> = db.clone();
        let mut history = HistoryManager::new(storage, settings.history.storage_key);
        history.load();
        info!(entries = history.len(), "session started");

        Self {
            db,
            settings_engine,
            history,
            copy_feedback: CopyFeedback::default(),
            encoder: QrEncoder::new(),
            clipboard,
            current_type: PayloadType::default(),
            fields: FormFields::default(),
            options: settings.render,
            current_payload: None,
            current_image: None,
        }
    }

    fn formatter(&self) -> PayloadFormatter {
        PayloadFormatter::new(self.settings_engine.get_settings().payload.escape_wifi_fields)
    }

    fn exporter(&self) -> ExportService {
        ExportService::new(self.settings_engine.get_settings().export.clone())
    }

    pub fn current_type(&self) -> PayloadType {
        self.current_type
    }

    /// Activates another form. Field values of every type are kept.
    pub fn switch_type(&mut self, payload_type: PayloadType) {
        self.current_type = payload_type;
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        self.fields.set(name, value)
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn current_payload(&self) -> Option<&str> {
        self.current_payload.as_deref()
    }

    pub fn current_image(&self) -> Option<&RasterImage> {
        self.current_image.as_ref()
    }

    /// Formats the active form, renders it, and records it in history.
    ///
    /// On failure nothing changes: the previously displayed QR code stays.
    /// History write failures are logged and do not fail the generation.
    pub fn generate(&mut self) -> Result<&RasterImage, GenerateError> {
        let payload = self.formatter().format(self.current_type, &self.fields);
        if payload.is_empty() {
            return Err(GenerateError::MissingInput);
        }

        let image = self.encoder.render(&payload, &self.options).map_err(|e| {
            error!(error = %e, payload_type = %self.current_type, "QR encoding failed");
            e
        })?;

        if let Err(e) = self.history.add(self.current_type, &payload) {
            warn!(error = %e, "could not record generation in history");
        }
        self.current_payload = Some(payload);
        Ok(&*self.current_image.insert(image))
    }

    /// Re-renders the active payload with the current options.
    fn regenerate(&mut self) -> Result<(), EncodeError> {
        let Some(payload) = self.current_payload.as_deref() else {
            return Ok(());
        };
        match self.encoder.render(payload, &self.options) {
            Ok(image) => {
                self.current_image = Some(image);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "QR re-render failed");
                Err(e)
            }
        }
    }

    /// Applies a validated options patch and re-renders the active QR code.
    ///
    /// Invalid options are rejected without changing anything. If the new
    /// options are valid but the active payload no longer fits, the options
    /// stay applied and the previous image is kept.
    pub fn set_render_options(&mut self, patch: &RenderOptionsPatch) -> Result<(), EncodeError> {
        let options = patch.apply_to(&self.options);
        options.validate()?;
        self.options = options;
        self.regenerate()
    }

    /// Displays a history entry's payload. The form fields are not touched.
    ///
    /// Returns `Ok(false)` for an unknown id.
    pub fn select_history(&mut self, id: i64) -> Result<bool, EncodeError> {
        let Some(entry) = self.history.get(id) else {
            return Ok(false);
        };
        let (payload_type, payload) = (entry.payload_type, entry.raw_payload.clone());

        let image = self.encoder.render(&payload, &self.options)?;
        self.current_type = payload_type;
        self.current_payload = Some(payload);
        self.current_image = Some(image);
        Ok(true)
    }

    pub fn delete_history(&mut self, id: i64) -> Result<(), HistoryError> {
        self.history.remove(id)
    }

    /// Vector rendering of the active payload, computed on demand.
    pub fn vector_document(&self) -> Result<VectorDocument, ExportError> {
        let payload = self
            .current_payload
            .as_deref()
            .ok_or(ExportError::NothingToExport)?;
        Ok(self.encoder.render_vector(payload, &self.options)?)
    }

    pub fn export_png(&self, dir: Option<&Path>) -> Result<PathBuf, ExportError> {
        let image = self
            .current_image
            .as_ref()
            .ok_or(ExportError::NothingToExport)?;
        self.exporter().export_png(image, dir)
    }

    pub fn export_svg(&self, dir: Option<&Path>) -> Result<PathBuf, ExportError> {
        let document = self.vector_document()?;
        self.exporter().export_svg(&document, dir)
    }

    /// Copies the active image to the clipboard.
    ///
    /// A successful image copy (re)starts the copy feedback label.
    pub fn copy_image(&mut self, now: Instant) -> Result<CopyOutcome, ClipboardError> {
        let image = self
            .current_image
            .as_ref()
            .ok_or(ClipboardError::NothingToCopy)?;
        let outcome = copy_with_fallback(self.clipboard.as_ref(), image)?;
        if outcome == CopyOutcome::Image {
            self.copy_feedback.trigger(now);
        }
        info!(?outcome, "copied QR code");
        Ok(outcome)
    }
}
