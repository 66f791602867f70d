//! QRGen: a fast form-to-QR-code generator with local history.
//!
//! Console demo: walks every payload type through the controller using an
//! in-memory database and writes the exported files to a temp directory.
//! Front-ends drive the real application through the `qrgen-rpc` binary.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qrgen::app::App;
use qrgen::database::Database;
use qrgen::managers::history_manager::{HistoryManagerTrait, HISTORY_CAPACITY};
use qrgen::services::clipboard_service::SystemClipboard;
use qrgen::services::settings_engine::SettingsEngine;
use qrgen::types::payload::{PayloadType, WifiSecurity};
use qrgen::types::render::{ErrorCorrectionLevel, RenderOptionsPatch};

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qrgen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    println!();
    println!("  QRGen v{} Demo Mode", env!("CARGO_PKG_VERSION"));
    println!();

    let workdir = tempfile::tempdir()?;
    let settings_path = workdir.path().join("settings.json");
    let db = Arc::new(Database::open_in_memory()?);
    let mut app = App::with_parts(
        db,
        SettingsEngine::new(Some(settings_path.to_string_lossy().to_string())),
        Box::new(SystemClipboard::new()),
    );

    section("Generate");
    let fields = app.fields_mut();
    fields.url = "https://www.rust-lang.org/learn".to_string();
    fields.text = "Hello from QRGen".to_string();
    fields.wifi_ssid = "HomeNet".to_string();
    fields.wifi_password = "correct horse".to_string();
    fields.wifi_security = WifiSecurity::Wpa;
    fields.email_to = "team@example.com".to_string();
    fields.email_subject = "Weekly sync".to_string();
    fields.phone = "+15551234".to_string();
    fields.sms_phone = "+15551234".to_string();
    fields.sms_message = "On my way".to_string();

    for payload_type in PayloadType::ALL {
        app.switch_type(payload_type);
        let image = app.generate()?;
        let (w, h) = (image.width(), image.height());
        println!(
            "  {:<6} {:>3}x{:<3} {}",
            payload_type,
            w,
            h,
            app.current_payload().unwrap_or_default()
        );
    }

    section("History");
    app.switch_type(PayloadType::Url);
    app.generate()?;
    println!(
        "  Regenerated the URL code: {} entries (duplicates are skipped, cap {})",
        app.history.len(),
        HISTORY_CAPACITY
    );
    for entry in app.history.list() {
        println!("  [{}] {:<6} {}", entry.id, entry.payload_type, entry.display_label);
    }

    let oldest = app
        .history
        .list()
        .last()
        .map(|e| e.id)
        .ok_or_else(|| anyhow!("history is empty"))?;
    app.select_history(oldest)?;
    println!(
        "  Selected oldest entry: type = {}, payload = {}",
        app.current_type(),
        app.current_payload().unwrap_or_default()
    );

    section("Render options");
    app.set_render_options(&RenderOptionsPatch {
        width: Some(512),
        dark: Some("#1f6feb".to_string()),
        error_correction: Some(ErrorCorrectionLevel::H),
        ..Default::default()
    })?;
    let options = app.render_options();
    println!(
        "  width = {}, dark = {}, light = {}, ec = {:?}",
        options.width, options.dark, options.light, options.error_correction
    );

    section("Export");
    let png = app.export_png(Some(workdir.path()))?;
    let svg = app.export_svg(Some(workdir.path()))?;
    println!("  Wrote {}", png.display());
    println!("  Wrote {}", svg.display());

    println!();
    println!("  ✅ Demo finished.");
    Ok(())
}
