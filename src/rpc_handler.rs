//! RPC method handler for the QRGen JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! presentation controller.

use std::path::Path;
use std::time::Instant;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::history_manager::HistoryManagerTrait;
use crate::services::clipboard_service::CopyOutcome;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::payload::PayloadType;
use crate::types::render::{RasterImage, RenderOptionsPatch};

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn id_param(params: &Value) -> Result<i64, String> {
    match params.get("id") {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| "invalid id".to_string()),
        Some(Value::String(s)) => s.parse().map_err(|_| format!("invalid id: {}", s)),
        _ => Err("missing id".to_string()),
    }
}

fn image_json(image: &RasterImage) -> Result<Value, String> {
    Ok(json!({
        "image": image.to_data_uri().map_err(|e| e.to_string())?,
        "width": image.width(),
        "height": image.height(),
    }))
}

fn current_json(app: &App) -> Result<Value, String> {
    let mut result = json!({
        "type": app.current_type(),
        "payload": app.current_payload(),
    });
    if let Some(image) = app.current_image() {
        if let (Value::Object(out), Value::Object(img)) = (&mut result, image_json(image)?) {
            out.extend(img);
        }
    }
    Ok(result)
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Form ───
        "type.switch" => {
            let payload_type: PayloadType = str_param(params, "type")?.parse()?;
            app.switch_type(payload_type);
            Ok(json!({"type": payload_type}))
        }
        "type.current" => Ok(json!({"type": app.current_type()})),
        "form.get" => serde_json::to_value(app.fields()).map_err(|e| e.to_string()),
        "form.set" => {
            let field = str_param(params, "field")?;
            let value = str_param(params, "value")?;
            app.set_field(field, value)?;
            Ok(json!({"ok": true}))
        }

        // ─── QR ───
        "qr.generate" => {
            app.generate().map_err(|e| e.to_string())?;
            current_json(app)
        }
        "qr.current" => current_json(app),
        "qr.svg" => {
            let document = app.vector_document().map_err(|e| e.to_string())?;
            Ok(json!({"svg": document.into_string()}))
        }

        // ─── Render options ───
        "options.get" => serde_json::to_value(app.render_options()).map_err(|e| e.to_string()),
        "options.set" => {
            let patch: RenderOptionsPatch =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid options: {}", e))?;
            app.set_render_options(&patch).map_err(|e| e.to_string())?;
            serde_json::to_value(app.render_options()).map_err(|e| e.to_string())
        }

        // ─── Export ───
        "export.png" => {
            let dir = params.get("dir").and_then(|v| v.as_str()).map(Path::new);
            let path = app.export_png(dir).map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }
        "export.svg" => {
            let dir = params.get("dir").and_then(|v| v.as_str()).map(Path::new);
            let path = app.export_svg(dir).map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }
        "clipboard.copy" => {
            let now = Instant::now();
            let outcome = app.copy_image(now).map_err(|e| e.to_string())?;
            let (kind, message) = match outcome {
                CopyOutcome::Image => ("image", None),
                CopyOutcome::DataUriFallback => ("data_uri", Some("Image copied as data URL")),
            };
            Ok(json!({
                "outcome": kind,
                "message": message,
                "label": app.copy_feedback.label(now),
            }))
        }

        // ─── History ───
        "history.list" => serde_json::to_value(app.history.list()).map_err(|e| e.to_string()),
        "history.select" => {
            let id = id_param(params)?;
            let found = app.select_history(id).map_err(|e| e.to_string())?;
            if !found {
                return Ok(json!({"found": false}));
            }
            let mut result = current_json(app)?;
            if let Value::Object(map) = &mut result {
                map.insert("found".to_string(), json!(true));
            }
            Ok(result)
        }
        "history.delete" => {
            let id = id_param(params)?;
            app.delete_history(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            serde_json::to_value(app.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            app.settings_engine.reset().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
