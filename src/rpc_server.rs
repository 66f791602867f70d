//! QRGen RPC Server: JSON-RPC over stdin/stdout for a front-end shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"form.set", "params":{"field":"url","value":"https://..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Event:    {"event":"copy_feedback","label":"Copy"} when the copy label reverts.
//!
//! Logs go to stderr; stdout carries only protocol lines.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant as TokioInstant};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qrgen::app::App;
use qrgen::platform;
use qrgen::rpc_handler::handle_method;

fn db_path() -> PathBuf {
    match std::env::var("QRGEN_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir).join("qrgen.db"),
        Err(_) => platform::get_data_dir().join("qrgen.db"),
    }
}

fn emit(line: &Value) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", line)?;
    stdout.flush()?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qrgen=info,qrgen_rpc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let db_path = db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data dir {}", parent.display()))?;
    }
    let mut app = App::new(&db_path.to_string_lossy())
        .map_err(|e| anyhow::anyhow!("failed to initialize QRGen: {}", e))?;
    info!(db = %db_path.display(), "rpc server ready");

    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = app.copy_feedback.deadline();
        tokio::select! {
            _ = sleep_until(TokioInstant::from_std(deadline.unwrap_or_else(std::time::Instant::now))),
                if deadline.is_some() =>
            {
                let now = std::time::Instant::now();
                if app.copy_feedback.poll(now) {
                    emit(&json!({"event": "copy_feedback", "label": app.copy_feedback.label(now)}))?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }

                let req: Value = match serde_json::from_str(&line) {
                    Ok(v) => v,
                    Err(e) => {
                        emit(&json!({"id": null, "error": format!("parse error: {}", e)}))?;
                        continue;
                    }
                };

                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));
                debug!(method, "rpc request");

                let response = match handle_method(&mut app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                };
                emit(&response)?;
            }
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}
