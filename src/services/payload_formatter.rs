//! Payload Formatter for QRGen.
//!
//! Maps a payload type and its form fields onto the string that gets encoded
//! into the QR symbol, and derives the short label shown in the history list.
//!
//! Grammars:
//! - url / text: trimmed pass-through
//! - wifi: `WIFI:S:<ssid>;T:<security>;P:<password>;;`
//! - email: `mailto:<to>[?subject=<enc>][&body=<enc>]`
//! - phone: `tel:<number>`
//! - sms: `sms:<number>[?body=<enc>]`
//!
//! An empty result means the required field for the type is missing.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::payload::{FormFields, PayloadType};

/// Characters left as-is in query values, matching `encodeURIComponent`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Labels for url/text payloads are cut to this many characters.
pub const LABEL_MAX_CHARS: usize = 40;

/// Formats form input into QR payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadFormatter {
    escape_wifi_fields: bool,
}

impl PayloadFormatter {
    pub fn new(escape_wifi_fields: bool) -> Self {
        Self { escape_wifi_fields }
    }

    /// Builds the payload for `payload_type` from `fields`.
    ///
    /// Returns an empty string when the type's required field is empty.
    pub fn format(&self, payload_type: PayloadType, fields: &FormFields) -> String {
        match payload_type {
            PayloadType::Url => fields.url.trim().to_string(),
            PayloadType::Text => fields.text.trim().to_string(),
            PayloadType::Wifi => {
                let ssid = fields.wifi_ssid.trim();
                if ssid.is_empty() {
                    return String::new();
                }
                let (ssid, password) = if self.escape_wifi_fields {
                    (escape_wifi(ssid), escape_wifi(&fields.wifi_password))
                } else {
                    (ssid.to_string(), fields.wifi_password.clone())
                };
                format!(
                    "WIFI:S:{};T:{};P:{};;",
                    ssid,
                    fields.wifi_security.as_str(),
                    password
                )
            }
            PayloadType::Email => {
                let to = fields.email_to.trim();
                if to.is_empty() {
                    return String::new();
                }
                let params = query_params(&[
                    ("subject", fields.email_subject.trim()),
                    ("body", fields.email_body.trim()),
                ]);
                format!("mailto:{}{}", to, params)
            }
            PayloadType::Phone => {
                let phone = fields.phone.trim();
                if phone.is_empty() {
                    return String::new();
                }
                format!("tel:{}", phone)
            }
            PayloadType::Sms => {
                let phone = fields.sms_phone.trim();
                if phone.is_empty() {
                    return String::new();
                }
                let params = query_params(&[("body", fields.sms_message.trim())]);
                format!("sms:{}{}", phone, params)
            }
        }
    }
}

/// Formats with the default (unescaped) grammar.
pub fn format_payload(payload_type: PayloadType, fields: &FormFields) -> String {
    PayloadFormatter::default().format(payload_type, fields)
}

/// Builds `?k=v&k=v` from the non-empty values, percent-encoding each value.
fn query_params(pairs: &[(&str, &str)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
        .collect();

    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}

fn escape_wifi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Derives the human-friendly history label for a payload.
pub fn display_label(payload_type: PayloadType, payload: &str) -> String {
    match payload_type {
        PayloadType::Wifi => match wifi_ssid(payload) {
            Some(ssid) => format!("WiFi: {}", ssid),
            None => payload.to_string(),
        },
        PayloadType::Email => payload.strip_prefix("mailto:").unwrap_or(payload).to_string(),
        PayloadType::Phone => payload.strip_prefix("tel:").unwrap_or(payload).to_string(),
        PayloadType::Sms => {
            let rest = payload.strip_prefix("sms:").unwrap_or(payload);
            rest.split('?').next().unwrap_or_default().to_string()
        }
        PayloadType::Url | PayloadType::Text => truncate_label(payload),
    }
}

/// First `S:` followed by a non-empty run of non-`;` characters.
fn wifi_ssid(payload: &str) -> Option<&str> {
    payload.match_indices("S:").find_map(|(idx, _)| {
        let rest = &payload[idx + 2..];
        let end = rest.find(';').unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    })
}

fn truncate_label(payload: &str) -> String {
    match payload.char_indices().nth(LABEL_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &payload[..cut]),
        None => payload.to_string(),
    }
}
