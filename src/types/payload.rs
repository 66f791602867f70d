use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of data a QR code carries. Selects which form fields are active
/// and which micro-grammar the formatter applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayloadType {
    #[default]
    Url,
    Text,
    Wifi,
    Email,
    Phone,
    Sms,
}

impl PayloadType {
    pub const ALL: [PayloadType; 6] = [
        PayloadType::Url,
        PayloadType::Text,
        PayloadType::Wifi,
        PayloadType::Email,
        PayloadType::Phone,
        PayloadType::Sms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadType::Url => "url",
            PayloadType::Text => "text",
            PayloadType::Wifi => "wifi",
            PayloadType::Email => "email",
            PayloadType::Phone => "phone",
            PayloadType::Sms => "sms",
        }
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayloadType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown payload type: {}", s))
    }
}

/// WiFi authentication scheme written into the `T:` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WifiSecurity {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    /// Open network.
    #[serde(rename = "nopass", alias = "none")]
    None,
}

impl WifiSecurity {
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::None => "nopass",
        }
    }
}

impl FromStr for WifiSecurity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WPA" | "wpa" => Ok(WifiSecurity::Wpa),
            "WEP" | "wep" => Ok(WifiSecurity::Wep),
            "nopass" | "none" | "" => Ok(WifiSecurity::None),
            other => Err(format!("unknown wifi security: {}", other)),
        }
    }
}

/// Every input field of every form. Values for inactive types are kept
/// so switching back and forth never loses what the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormFields {
    pub url: String,
    pub text: String,
    pub wifi_ssid: String,
    pub wifi_password: String,
    pub wifi_security: WifiSecurity,
    pub email_to: String,
    pub email_subject: String,
    pub email_body: String,
    pub phone: String,
    pub sms_phone: String,
    pub sms_message: String,
}

impl FormFields {
    /// Field names accepted by [`FormFields::set`].
    pub const FIELD_NAMES: [&'static str; 11] = [
        "url",
        "text",
        "wifi.ssid",
        "wifi.password",
        "wifi.security",
        "email.to",
        "email.subject",
        "email.body",
        "phone",
        "sms.phone",
        "sms.message",
    ];

    /// Sets a field by its dotted form name.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), String> {
        let slot = match name {
            "url" => &mut self.url,
            "text" => &mut self.text,
            "wifi.ssid" => &mut self.wifi_ssid,
            "wifi.password" => &mut self.wifi_password,
            "wifi.security" => {
                self.wifi_security = value.parse()?;
                return Ok(());
            }
            "email.to" => &mut self.email_to,
            "email.subject" => &mut self.email_subject,
            "email.body" => &mut self.email_body,
            "phone" => &mut self.phone,
            "sms.phone" => &mut self.sms_phone,
            "sms.message" => &mut self.sms_message,
            other => return Err(format!("unknown form field: {}", other)),
        };
        *slot = value.to_string();
        Ok(())
    }
}
