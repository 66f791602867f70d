use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::payload::PayloadType;

/// One past generation event, as shown in the recent-history list.
///
/// The serialized field names are the storage wire format and must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub payload_type: PayloadType,
    #[serde(rename = "data")]
    pub raw_payload: String,
    #[serde(rename = "displayData")]
    pub display_label: String,
    /// PNG data URI of an independent low-resolution encoding.
    pub thumbnail: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}
