//! Decoding of raw dashboard API payloads.
//!
//! Each endpoint returns a JSON object whose array fields hold loosely typed
//! rows. Decoding is lenient below the root: rows that are not objects are
//! dropped and fields of the wrong type read as empty. Only an unparsable
//! document or a non-object root is an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::api::{
    CarrierRecommendationPayload, LocationStockPayload, SlottingPayload, StorageMapPayload,
    TransportChartsPayload,
};
use crate::error::{AnalyticsError, AnalyticsResult, ErrorContext};
use crate::models::Record;

/// Deserialize an array of records, keeping only object rows.
///
/// `null`, a missing field, or a non-array value all yield an empty list.
pub(crate) fn records<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let rows = match raw {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(rows)
}

/// Deserialize a single record; anything but an object yields an empty one.
pub(crate) fn record<'de, D>(deserializer: D) -> Result<Record, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => Ok(map),
        _ => Ok(Record::new()),
    }
}

/// The dashboard endpoint a payload came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Transport,
    Slotting,
    StorageMap,
    Carriers,
    Zones,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 5] = [
        PayloadKind::Transport,
        PayloadKind::Slotting,
        PayloadKind::StorageMap,
        PayloadKind::Carriers,
        PayloadKind::Zones,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Transport => "transport",
            PayloadKind::Slotting => "slotting",
            PayloadKind::StorageMap => "storage_map",
            PayloadKind::Carriers => "carriers",
            PayloadKind::Zones => "zones",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transport" => Ok(PayloadKind::Transport),
            "slotting" => Ok(PayloadKind::Slotting),
            "map" | "storage_map" | "storage-map" => Ok(PayloadKind::StorageMap),
            "carriers" | "carrier" => Ok(PayloadKind::Carriers),
            "zones" => Ok(PayloadKind::Zones),
            other => Err(AnalyticsError::payload_with_context(
                format!(
                    "Unknown payload kind '{}'. Expected one of: transport, slotting, map, carriers, zones",
                    other
                ),
                ErrorContext::new("parse_payload_kind"),
            )),
        }
    }
}

/// A decoded payload of any kind.
#[derive(Debug, Clone)]
pub enum Payload {
    Transport(TransportChartsPayload),
    Slotting(SlottingPayload),
    StorageMap(StorageMapPayload),
    Carriers(CarrierRecommendationPayload),
    Zones(LocationStockPayload),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Transport(_) => PayloadKind::Transport,
            Payload::Slotting(_) => PayloadKind::Slotting,
            Payload::StorageMap(_) => PayloadKind::StorageMap,
            Payload::Carriers(_) => PayloadKind::Carriers,
            Payload::Zones(_) => PayloadKind::Zones,
        }
    }

    /// Decode a JSON document as a payload of `kind`.
    pub fn parse(kind: PayloadKind, json: &str) -> AnalyticsResult<Self> {
        let context = || ErrorContext::new("parse_payload").with_entity(kind.as_str());

        let root: Value = serde_json::from_str(json).map_err(|e| {
            AnalyticsError::payload_with_context(
                format!("Invalid JSON: {}", e),
                context().with_details(format!("line {}, column {}", e.line(), e.column())),
            )
        })?;

        if !root.is_object() {
            return Err(AnalyticsError::payload_with_context(
                format!("Expected a JSON object at the root, found {}", value_kind(&root)),
                context(),
            ));
        }

        let decoded = match kind {
            PayloadKind::Transport => serde_json::from_value(root).map(Payload::Transport),
            PayloadKind::Slotting => serde_json::from_value(root).map(Payload::Slotting),
            PayloadKind::StorageMap => serde_json::from_value(root).map(Payload::StorageMap),
            PayloadKind::Carriers => serde_json::from_value(root).map(Payload::Carriers),
            PayloadKind::Zones => serde_json::from_value(root).map(Payload::Zones),
        };

        decoded.map_err(|e| AnalyticsError::payload_with_context(e.to_string(), context()))
    }

    /// Read and decode a payload file.
    pub fn load<P: AsRef<Path>>(kind: PayloadKind, path: P) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyticsError::io(
                e,
                ErrorContext::new("read_payload")
                    .with_entity(kind.as_str())
                    .with_details(path.display().to_string()),
            )
        })?;
        log::debug!("Loaded {} payload from {}", kind, path.display());
        Self::parse(kind, &content)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
