use serde::{Deserialize, Serialize};

use crate::models::Record;

// =========================================================
// Zone occupancy types
// =========================================================

/// Raw per-location stock rows (`location`, `on_hand`, `capacity`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationStockPayload {
    #[serde(default, deserialize_with = "crate::payload::records")]
    pub items: Vec<Record>,
}

/// Fill status of a storage zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Ok,
    Alert,
    Critical,
}

/// Occupancy of one storage zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOccupancy {
    pub zone: String,
    pub n_locations: usize,
    pub on_hand: f64,
    pub capacity: f64,
    pub occupancy_pct: f64,
    pub status: ZoneStatus,
}

/// Warehouse-wide storage indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageKpis {
    pub occupancy_rate: f64,
    pub active_locations: usize,
    pub saturated_locations_pct: f64,
    pub total_on_hand: f64,
    pub total_capacity: f64,
}

/// Zone table plus headline indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonesView {
    pub zones: Vec<ZoneOccupancy>,
    pub kpis: StorageKpis,
}

/// Route function name constant
pub const GET_ZONES_OCCUPANCY: &str = "get_zones_occupancy";
