//! Public API surface of the analytics layer.
//!
//! This file consolidates the DTO types handed back to the rendering layer.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::carriers::CarrierRecommendationPayload;
pub use crate::routes::carriers::CarrierRecommendationView;
pub use crate::routes::carriers::RankedCandidate;
pub use crate::routes::slotting::SlottingPayload;
pub use crate::routes::slotting::SlottingSummary;
pub use crate::routes::slotting::SlottingView;
pub use crate::routes::storage_map::ProjectedLayout;
pub use crate::routes::storage_map::ProjectedPoint;
pub use crate::routes::storage_map::ProjectionStrategy;
pub use crate::routes::storage_map::Rgb;
pub use crate::routes::storage_map::StorageMapPayload;
pub use crate::routes::transport::TransportChartsPayload;
pub use crate::routes::transport::TransportChartsView;
pub use crate::routes::zones::LocationStockPayload;
pub use crate::routes::zones::StorageKpis;
pub use crate::routes::zones::ZoneOccupancy;
pub use crate::routes::zones::ZoneStatus;
pub use crate::routes::zones::ZonesView;

pub use crate::models::{CarrierCandidate, LocationStock, MoveRecord, Record, StoragePoint};

use serde::{Deserialize, Serialize};

/// One keyed value of a chart series or ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub key: String,
    pub value: f64,
}

impl Aggregate {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl std::fmt::Display for Aggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl From<(&str, f64)> for Aggregate {
    fn from((key, value): (&str, f64)) -> Self {
        Aggregate::new(key, value)
    }
}

/// Any view the dashboard can request, tagged by payload kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "view", rename_all = "snake_case")]
pub enum DashboardView {
    Transport(TransportChartsView),
    Slotting(SlottingView),
    StorageMap(ProjectedLayout),
    Carriers(CarrierRecommendationView),
    Zones(ZonesView),
}
