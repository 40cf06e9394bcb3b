use serde::{Deserialize, Serialize};

use crate::api::Aggregate;
use crate::models::Record;

// =========================================================
// Transport charts types
// =========================================================

/// Raw response of the transport charts endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportChartsPayload {
    #[serde(default, deserialize_with = "crate::payload::records")]
    pub deliveries_by_zone: Vec<Record>,
    #[serde(default, deserialize_with = "crate::payload::records")]
    pub avg_cost_by_carrier: Vec<Record>,
}

/// Chart series for the transport view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportChartsView {
    /// Shipment count per destination zone, in API order.
    pub deliveries_by_zone: Vec<Aggregate>,
    /// Average shipment cost per carrier, in API order.
    pub avg_cost_by_carrier: Vec<Aggregate>,
}

/// Route function name constant
pub const GET_TRANSPORT_CHARTS: &str = "get_transport_charts";
