//! Typed input records built from raw API records.
//!
//! Every `from_record` constructor is total: it accepts the spellings used by
//! the dashboard API and by the storage/transport backends, and applies the
//! defaulting rules (missing text -> [`UNKNOWN_KEY`], missing number -> 0).

use serde::{Deserialize, Serialize};

use super::fields::{self, Record, UNKNOWN_KEY};

const PRODUCT_FIELDS: &[&str] = &["productRef", "product_ref", "referenceproduit", "reference"];
const FROM_ZONE_FIELDS: &[&str] = &["fromZone", "from_zone"];
const TO_ZONE_FIELDS: &[&str] = &["toZone", "to_zone"];
const QUANTITY_FIELDS: &[&str] = &["quantity", "move_qty", "qty"];

const LABEL_FIELDS: &[&str] = &["label", "support_label"];
const X_FIELDS: &[&str] = &["x", "x_coord"];
const Y_FIELDS: &[&str] = &["y", "y_coord"];
const LAT_FIELDS: &[&str] = &["lat", "latitude"];
const LON_FIELDS: &[&str] = &["lon", "lng", "longitude"];
const LOCATION_COUNT_FIELDS: &[&str] = &["locationCount", "location_count", "n_locations"];
const OCCUPANCY_FIELDS: &[&str] = &["occupancyRatio", "occupancy_ratio", "occupancy_pct"];

const CARRIER_FIELDS: &[&str] = &["carrier", "transporteur"];
const SERVICE_LEVEL_FIELDS: &[&str] = &["serviceLevel", "service_level"];
const COST_FIELDS: &[&str] = &["predictedCost", "predicted_cost", "cost_pred", "cp_cost_baseline_eur"];
const ETA_FIELDS: &[&str] = &["predictedEtaHours", "predicted_eta_hours", "eta_pred_h"];
const ON_TIME_FIELDS: &[&str] = &["onTimeRate", "on_time_rate"];

/// Sanitize a quantity-like value: negative and non-finite values become 0.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn text_or_unknown(record: &Record, names: &[&str]) -> String {
    fields::first_text(record, names).unwrap_or_else(|| UNKNOWN_KEY.to_string())
}

/// A directed stock movement between two zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub product_ref: String,
    pub from_zone: String,
    pub to_zone: String,
    pub quantity: f64,
}

impl MoveRecord {
    pub fn new(
        product_ref: impl Into<String>,
        from_zone: impl Into<String>,
        to_zone: impl Into<String>,
        quantity: f64,
    ) -> Self {
        Self {
            product_ref: product_ref.into(),
            from_zone: from_zone.into(),
            to_zone: to_zone.into(),
            quantity: non_negative(quantity),
        }
    }

    /// Build from a raw slotting-plan row (`referenceproduit`, `from_zone`, `to_zone`, `move_qty`).
    pub fn from_record(record: &Record) -> Self {
        Self::new(
            text_or_unknown(record, PRODUCT_FIELDS),
            text_or_unknown(record, FROM_ZONE_FIELDS),
            text_or_unknown(record, TO_ZONE_FIELDS),
            fields::first_number(record, QUANTITY_FIELDS).unwrap_or(0.0),
        )
    }
}

/// A storage support point as returned by the warehouse map endpoint.
///
/// Coordinates are optional; which pair is present decides the projection
/// strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePoint {
    pub label: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub location_count: f64,
    pub occupancy_ratio: f64,
}

impl StoragePoint {
    pub fn from_record(record: &Record) -> Self {
        Self {
            label: fields::first_text(record, LABEL_FIELDS),
            x: fields::first_number(record, X_FIELDS),
            y: fields::first_number(record, Y_FIELDS),
            lat: fields::first_number(record, LAT_FIELDS),
            lon: fields::first_number(record, LON_FIELDS),
            location_count: non_negative(
                fields::first_number(record, LOCATION_COUNT_FIELDS).unwrap_or(0.0),
            ),
            occupancy_ratio: fields::first_number(record, OCCUPANCY_FIELDS).unwrap_or(0.0),
        }
    }

    /// Cartesian coordinates, when both are present and finite.
    pub fn xy(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }

    /// Geographic coordinates as `(lon, lat)`, when both are present and finite.
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        match (self.lon, self.lat) {
            (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => Some((lon, lat)),
            _ => None,
        }
    }

    /// Display key: the label, or a 1-based positional key for unlabelled points.
    pub fn display_key(&self, index: usize) -> String {
        match &self.label {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => format!("#{}", index + 1),
        }
    }
}

/// A carrier/service-level option with its model predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierCandidate {
    pub carrier: String,
    pub service_level: String,
    pub predicted_cost: f64,
    pub predicted_eta_hours: f64,
    pub risk: f64,
}

impl CarrierCandidate {
    pub fn new(
        carrier: impl Into<String>,
        service_level: impl Into<String>,
        predicted_cost: f64,
        predicted_eta_hours: f64,
        risk: f64,
    ) -> Self {
        Self {
            carrier: carrier.into(),
            service_level: service_level.into(),
            predicted_cost,
            predicted_eta_hours,
            risk,
        }
    }

    /// Build from a recommendation row.
    ///
    /// When `risk` is absent the delay proxy `1 - on_time_rate` is used.
    pub fn from_record(record: &Record) -> Self {
        let risk = fields::number(record, "risk")
            .or_else(|| fields::first_number(record, ON_TIME_FIELDS).map(|r| 1.0 - r))
            .unwrap_or(0.0);
        Self::new(
            text_or_unknown(record, CARRIER_FIELDS),
            text_or_unknown(record, SERVICE_LEVEL_FIELDS),
            fields::first_number(record, COST_FIELDS).unwrap_or(0.0),
            fields::first_number(record, ETA_FIELDS).unwrap_or(0.0),
            risk,
        )
    }
}

/// Stock held at one storage location, with its estimated capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStock {
    pub location: String,
    pub on_hand: f64,
    pub capacity: f64,
}

impl LocationStock {
    pub fn new(location: impl Into<String>, on_hand: f64, capacity: f64) -> Self {
        Self {
            location: location.into(),
            on_hand: non_negative(on_hand),
            capacity: non_negative(capacity),
        }
    }

    pub fn from_record(record: &Record) -> Self {
        Self::new(
            fields::first_text(record, &["location"]).unwrap_or_default(),
            fields::first_number(record, &["onHand", "on_hand"]).unwrap_or(0.0),
            fields::first_number(record, &["capacity", "loc_capacity"]).unwrap_or(0.0),
        )
    }

    /// Fill ratio of this location; 0 when capacity is unknown.
    pub fn occupancy_ratio(&self) -> f64 {
        if self.capacity > 0.0 {
            self.on_hand / self.capacity
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_move_record_from_slotting_row() {
        let r = record(json!({
            "referenceproduit": "SKU-1",
            "from_zone": "B/C/D",
            "to_zone": "A",
            "move_qty": 12,
            "reason": "Haute vélocité hors fast"
        }));
        let m = MoveRecord::from_record(&r);
        assert_eq!(m, MoveRecord::new("SKU-1", "B/C/D", "A", 12.0));
    }

    #[test]
    fn test_move_record_defaults() {
        let m = MoveRecord::from_record(&record(json!({"quantity": -3})));
        assert_eq!(m.product_ref, UNKNOWN_KEY);
        assert_eq!(m.from_zone, UNKNOWN_KEY);
        assert_eq!(m.quantity, 0.0);
    }

    #[test]
    fn test_storage_point_aliases() {
        let p = StoragePoint::from_record(&record(json!({
            "support_label": "R12",
            "lat": null,
            "x_coord": 3.5,
            "y_coord": "7",
            "n_locations": 14,
            "occupancy_pct": 0.42
        })));
        assert_eq!(p.label.as_deref(), Some("R12"));
        assert_eq!(p.xy(), Some((3.5, 7.0)));
        assert_eq!(p.lon_lat(), None);
        assert_eq!(p.location_count, 14.0);
        assert_eq!(p.occupancy_ratio, 0.42);
    }

    #[test]
    fn test_storage_point_display_key() {
        let unlabelled = StoragePoint::default();
        assert_eq!(unlabelled.display_key(0), "#1");
        let labelled = StoragePoint {
            label: Some("P4".into()),
            ..Default::default()
        };
        assert_eq!(labelled.display_key(9), "P4");
    }

    #[test]
    fn test_carrier_candidate_risk_from_on_time_rate() {
        let c = CarrierCandidate::from_record(&record(json!({
            "carrier": "GEODIS",
            "service_level": "24h",
            "cost_pred": 118.0,
            "eta_pred_h": 26.5,
            "on_time_rate": 0.9
        })));
        assert_eq!(c.carrier, "GEODIS");
        assert_eq!(c.service_level, "24h");
        assert!((c.risk - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_carrier_candidate_explicit_risk_wins() {
        let c = CarrierCandidate::from_record(&record(json!({
            "carrier": "DHL", "risk": 0.3, "on_time_rate": 0.99
        })));
        assert_eq!(c.risk, 0.3);
        assert_eq!(c.predicted_cost, 0.0);
    }

    #[test]
    fn test_location_stock_ratio() {
        assert_eq!(LocationStock::new("A-01", 45.0, 60.0).occupancy_ratio(), 0.75);
        assert_eq!(LocationStock::new("A-02", 10.0, 0.0).occupancy_ratio(), 0.0);
    }
}
