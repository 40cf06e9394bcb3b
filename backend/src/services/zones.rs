//! Zone occupancy and warehouse storage indicators.

use std::collections::{BTreeMap, BTreeSet};

use crate::api::{LocationStock, StorageKpis, ZoneOccupancy, ZoneStatus};
use crate::config::ZoneSettings;
use crate::models::UNKNOWN_KEY;

/// Storage zone of a location code: its first character, upper-cased.
///
/// `"a-01-03"` belongs to zone `"A"`. Blank codes map to `"unknown"`.
pub fn infer_zone(location: &str) -> String {
    match location.trim().chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => UNKNOWN_KEY.to_string(),
    }
}

/// Status for a fill ratio under the given thresholds.
pub fn zone_status(occupancy: f64, settings: &ZoneSettings) -> ZoneStatus {
    if occupancy >= settings.critical_threshold {
        ZoneStatus::Critical
    } else if occupancy >= settings.alert_threshold {
        ZoneStatus::Alert
    } else {
        ZoneStatus::Ok
    }
}

#[derive(Default)]
struct ZoneTotals<'a> {
    locations: BTreeSet<&'a str>,
    on_hand: f64,
    capacity: f64,
}

/// Per-zone occupancy, sorted by zone.
pub fn zone_occupancy(locations: &[LocationStock], settings: &ZoneSettings) -> Vec<ZoneOccupancy> {
    let mut zones: BTreeMap<String, ZoneTotals> = BTreeMap::new();
    for stock in locations {
        let totals = zones.entry(infer_zone(&stock.location)).or_default();
        totals.locations.insert(stock.location.trim());
        totals.on_hand += stock.on_hand;
        totals.capacity += stock.capacity;
    }

    zones
        .into_iter()
        .map(|(zone, totals)| {
            let occupancy_pct = if totals.capacity > 0.0 {
                totals.on_hand / totals.capacity
            } else {
                0.0
            };
            ZoneOccupancy {
                zone,
                n_locations: totals.locations.len(),
                on_hand: totals.on_hand,
                capacity: totals.capacity,
                occupancy_pct,
                status: zone_status(occupancy_pct, settings),
            }
        })
        .collect()
}

/// Warehouse-wide storage indicators.
///
/// A location counts as saturated when its own fill ratio reaches the
/// critical threshold.
pub fn storage_kpis(locations: &[LocationStock], settings: &ZoneSettings) -> StorageKpis {
    let total_on_hand: f64 = locations.iter().map(|l| l.on_hand).sum();
    let total_capacity: f64 = locations.iter().map(|l| l.capacity).sum();
    let active_locations = locations.iter().filter(|l| l.on_hand > 0.0).count();
    let saturated = locations
        .iter()
        .filter(|l| l.occupancy_ratio() >= settings.critical_threshold)
        .count();

    let capacity_divisor = if total_capacity > 0.0 { total_capacity } else { 1.0 };
    let saturated_locations_pct = if locations.is_empty() {
        0.0
    } else {
        saturated as f64 / locations.len() as f64
    };

    StorageKpis {
        occupancy_rate: total_on_hand / capacity_divisor,
        active_locations,
        saturated_locations_pct,
        total_on_hand,
        total_capacity,
    }
}
