#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use logiops_analytics::api::{CarrierCandidate, LocationStock, MoveRecord, Record, StoragePoint};
use serde_json::Value;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Raw records from JSON values; non-objects are skipped.
pub fn records(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}

pub fn move_record(product: &str, from: &str, to: &str, quantity: f64) -> MoveRecord {
    MoveRecord::new(product, from, to, quantity)
}

pub fn xy_point(label: &str, x: f64, y: f64) -> StoragePoint {
    StoragePoint {
        label: Some(label.to_string()),
        x: Some(x),
        y: Some(y),
        ..Default::default()
    }
}

pub fn geo_point(label: &str, lon: f64, lat: f64) -> StoragePoint {
    StoragePoint {
        label: Some(label.to_string()),
        lon: Some(lon),
        lat: Some(lat),
        ..Default::default()
    }
}

pub fn candidate(carrier: &str, service: &str, cost: f64, eta: f64, risk: f64) -> CarrierCandidate {
    CarrierCandidate::new(carrier, service, cost, eta, risk)
}

pub fn stock(location: &str, on_hand: f64, capacity: f64) -> LocationStock {
    LocationStock::new(location, on_hand, capacity)
}
