use serde::{Deserialize, Serialize};

use crate::api::Aggregate;
use crate::models::{fields, Record};

// =========================================================
// Storage slotting types
// =========================================================

/// Raw response of the slotting plan endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlottingPayload {
    #[serde(default, deserialize_with = "crate::payload::record")]
    pub summary: Record,
    #[serde(default, deserialize_with = "crate::payload::records")]
    pub sample: Vec<Record>,
}

/// Fast-zone capacity summary of a slotting plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlottingSummary {
    pub fast_capacity: f64,
    pub fast_used_before: f64,
    pub fast_used_after: f64,
    pub moves: usize,
}

impl SlottingSummary {
    pub fn from_record(record: &Record) -> Self {
        Self {
            fast_capacity: fields::number_or_zero(record, "fast_capacity"),
            fast_used_before: fields::number_or_zero(record, "fast_used_before"),
            fast_used_after: fields::number_or_zero(record, "fast_used_after"),
            moves: fields::number(record, "moves")
                .filter(|m| *m > 0.0)
                .map(|m| m as usize)
                .unwrap_or(0),
        }
    }

    /// Fast-zone fill ratio after the plan is applied; 0 when capacity is unknown.
    pub fn fill_ratio_after(&self) -> f64 {
        if self.fast_capacity > 0.0 {
            self.fast_used_after / self.fast_capacity
        } else {
            0.0
        }
    }
}

/// Slotting view: top products entering and leaving the fast zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlottingView {
    pub fast_zone: String,
    pub summary: SlottingSummary,
    /// Fast-zone fill ratio once the plan is applied.
    pub fast_fill_ratio: f64,
    pub top_inbound: Vec<Aggregate>,
    pub top_outbound: Vec<Aggregate>,
}

/// Route function name constant
pub const GET_SLOTTING_PLAN: &str = "get_slotting_plan";
