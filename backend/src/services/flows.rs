//! Top-N product flows into or out of a storage zone.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::api::{Aggregate, MoveRecord};
use crate::services::aggregation::{saturating_add, top_n};

/// Which side of a move must match the target zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// Moves whose destination is the target zone.
    In,
    /// Moves whose origin is the target zone.
    Out,
}

impl FromStr for FlowDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in" | "inbound" => Ok(FlowDirection::In),
            "out" | "outbound" => Ok(FlowDirection::Out),
            other => Err(format!("Unsupported flow direction '{}'. Use in or out.", other)),
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlowDirection::In => "in",
            FlowDirection::Out => "out",
        })
    }
}

fn same_zone(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Top `k` products by summed quantity moving `direction` relative to `target_zone`.
///
/// Zone matching is case-insensitive. Ties keep first-seen order; fewer than
/// `k` products yields all of them, and no match yields an empty list.
pub fn top_flows(
    moves: &[MoveRecord],
    direction: FlowDirection,
    target_zone: &str,
    k: usize,
) -> Vec<Aggregate> {
    let mut totals: Vec<Aggregate> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    let matching = moves.iter().filter(|m| match direction {
        FlowDirection::In => same_zone(&m.to_zone, target_zone),
        FlowDirection::Out => same_zone(&m.from_zone, target_zone),
    });

    for m in matching {
        let quantity = if m.quantity.is_finite() && m.quantity > 0.0 {
            m.quantity
        } else {
            0.0
        };
        match index.get(m.product_ref.as_str()) {
            Some(&i) => totals[i].value = saturating_add(totals[i].value, quantity),
            None => {
                index.insert(m.product_ref.as_str(), totals.len());
                totals.push(Aggregate::new(m.product_ref.clone(), quantity));
            }
        }
    }

    log::debug!(
        "top_flows: {} distinct products {} zone {}",
        totals.len(),
        direction,
        target_zone
    );

    top_n(&totals, k)
}
