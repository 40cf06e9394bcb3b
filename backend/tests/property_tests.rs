mod support;

use std::collections::HashMap;

use logiops_analytics::api::{MoveRecord, StoragePoint};
use logiops_analytics::services::{
    aggregate, color_for_occupancy, project, rank, top_flows, FlowDirection, ReduceOp,
};
use proptest::prelude::*;
use serde_json::json;

fn arb_move() -> impl Strategy<Value = MoveRecord> {
    (
        prop::sample::select(vec!["P1", "P2", "P3", "P4", "P5", "P6"]),
        prop::sample::select(vec!["A", "B", "C"]),
        prop::sample::select(vec!["A", "B", "C"]),
        prop::sample::select(vec![0.0, 5.0, 10.0, 15.0]),
    )
        .prop_map(|(p, from, to, q)| support::move_record(p, from, to, q))
}

fn arb_point() -> impl Strategy<Value = StoragePoint> {
    (
        prop::option::of(-1e6..1e6f64),
        prop::option::of(-1e6..1e6f64),
        prop::option::of(-90.0..90.0f64),
        prop::option::of(-180.0..180.0f64),
        -10.0..500.0f64,
        -1.0..2.0f64,
    )
        .prop_map(|(x, y, lat, lon, count, occupancy)| StoragePoint {
            label: None,
            x,
            y,
            lat,
            lon,
            location_count: count,
            occupancy_ratio: occupancy,
        })
}

proptest! {
    #[test]
    fn prop_top_flows_sorted_and_bounded(
        moves in prop::collection::vec(arb_move(), 0..40),
        k in 0usize..8,
    ) {
        let out = top_flows(&moves, FlowDirection::In, "A", k);
        prop_assert!(out.len() <= k);
        for pair in out.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
        }

        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for (i, m) in moves.iter().filter(|m| m.to_zone == "A").enumerate() {
            first_seen.entry(m.product_ref.as_str()).or_insert(i);
        }
        for agg in &out {
            prop_assert!(first_seen.contains_key(agg.key.as_str()));
        }
        for pair in out.windows(2) {
            if pair[0].value == pair[1].value {
                prop_assert!(first_seen[pair[0].key.as_str()] < first_seen[pair[1].key.as_str()]);
            }
        }
    }

    #[test]
    fn prop_aggregate_count_sums_to_input_len(
        zones in prop::collection::vec(prop::sample::select(vec!["N", "S", "E", ""]), 0..50),
    ) {
        let rows: Vec<_> = support::records(zones.iter().map(|z| json!({"zone": z})).collect());
        let total: f64 = aggregate(&rows, "zone", "n", ReduceOp::Count)
            .iter()
            .map(|a| a.value)
            .sum();
        prop_assert_eq!(total, zones.len() as f64);
    }

    #[test]
    fn prop_colour_stays_between_endpoints(ratio in -5.0..5.0f64) {
        let c = color_for_occupancy(ratio);
        prop_assert!((0x28..=0xdc).contains(&c.r));
        prop_assert!((0x35..=0xa7).contains(&c.g));
        prop_assert_eq!(c.b, 0x45);
    }

    #[test]
    fn prop_projection_is_finite(points in prop::collection::vec(arb_point(), 0..30)) {
        let layout = project(&points, 800.0, 500.0, 24.0);
        prop_assert!(layout.points.len() <= points.len());
        for p in &layout.points {
            prop_assert!(p.canvas_x.is_finite() && p.canvas_y.is_finite());
            prop_assert!(p.canvas_x >= 0.0 && p.canvas_x <= layout.canvas_width);
            prop_assert!(p.canvas_y >= 0.0 && p.canvas_y <= layout.canvas_height);
            prop_assert!((4.0..=14.0).contains(&p.radius));
            prop_assert!((0.0..=1.0).contains(&p.color_intensity));
        }
    }

    #[test]
    fn prop_rank_scores_ascending(
        rows in prop::collection::vec((0.0..500.0f64, 0.0..200.0f64, 0.0..1.0f64), 0..20),
        k in 0usize..10,
    ) {
        let candidates: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, (cost, eta, risk))| support::candidate(&format!("C{}", i), "std", *cost, *eta, *risk))
            .collect();
        let ranked = rank(&candidates, k);
        prop_assert_eq!(ranked.len(), k.min(candidates.len()));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score <= pair[1].score);
        }
        for (i, r) in ranked.iter().enumerate() {
            prop_assert_eq!(r.rank, i + 1);
            prop_assert!(r.score >= 0.0 && r.score <= 1.0 + 1e-12);
        }
    }
}
