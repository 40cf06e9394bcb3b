//! Service layer: the aggregation and ranking components.
//!
//! Every service is a pure, synchronous function over typed records. Services
//! never fail; malformed inputs degrade to defaults. [`dashboard`] composes
//! them into the per-endpoint views.

pub mod aggregation;
pub mod dashboard;
pub mod flows;
pub mod projection;
pub mod ranking;
pub mod zones;

pub use aggregation::{aggregate, top_n, ReduceOp};
pub use dashboard::{
    build_view, carrier_view, slotting_view, storage_map_view, transport_view, zones_view,
};
pub use flows::{top_flows, FlowDirection};
pub use projection::{
    color_for_occupancy, interpolate_color, project, project_with, radius_for_count,
};
pub use ranking::{headline, rank, rank_with_weights};
pub use zones::{infer_zone, storage_kpis, zone_occupancy, zone_status};
