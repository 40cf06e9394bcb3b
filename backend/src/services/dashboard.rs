//! Dashboard view assembly.
//!
//! Each dashboard endpoint payload is turned into its view by decoding the
//! raw rows into typed records and running the matching components with the
//! configured parameters.

use crate::api::{
    CarrierCandidate, CarrierRecommendationPayload, CarrierRecommendationView, DashboardView,
    LocationStock, LocationStockPayload, MoveRecord, ProjectedLayout, SlottingPayload,
    SlottingSummary, SlottingView, StorageMapPayload, StoragePoint, TransportChartsPayload,
    TransportChartsView, ZonesView,
};
use crate::config::{
    AnalyticsConfig, FlowSettings, ProjectionSettings, RankingSettings, TransportSettings,
    ZoneSettings,
};
use crate::payload::Payload;
use crate::services::aggregation::{aggregate, ReduceOp};
use crate::services::flows::{top_flows, FlowDirection};
use crate::services::projection::project_with;
use crate::services::ranking::{headline, rank_with_weights};
use crate::services::zones::{storage_kpis, zone_occupancy};

/// Shipment counts per destination zone and average cost per carrier.
pub fn transport_view(
    payload: &TransportChartsPayload,
    settings: &TransportSettings,
) -> TransportChartsView {
    let deliveries_by_zone = aggregate(
        &payload.deliveries_by_zone,
        &settings.zone_field,
        &settings.cost_field,
        ReduceOp::Count,
    );
    let avg_cost_by_carrier = aggregate(
        &payload.avg_cost_by_carrier,
        &settings.carrier_field,
        &settings.cost_field,
        ReduceOp::Avg,
    );
    log::debug!(
        "Transport view: {} zones, {} carriers",
        deliveries_by_zone.len(),
        avg_cost_by_carrier.len()
    );
    TransportChartsView {
        deliveries_by_zone,
        avg_cost_by_carrier,
    }
}

/// Top products entering and leaving the fast zone.
pub fn slotting_view(payload: &SlottingPayload, settings: &FlowSettings) -> SlottingView {
    let moves: Vec<MoveRecord> = payload.sample.iter().map(MoveRecord::from_record).collect();
    let zone = settings.fast_zone.as_str();
    let summary = SlottingSummary::from_record(&payload.summary);
    SlottingView {
        fast_zone: settings.fast_zone.clone(),
        fast_fill_ratio: summary.fill_ratio_after(),
        summary,
        top_inbound: top_flows(&moves, FlowDirection::In, zone, settings.top_k),
        top_outbound: top_flows(&moves, FlowDirection::Out, zone, settings.top_k),
    }
}

/// Warehouse map layout.
pub fn storage_map_view(
    payload: &StorageMapPayload,
    settings: &ProjectionSettings,
) -> ProjectedLayout {
    let points: Vec<StoragePoint> = payload.items.iter().map(StoragePoint::from_record).collect();
    project_with(&points, settings)
}

/// Ranked carriers and the headline recommendation.
pub fn carrier_view(
    payload: &CarrierRecommendationPayload,
    settings: &RankingSettings,
) -> CarrierRecommendationView {
    let candidates: Vec<CarrierCandidate> = payload
        .top_k
        .iter()
        .map(CarrierCandidate::from_record)
        .collect();
    let ranked = rank_with_weights(&candidates, settings.top_k, &settings.weights);
    let headline = headline(&ranked);
    CarrierRecommendationView { ranked, headline }
}

/// Zone occupancy table and storage indicators.
pub fn zones_view(payload: &LocationStockPayload, settings: &ZoneSettings) -> ZonesView {
    let locations: Vec<LocationStock> =
        payload.items.iter().map(LocationStock::from_record).collect();
    let view = ZonesView {
        zones: zone_occupancy(&locations, settings),
        kpis: storage_kpis(&locations, settings),
    };
    log::debug!(
        "Zones view: {} locations in {} zones",
        locations.len(),
        view.zones.len()
    );
    view
}

/// Build the view for any decoded payload.
pub fn build_view(payload: &Payload, config: &AnalyticsConfig) -> DashboardView {
    match payload {
        Payload::Transport(p) => DashboardView::Transport(transport_view(p, &config.transport)),
        Payload::Slotting(p) => DashboardView::Slotting(slotting_view(p, &config.flows)),
        Payload::StorageMap(p) => {
            DashboardView::StorageMap(storage_map_view(p, &config.projection))
        }
        Payload::Carriers(p) => DashboardView::Carriers(carrier_view(p, &config.ranking)),
        Payload::Zones(p) => DashboardView::Zones(zones_view(p, &config.zones)),
    }
}
