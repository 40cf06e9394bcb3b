use serde::{Deserialize, Serialize};

use crate::models::Record;

// =========================================================
// Carrier recommendation types
// =========================================================

/// Raw response of the carrier recommendation endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarrierRecommendationPayload {
    #[serde(
        default,
        rename = "topK",
        alias = "top_k",
        alias = "candidates",
        deserialize_with = "crate::payload::records"
    )]
    pub top_k: Vec<Record>,
}

/// A carrier candidate with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub carrier: String,
    pub service_level: String,
    pub predicted_cost: f64,
    pub predicted_eta_hours: f64,
    pub risk: f64,
    /// Cost after min-max scaling across the candidate set.
    pub cost_score: f64,
    /// ETA after min-max scaling across the candidate set.
    pub eta_score: f64,
    /// Weighted composite; lower is better.
    pub score: f64,
}

/// Ranked carriers plus the one-line recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierRecommendationView {
    pub ranked: Vec<RankedCandidate>,
    pub headline: Option<String>,
}

/// Route function name constant
pub const GET_CARRIER_RECOMMENDATION: &str = "get_carrier_recommendation";
