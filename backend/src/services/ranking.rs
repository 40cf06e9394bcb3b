//! Composite scoring and ranking of carrier/service candidates.

use crate::api::{CarrierCandidate, RankedCandidate};
use crate::config::ScoreWeights;

/// Min-max scaler over one candidate attribute.
///
/// Bounds are halved so the span of any finite range stays finite.
struct MinMax {
    half_min: f64,
    half_span: f64,
}

impl MinMax {
    fn fit(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        Self {
            half_min: min / 2.0,
            half_span: max / 2.0 - min / 2.0,
        }
    }

    /// Scaled value in `[0, 1]`; 0 for every value when the span is zero.
    fn scale(&self, value: f64) -> f64 {
        if !(self.half_span.is_finite() && self.half_span > 0.0) {
            return 0.0;
        }
        let t = (value / 2.0 - self.half_min) / self.half_span;
        if t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn clamp_risk(risk: f64) -> f64 {
    if risk.is_nan() {
        0.0
    } else {
        risk.clamp(0.0, 1.0)
    }
}

/// Rank `candidates` with the default weights and keep the best `k`.
pub fn rank(candidates: &[CarrierCandidate], k: usize) -> Vec<RankedCandidate> {
    rank_with_weights(candidates, k, &ScoreWeights::default())
}

/// Rank `candidates` by weighted composite score, lowest first, keeping the best `k`.
///
/// Cost and ETA are min-max scaled across the whole candidate set before
/// weighting; risk is used as-is, clamped to `[0, 1]`. Candidates with equal
/// scores keep their input order.
pub fn rank_with_weights(
    candidates: &[CarrierCandidate],
    k: usize,
    weights: &ScoreWeights,
) -> Vec<RankedCandidate> {
    if candidates.is_empty() || k == 0 {
        return Vec::new();
    }

    let cost = MinMax::fit(candidates.iter().map(|c| finite_or_zero(c.predicted_cost)));
    let eta = MinMax::fit(
        candidates
            .iter()
            .map(|c| finite_or_zero(c.predicted_eta_hours)),
    );

    let mut scored: Vec<RankedCandidate> = candidates
        .iter()
        .map(|c| {
            let predicted_cost = finite_or_zero(c.predicted_cost);
            let predicted_eta_hours = finite_or_zero(c.predicted_eta_hours);
            let risk = clamp_risk(c.risk);
            let cost_score = cost.scale(predicted_cost);
            let eta_score = eta.scale(predicted_eta_hours);
            RankedCandidate {
                rank: 0,
                carrier: c.carrier.clone(),
                service_level: c.service_level.clone(),
                predicted_cost,
                predicted_eta_hours,
                risk,
                cost_score,
                eta_score,
                score: weights.cost * cost_score + weights.eta * eta_score + weights.risk * risk,
            }
        })
        .collect();

    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored.truncate(k);
    for (i, candidate) in scored.iter_mut().enumerate() {
        candidate.rank = i + 1;
    }

    log::debug!(
        "Ranked {} carrier candidates, kept {}",
        candidates.len(),
        scored.len()
    );
    scored
}

impl RankedCandidate {
    /// One-line recommendation text for this candidate.
    pub fn headline(&self) -> String {
        format!(
            "{} / {} (ETA ~ {:.1} h, cost ~ {:.0}, risk {:.0}%)",
            self.carrier,
            self.service_level,
            self.predicted_eta_hours,
            self.predicted_cost,
            self.risk * 100.0
        )
    }
}

/// Headline of the best-ranked candidate, if any.
pub fn headline(ranked: &[RankedCandidate]) -> Option<String> {
    ranked.first().map(RankedCandidate::headline)
}
