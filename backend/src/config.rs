//! Analytics configuration file support.
//!
//! This module reads the tunable parameters of the aggregation components
//! (projection canvas and palette, ranking weights, fast zone, zone thresholds,
//! transport field names) from a TOML file. Every field has a default, so an
//! empty file and a missing file both yield a usable configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::Rgb;
use crate::error::{AnalyticsError, AnalyticsResult, ErrorContext};

/// Environment variable holding an explicit configuration file path.
pub const CONFIG_PATH_ENV: &str = "LOGIOPS_ANALYTICS_CONFIG";

/// Analytics configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub projection: ProjectionSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub flows: FlowSettings,
    #[serde(default)]
    pub zones: ZoneSettings,
    #[serde(default)]
    pub transport: TransportSettings,
}

/// Storage map projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    #[serde(default = "default_radius_base")]
    pub radius_base: f64,
    #[serde(default = "default_radius_max_bonus")]
    pub radius_max_bonus: f64,
    #[serde(default = "default_radius_divisor")]
    pub radius_divisor: f64,
    #[serde(default = "default_low_color")]
    pub low_color: Rgb,
    #[serde(default = "default_high_color")]
    pub high_color: Rgb,
}

/// Composite score weights for carrier ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_cost_weight")]
    pub cost: f64,
    #[serde(default = "default_eta_weight")]
    pub eta: f64,
    #[serde(default = "default_risk_weight")]
    pub risk: f64,
}

/// Carrier recommendation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSettings {
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default = "default_ranking_top_k")]
    pub top_k: usize,
}

/// Slotting flow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSettings {
    #[serde(default = "default_fast_zone")]
    pub fast_zone: String,
    #[serde(default = "default_flows_top_k")]
    pub top_k: usize,
}

/// Zone status thresholds, as occupancy ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSettings {
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,
}

/// Field names of the transport chart records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSettings {
    #[serde(default = "default_zone_field")]
    pub zone_field: String,
    #[serde(default = "default_carrier_field")]
    pub carrier_field: String,
    #[serde(default = "default_cost_field")]
    pub cost_field: String,
}

fn default_canvas_width() -> f64 {
    800.0
}

fn default_canvas_height() -> f64 {
    500.0
}

fn default_padding() -> f64 {
    24.0
}

fn default_grid_columns() -> usize {
    10
}

fn default_cell_size() -> f64 {
    48.0
}

fn default_radius_base() -> f64 {
    4.0
}

fn default_radius_max_bonus() -> f64 {
    10.0
}

fn default_radius_divisor() -> f64 {
    5.0
}

fn default_low_color() -> Rgb {
    Rgb::new(0x28, 0xa7, 0x45)
}

fn default_high_color() -> Rgb {
    Rgb::new(0xdc, 0x35, 0x45)
}

fn default_cost_weight() -> f64 {
    0.5
}

fn default_eta_weight() -> f64 {
    0.3
}

fn default_risk_weight() -> f64 {
    0.2
}

fn default_ranking_top_k() -> usize {
    3
}

fn default_fast_zone() -> String {
    "A".to_string()
}

fn default_flows_top_k() -> usize {
    5
}

fn default_alert_threshold() -> f64 {
    0.80
}

fn default_critical_threshold() -> f64 {
    0.90
}

fn default_zone_field() -> String {
    "destination_zone".to_string()
}

fn default_carrier_field() -> String {
    "carrier".to_string()
}

fn default_cost_field() -> String {
    "cost_eur".to_string()
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            padding: default_padding(),
            grid_columns: default_grid_columns(),
            cell_size: default_cell_size(),
            radius_base: default_radius_base(),
            radius_max_bonus: default_radius_max_bonus(),
            radius_divisor: default_radius_divisor(),
            low_color: default_low_color(),
            high_color: default_high_color(),
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            cost: default_cost_weight(),
            eta: default_eta_weight(),
            risk: default_risk_weight(),
        }
    }
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            top_k: default_ranking_top_k(),
        }
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            fast_zone: default_fast_zone(),
            top_k: default_flows_top_k(),
        }
    }
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            alert_threshold: default_alert_threshold(),
            critical_threshold: default_critical_threshold(),
        }
    }
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            zone_field: default_zone_field(),
            carrier_field: default_carrier_field(),
            cost_field: default_cost_field(),
        }
    }
}

fn invalid(entity: &str, message: impl Into<String>) -> AnalyticsError {
    AnalyticsError::configuration_with_context(
        message,
        ErrorContext::new("validate_config").with_entity(entity),
    )
}

impl AnalyticsConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AnalyticsResult<Self> {
        let config: AnalyticsConfig = toml::from_str(content).map_err(|e| {
            AnalyticsError::configuration_with_context(
                format!("Failed to parse config: {}", e),
                ErrorContext::new("parse_config"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load analytics configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AnalyticsConfig)` if successful
    /// * `Err(AnalyticsError)` if file cannot be read, parsed, or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AnalyticsError::io(
                e,
                ErrorContext::new("read_config").with_entity(path.display().to_string()),
            )
        })?;

        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded analytics config from {}", path.display());
        Ok(config)
    }

    /// Load analytics configuration from the default location.
    ///
    /// Searches for `analytics.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(AnalyticsConfig)` if found and parsed successfully
    /// * `Err(AnalyticsError)` if no config file found or parse error
    pub fn from_default_location() -> AnalyticsResult<Self> {
        match Self::default_path() {
            Some(path) => Self::from_file(&path),
            None => Err(AnalyticsError::configuration(
                "No analytics.toml found in standard locations",
            )),
        }
    }

    fn default_path() -> Option<PathBuf> {
        [
            PathBuf::from("analytics.toml"),
            PathBuf::from("backend/analytics.toml"),
            PathBuf::from("../analytics.toml"),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Resolve the configuration the way the CLI does.
    ///
    /// An explicit path in `LOGIOPS_ANALYTICS_CONFIG` must load; otherwise the
    /// default locations are tried, and built-in defaults are used when none
    /// exists. A file that exists but is invalid is always an error.
    pub fn from_env() -> AnalyticsResult<Self> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Self::from_file(path.trim());
            }
        }
        if Self::default_path().is_some() {
            return Self::from_default_location();
        }
        log::debug!("No analytics.toml found, using built-in defaults");
        Ok(Self::default())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let p = &self.projection;
        if !(p.canvas_width.is_finite() && p.canvas_width >= 0.0)
            || !(p.canvas_height.is_finite() && p.canvas_height >= 0.0)
        {
            return Err(invalid("projection", "Canvas size must be non-negative"));
        }
        if !(p.padding.is_finite() && p.padding >= 0.0) {
            return Err(invalid("projection.padding", "Padding must be non-negative"));
        }
        if p.grid_columns == 0 {
            return Err(invalid("projection.grid_columns", "Grid needs at least one column"));
        }
        if !(p.cell_size.is_finite() && p.cell_size > 0.0) {
            return Err(invalid("projection.cell_size", "Cell size must be positive"));
        }
        if !(p.radius_divisor.is_finite() && p.radius_divisor > 0.0) {
            return Err(invalid("projection.radius_divisor", "Radius divisor must be positive"));
        }
        if !(p.radius_base >= 0.0 && p.radius_max_bonus >= 0.0) {
            return Err(invalid("projection", "Radius base and bonus must be non-negative"));
        }

        let w = &self.ranking.weights;
        if [w.cost, w.eta, w.risk].iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(invalid("ranking.weights", "Weights must be non-negative"));
        }
        if w.cost + w.eta + w.risk <= 0.0 {
            return Err(invalid("ranking.weights", "At least one weight must be positive"));
        }

        if self.flows.fast_zone.trim().is_empty() {
            return Err(invalid("flows.fast_zone", "Fast zone must not be empty"));
        }

        let z = &self.zones;
        if !(0.0..=z.critical_threshold).contains(&z.alert_threshold) {
            return Err(invalid(
                "zones",
                format!(
                    "Thresholds must satisfy 0 <= alert ({}) <= critical ({})",
                    z.alert_threshold, z.critical_threshold
                ),
            ));
        }

        Ok(())
    }
}
