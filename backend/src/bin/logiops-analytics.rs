//! LogiOps Analytics CLI
//!
//! Builds a dashboard view from a saved API payload and prints it as JSON.
//!
//! # Usage
//!
//! ```bash
//! logiops-analytics map storage_map.json
//! RUST_LOG=debug logiops-analytics carriers reco.json
//! ```
//!
//! Kinds: `transport`, `slotting`, `map`, `carriers`, `zones`.
//!
//! # Environment Variables
//!
//! - `LOGIOPS_ANALYTICS_CONFIG`: Path to an `analytics.toml` (default: search
//!   `analytics.toml`, `backend/analytics.toml`, `../analytics.toml`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use logiops_analytics::api::DashboardView;
use logiops_analytics::services::build_view;
use logiops_analytics::{AnalyticsConfig, Payload, PayloadKind};

const USAGE: &str = "usage: logiops-analytics <transport|slotting|map|carriers|zones> <payload.json>";

/// Report written to stdout: the view plus when it was generated.
#[derive(Serialize)]
struct Report {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    view: DashboardView,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (kind_arg, path) = match args.as_slice() {
        [kind, path] => (kind, path),
        _ => bail!(USAGE),
    };

    let kind: PayloadKind = kind_arg
        .parse()
        .with_context(|| format!("Invalid payload kind '{}'", kind_arg))?;
    let config = AnalyticsConfig::from_env().context("Failed to load analytics configuration")?;
    let payload = Payload::load(kind, path)
        .with_context(|| format!("Failed to load {} payload from {}", kind, path))?;

    info!("Building {} view from {}", kind, path);
    let report = Report {
        generated_at: Utc::now(),
        view: build_view(&payload, &config),
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}
