//! # LogiOps Analytics
//!
//! Aggregation and ranking layer of the LogiOps logistics dashboard.
//!
//! This crate turns the loosely typed JSON rows returned by the dashboard API
//! into ready-to-render views: chart series, product flow rankings, warehouse
//! map layouts and carrier recommendations.
//!
//! ## Features
//!
//! - **Aggregation**: group-by count/sum/avg over raw records
//! - **Flows**: top-N products moving into or out of a storage zone
//! - **Projection**: storage points placed on a canvas from floor or geographic
//!   coordinates, with a grid fallback
//! - **Ranking**: weighted composite scoring of carrier/service candidates
//! - **Zones**: zone occupancy and warehouse storage indicators
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for the rendered views
//! - [`models`]: raw record access and typed input records
//! - [`payload`]: decoding of endpoint payloads
//! - [`services`]: the aggregation components and view assembly
//! - [`routes`]: endpoint-specific payload and view types
//! - [`config`]: TOML configuration of canvas, weights and thresholds
//!
//! ## Example
//!
//! ```
//! use logiops_analytics::api::Aggregate;
//! use logiops_analytics::services::{aggregate, ReduceOp};
//! use serde_json::json;
//!
//! let rows: Vec<_> = [json!({"z": "X", "v": 2}), json!({"z": "Y", "v": 3}), json!({"z": "X", "v": 4})]
//!     .into_iter()
//!     .filter_map(|v| v.as_object().cloned())
//!     .collect();
//!
//! let totals = aggregate(&rows, "z", "v", ReduceOp::Sum);
//! assert_eq!(totals, vec![Aggregate::new("X", 6.0), Aggregate::new("Y", 3.0)]);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod payload;
pub mod routes;
pub mod services;

pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, AnalyticsResult, ErrorContext};
pub use payload::{Payload, PayloadKind};
