use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::models::Record;

// =========================================================
// Storage map types
// =========================================================

/// Raw response of the warehouse map endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageMapPayload {
    #[serde(default, deserialize_with = "crate::payload::records")]
    pub items: Vec<Record>,
}

/// An 8-bit RGB colour, serialized as `#rrggbb`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid colour '{}': expected #rrggbb", s));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// How storage points were placed on the canvas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionStrategy {
    /// Warehouse floor coordinates (`x`, `y`).
    Cartesian,
    /// Geographic coordinates (`lon` -> x, `lat` -> y).
    Geographic,
    /// Row-major grid in input order.
    Grid,
}

/// A storage point placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPoint {
    pub key: String,
    pub canvas_x: f64,
    pub canvas_y: f64,
    pub radius: f64,
    /// Occupancy clamped to [0, 1].
    pub color_intensity: f64,
    pub color: Rgb,
}

/// Result of a projection: placed points and the canvas they fit in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedLayout {
    pub strategy: ProjectionStrategy,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub points: Vec<ProjectedPoint>,
}

/// Route function name constant
pub const GET_STORAGE_MAP: &str = "get_storage_map";
