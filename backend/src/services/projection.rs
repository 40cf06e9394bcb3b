//! Spatial projection of storage points onto the warehouse map canvas.
//!
//! Points are placed by the best coordinate system available in the payload:
//! warehouse floor `x`/`y`, then geographic `lon`/`lat`, then a row-major grid
//! in input order. Each point also gets a radius from its location count and
//! a colour from its occupancy.

use crate::api::{ProjectedLayout, ProjectedPoint, ProjectionStrategy, Rgb, StoragePoint};
use crate::config::ProjectionSettings;

/// Colour of an empty storage point.
pub const LOW_OCCUPANCY_COLOR: Rgb = Rgb::new(0x28, 0xa7, 0x45);
/// Colour of a full storage point.
pub const HIGH_OCCUPANCY_COLOR: Rgb = Rgb::new(0xdc, 0x35, 0x45);

impl ProjectionStrategy {
    /// Pick the strategy for a set of points.
    ///
    /// A coordinate system is used only when at least two points carry it.
    pub fn select(points: &[StoragePoint]) -> Self {
        let cartesian = points.iter().filter(|p| p.xy().is_some()).count();
        if cartesian >= 2 {
            return ProjectionStrategy::Cartesian;
        }
        let geographic = points.iter().filter(|p| p.lon_lat().is_some()).count();
        if geographic >= 2 {
            return ProjectionStrategy::Geographic;
        }
        ProjectionStrategy::Grid
    }
}

/// Project `points` onto a `canvas_width` x `canvas_height` canvas with default styling.
pub fn project(
    points: &[StoragePoint],
    canvas_width: f64,
    canvas_height: f64,
    padding: f64,
) -> ProjectedLayout {
    let settings = ProjectionSettings {
        canvas_width,
        canvas_height,
        padding,
        ..ProjectionSettings::default()
    };
    project_with(points, &settings)
}

/// Project `points` using the canvas and styling in `settings`.
pub fn project_with(points: &[StoragePoint], settings: &ProjectionSettings) -> ProjectedLayout {
    let width = non_negative(settings.canvas_width);
    let height = non_negative(settings.canvas_height);
    let padding = non_negative(settings.padding);
    let strategy = ProjectionStrategy::select(points);

    let layout = match strategy {
        ProjectionStrategy::Cartesian => {
            let placed = scale_into_canvas(points, StoragePoint::xy, width, height, padding, settings);
            ProjectedLayout {
                strategy,
                canvas_width: width,
                canvas_height: height,
                points: placed,
            }
        }
        ProjectionStrategy::Geographic => {
            let placed =
                scale_into_canvas(points, StoragePoint::lon_lat, width, height, padding, settings);
            ProjectedLayout {
                strategy,
                canvas_width: width,
                canvas_height: height,
                points: placed,
            }
        }
        ProjectionStrategy::Grid => layout_grid(points, width, height, padding, settings),
    };

    let dropped = points.len() - layout.points.len();
    if dropped > 0 {
        log::warn!(
            "{} storage point(s) without {:?} coordinates left off the map",
            dropped,
            strategy
        );
    }
    log::debug!(
        "Projected {} storage points with {:?} strategy on {}x{} canvas",
        layout.points.len(),
        strategy,
        layout.canvas_width,
        layout.canvas_height
    );

    layout
}

/// Extent of one axis, held as half-values so any finite range has a finite span.
struct AxisRange {
    half_min: f64,
    half_span: f64,
}

impl AxisRange {
    fn fit(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        Self {
            half_min: min / 2.0,
            half_span: max / 2.0 - min / 2.0,
        }
    }

    /// Position of `value` within the axis, in `[0, 1]`; 0 on a zero span.
    fn unit(&self, value: f64) -> f64 {
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

fn scale_into_canvas(
    points: &[StoragePoint],
    coords: fn(&StoragePoint) -> Option<(f64, f64)>,
    width: f64,
    height: f64,
    padding: f64,
    settings: &ProjectionSettings,
) -> Vec<ProjectedPoint> {
    let located: Vec<(usize, &StoragePoint, (f64, f64))> = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| coords(p).map(|c| (i, p, c)))
        .collect();

    let x_axis = AxisRange::fit(located.iter().map(|(_, _, (x, _))| *x));
    let y_axis = AxisRange::fit(located.iter().map(|(_, _, (_, y))| *y));
    let inner_w = (width - 2.0 * padding).max(0.0);
    let inner_h = (height - 2.0 * padding).max(0.0);

    located
        .into_iter()
        .map(|(index, point, (x, y))| {
            let canvas_x = padding + x_axis.unit(x) * inner_w;
            // screen Y grows downward
            let canvas_y = (height - padding) - y_axis.unit(y) * inner_h;
            styled_point(point, index, canvas_x, canvas_y, settings)
        })
        .collect()
}

fn layout_grid(
    points: &[StoragePoint],
    width: f64,
    height: f64,
    padding: f64,
    settings: &ProjectionSettings,
) -> ProjectedLayout {
    let columns = settings.grid_columns.max(1);
    let cell = if settings.cell_size.is_finite() && settings.cell_size > 0.0 {
        settings.cell_size
    } else {
        1.0
    };

    let used_columns = points.len().min(columns);
    let rows = points.len().div_ceil(columns);
    let canvas_width = width.max(2.0 * padding + used_columns as f64 * cell);
    let canvas_height = height.max(2.0 * padding + rows as f64 * cell);

    let placed = points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let col = (index % columns) as f64;
            let row = (index / columns) as f64;
            let canvas_x = padding + col * cell + cell / 2.0;
            let canvas_y = padding + row * cell + cell / 2.0;
            styled_point(point, index, canvas_x, canvas_y, settings)
        })
        .collect();

    ProjectedLayout {
        strategy: ProjectionStrategy::Grid,
        canvas_width,
        canvas_height,
        points: placed,
    }
}

fn styled_point(
    point: &StoragePoint,
    index: usize,
    canvas_x: f64,
    canvas_y: f64,
    settings: &ProjectionSettings,
) -> ProjectedPoint {
    let intensity = clamp_unit(point.occupancy_ratio);
    ProjectedPoint {
        key: point.display_key(index),
        canvas_x,
        canvas_y,
        radius: radius_with(
            point.location_count,
            settings.radius_base,
            settings.radius_max_bonus,
            settings.radius_divisor,
        ),
        color_intensity: intensity,
        color: interpolate_color(settings.low_color, settings.high_color, intensity),
    }
}

/// Marker radius for a storage point holding `location_count` locations (4..=14).
pub fn radius_for_count(location_count: f64) -> f64 {
    let defaults = ProjectionSettings::default();
    radius_with(
        location_count,
        defaults.radius_base,
        defaults.radius_max_bonus,
        defaults.radius_divisor,
    )
}

fn radius_with(location_count: f64, base: f64, max_bonus: f64, divisor: f64) -> f64 {
    let count = non_negative(location_count);
    let bonus = if divisor > 0.0 { count / divisor } else { 0.0 };
    non_negative(base) + bonus.min(non_negative(max_bonus))
}

/// Colour for an occupancy ratio on the default green-to-red scale.
pub fn color_for_occupancy(ratio: f64) -> Rgb {
    interpolate_color(LOW_OCCUPANCY_COLOR, HIGH_OCCUPANCY_COLOR, ratio)
}

/// Linear per-channel interpolation between `low` and `high`.
///
/// `ratio` is clamped to `[0, 1]`; NaN reads as 0.
pub fn interpolate_color(low: Rgb, high: Rgb, ratio: f64) -> Rgb {
    let t = clamp_unit(ratio);
    let channel = |a: u8, b: u8| {
        let v = a as f64 + (b as f64 - a as f64) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(
        channel(low.r, high.r),
        channel(low.g, high.g),
        channel(low.b, high.b),
    )
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
