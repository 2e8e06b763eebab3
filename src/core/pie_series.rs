//! Pie and doughnut slices.
//!
//! Angles are degrees measured clockwise from 3 o'clock (screen y grows
//! downward). A start angle above the end angle sweeps counter-clockwise.

use serde::{Deserialize, Serialize};

use crate::core::segment::{Segment, SegmentData, SegmentGeometry};
use crate::core::transform::{PolarStartAngle, polar_angle_to_point};
use crate::core::types::{Point, Rect};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularSettings {
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default = "default_end_angle")]
    pub end_angle: f64,
    /// Outer radius as a fraction of half the smaller plot side.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Inner radius as a fraction of the outer radius (0 for pies).
    #[serde(default)]
    pub inner_radius: f64,
    #[serde(default)]
    pub explode_index: Option<usize>,
    #[serde(default)]
    pub explode_all: bool,
    #[serde(default = "default_explode_radius")]
    pub explode_radius: f64,
}

fn default_end_angle() -> f64 {
    360.0
}

fn default_radius() -> f64 {
    0.8
}

fn default_explode_radius() -> f64 {
    10.0
}

impl Default for CircularSettings {
    fn default() -> Self {
        Self::pie()
    }
}

impl CircularSettings {
    #[must_use]
    pub fn pie() -> Self {
        Self {
            start_angle: 0.0,
            end_angle: default_end_angle(),
            radius: default_radius(),
            inner_radius: 0.0,
            explode_index: None,
            explode_all: false,
            explode_radius: default_explode_radius(),
        }
    }

    #[must_use]
    pub fn doughnut() -> Self {
        Self {
            inner_radius: 0.4,
            ..Self::pie()
        }
    }

    #[must_use]
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    #[must_use]
    pub fn with_explode_index(mut self, index: usize) -> Self {
        self.explode_index = Some(index);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.start_angle.is_finite() || !self.end_angle.is_finite() {
            return Err(ChartError::InvalidConfig(
                "circular angles must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 || self.radius > 1.0 {
            return Err(ChartError::InvalidConfig(
                "circular radius must be in (0, 1]".to_owned(),
            ));
        }
        if !self.inner_radius.is_finite() || !(0.0..1.0).contains(&self.inner_radius) {
            return Err(ChartError::InvalidConfig(
                "circular inner radius must be in [0, 1)".to_owned(),
            ));
        }
        if !self.explode_radius.is_finite() || self.explode_radius < 0.0 {
            return Err(ChartError::InvalidConfig(
                "explode radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Signed sweep of the whole series, clamped to one turn.
    #[must_use]
    pub fn total_sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).clamp(-360.0, 360.0)
    }

    fn is_exploded(&self, index: usize) -> bool {
        self.explode_all || self.explode_index == Some(index)
    }
}

/// Running angular offsets: each slice takes its share of `|y|`.
#[must_use]
pub fn create_segments(y_values: &[f64], settings: &CircularSettings) -> Vec<Segment> {
    let total: f64 = y_values
        .iter()
        .filter(|value| value.is_finite())
        .map(|value| value.abs())
        .sum();
    let sweep = settings.total_sweep();
    let mut angle = settings.start_angle;

    y_values
        .iter()
        .enumerate()
        .map(|(index, y)| {
            let share = if y.is_finite() && total > 0.0 {
                y.abs() / total
            } else {
                0.0
            };
            let start_angle = angle;
            let end_angle = angle + share * sweep;
            angle = end_angle;
            Segment::new(
                index,
                SegmentData::Slice {
                    y: *y,
                    start_angle,
                    end_angle,
                },
                !y.is_finite(),
            )
        })
        .collect()
}

/// Outer radius of the series inside `plot`.
#[must_use]
pub fn outer_radius(plot: Rect, settings: &CircularSettings) -> f64 {
    plot.width.min(plot.height).max(0.0) / 2.0 * settings.radius
}

pub fn layout(segments: &mut [Segment], plot: Rect, settings: &CircularSettings) {
    let center = plot.center();
    let radius = outer_radius(plot, settings);
    let inner_radius = radius * settings.inner_radius;

    for segment in segments {
        let SegmentData::Slice {
            start_angle,
            end_angle,
            ..
        } = segment.data
        else {
            continue;
        };
        if segment.empty || !center.is_finite() || radius <= 0.0 {
            segment.geometry = SegmentGeometry::Empty;
            continue;
        }
        let slice_center = if settings.is_exploded(segment.index) {
            explode_center(center, start_angle, end_angle, settings.explode_radius)
        } else {
            center
        };
        segment.geometry = SegmentGeometry::Slice {
            center: slice_center,
            start_angle,
            end_angle,
            inner_radius,
            radius,
        };
    }
}

/// Centre pushed outward along the slice's mid angle.
#[must_use]
pub fn explode_center(center: Point, start_angle: f64, end_angle: f64, distance: f64) -> Point {
    let mid = (start_angle + end_angle) / 2.0;
    polar_angle_to_point(center, distance, mid, PolarStartAngle::Rotate0)
}
