//! Pyramid and funnel slices stacked from the top of the plot.
//!
//! Slice extents are fractions of the plot height measured from the top,
//! so the same data phase serves both shapes.

use serde::{Deserialize, Serialize};

use crate::core::segment::{Segment, SegmentData, SegmentGeometry};
use crate::core::types::{Point, Rect};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangularSettings {
    /// Share of the height spent on gaps between slices.
    #[serde(default)]
    pub gap_ratio: f64,
    /// Funnel neck width as a fraction of the plot width.
    #[serde(default = "default_neck_ratio")]
    pub neck_width: f64,
    /// Funnel neck height as a fraction of the plot height.
    #[serde(default = "default_neck_ratio")]
    pub neck_height: f64,
}

fn default_neck_ratio() -> f64 {
    0.2
}

impl Default for TriangularSettings {
    fn default() -> Self {
        Self {
            gap_ratio: 0.0,
            neck_width: default_neck_ratio(),
            neck_height: default_neck_ratio(),
        }
    }
}

impl TriangularSettings {
    pub fn validate(&self) -> ChartResult<()> {
        for (label, value) in [
            ("gap ratio", self.gap_ratio),
            ("neck width", self.neck_width),
            ("neck height", self.neck_height),
        ] {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(ChartError::InvalidConfig(format!(
                    "{label} must be in [0, 1)"
                )));
            }
        }
        Ok(())
    }
}

/// Slice extents proportional to `|y|`, first point on top.
#[must_use]
pub fn create_segments(y_values: &[f64], settings: &TriangularSettings) -> Vec<Segment> {
    let total: f64 = y_values
        .iter()
        .filter(|value| value.is_finite())
        .map(|value| value.abs())
        .sum();
    let drawn = y_values.iter().filter(|value| value.is_finite()).count();
    let (gap, usable) = if drawn > 1 {
        (settings.gap_ratio / (drawn - 1) as f64, 1.0 - settings.gap_ratio)
    } else {
        (0.0, 1.0)
    };

    let mut top = 0.0;
    y_values
        .iter()
        .enumerate()
        .map(|(index, y)| {
            if !y.is_finite() || total <= 0.0 {
                return Segment::new(
                    index,
                    SegmentData::Triangular {
                        y: *y,
                        top,
                        bottom: top,
                    },
                    true,
                );
            }
            let bottom = top + y.abs() / total * usable;
            let segment = Segment::new(index, SegmentData::Triangular { y: *y, top, bottom }, false);
            top = bottom + gap;
            segment
        })
        .collect()
}

fn layout_with(segments: &mut [Segment], plot: Rect, width_at: impl Fn(f64) -> f64, breaks: &[f64]) {
    let center_x = plot.left + plot.width / 2.0;
    let y_at = |fraction: f64| plot.top + fraction * plot.height;

    for segment in segments {
        let SegmentData::Triangular { top, bottom, .. } = segment.data else {
            continue;
        };
        if segment.empty || !plot.is_finite() || plot.is_empty() {
            segment.geometry = SegmentGeometry::Empty;
            continue;
        }
        let mut fractions = vec![top];
        fractions.extend(breaks.iter().copied().filter(|value| *value > top && *value < bottom));
        fractions.push(bottom);

        let mut polygon: Vec<Point> = fractions
            .iter()
            .map(|fraction| Point::new(center_x - width_at(*fraction) / 2.0, y_at(*fraction)))
            .collect();
        polygon.extend(
            fractions
                .iter()
                .rev()
                .map(|fraction| Point::new(center_x + width_at(*fraction) / 2.0, y_at(*fraction))),
        );
        segment.geometry = SegmentGeometry::Polygon(polygon);
    }
}

/// Apex at the top centre, full width at the bottom.
pub fn layout_pyramid(segments: &mut [Segment], plot: Rect, _settings: &TriangularSettings) {
    let width = plot.width;
    layout_with(segments, plot, |fraction| width * fraction, &[]);
}

/// Full width at the top narrowing linearly to the neck, then straight down.
pub fn layout_funnel(segments: &mut [Segment], plot: Rect, settings: &TriangularSettings) {
    let width = plot.width;
    let neck_width = width * settings.neck_width;
    let neck_start = 1.0 - settings.neck_height;
    let width_at = move |fraction: f64| {
        if fraction >= neck_start || neck_start <= 0.0 {
            neck_width
        } else {
            width - (width - neck_width) * fraction / neck_start
        }
    };
    layout_with(segments, plot, width_at, &[neck_start]);
}
