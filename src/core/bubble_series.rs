use serde::{Deserialize, Serialize};

use crate::core::segment::{Segment, SegmentData, SegmentGeometry};
use crate::core::segment_builder::SegmentContext;
use crate::core::series::SeriesPoint;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleSettings {
    #[serde(default = "default_minimum_radius")]
    pub minimum_radius: f64,
    #[serde(default = "default_maximum_radius")]
    pub maximum_radius: f64,
}

fn default_minimum_radius() -> f64 {
    10.0
}

fn default_maximum_radius() -> f64 {
    30.0
}

impl Default for BubbleSettings {
    fn default() -> Self {
        Self {
            minimum_radius: default_minimum_radius(),
            maximum_radius: default_maximum_radius(),
        }
    }
}

impl BubbleSettings {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.minimum_radius.is_finite()
            || !self.maximum_radius.is_finite()
            || self.minimum_radius < 0.0
            || self.maximum_radius < self.minimum_radius
        {
            return Err(ChartError::InvalidConfig(
                "bubble radii must be finite with 0 <= minimum <= maximum".to_owned(),
            ));
        }
        Ok(())
    }

    /// Radius for `size` relative to the largest size of the series.
    #[must_use]
    pub fn radius_for(&self, size: f64, max_size: f64) -> f64 {
        if !size.is_finite() || !max_size.is_finite() || max_size <= 0.0 {
            return self.minimum_radius;
        }
        let ratio = (size.abs() / max_size).clamp(0.0, 1.0);
        self.minimum_radius + ratio * (self.maximum_radius - self.minimum_radius)
    }
}

#[must_use]
pub fn create_segments(x_values: &[f64], y_values: &[f64], points: &[SeriesPoint]) -> Vec<Segment> {
    x_values
        .iter()
        .zip(y_values)
        .zip(points)
        .enumerate()
        .map(|(index, ((x, y), point))| {
            let empty = !x.is_finite() || !y.is_finite() || !point.size.is_finite();
            Segment::new(
                index,
                SegmentData::Bubble {
                    x: *x,
                    y: *y,
                    size: point.size,
                },
                empty,
            )
        })
        .collect()
}

pub fn layout(segments: &mut [Segment], ctx: &SegmentContext<'_>, settings: &BubbleSettings) {
    let max_size = segments
        .iter()
        .filter(|segment| !segment.empty)
        .filter_map(|segment| match segment.data {
            SegmentData::Bubble { size, .. } => Some(size.abs()),
            _ => None,
        })
        .fold(0.0, f64::max);

    for segment in segments {
        let SegmentData::Bubble { x, y, size } = segment.data else {
            continue;
        };
        segment.geometry = match ctx.transform {
            Some(transform) if !segment.empty => {
                let center = transform.transform(x, y);
                let radius = settings.radius_for(size, max_size);
                if center.is_finite() {
                    SegmentGeometry::Ellipse {
                        center,
                        radius_x: radius,
                        radius_y: radius,
                    }
                } else {
                    SegmentGeometry::Empty
                }
            }
            _ => SegmentGeometry::Empty,
        };
    }
}
