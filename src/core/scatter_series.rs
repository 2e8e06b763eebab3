use serde::{Deserialize, Serialize};

use crate::core::segment::{Segment, SegmentData, SegmentGeometry};
use crate::core::segment_builder::SegmentContext;
use crate::error::{ChartError, ChartResult};

/// Marker size of scatter points in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterSettings {
    #[serde(default = "default_point_extent")]
    pub point_width: f64,
    #[serde(default = "default_point_extent")]
    pub point_height: f64,
}

fn default_point_extent() -> f64 {
    10.0
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            point_width: default_point_extent(),
            point_height: default_point_extent(),
        }
    }
}

impl ScatterSettings {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.point_width.is_finite()
            || !self.point_height.is_finite()
            || self.point_width <= 0.0
            || self.point_height <= 0.0
        {
            return Err(ChartError::InvalidConfig(
                "scatter point size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[must_use]
pub fn create_segments(x_values: &[f64], y_values: &[f64]) -> Vec<Segment> {
    x_values
        .iter()
        .zip(y_values)
        .enumerate()
        .map(|(index, (x, y))| {
            Segment::new(
                index,
                SegmentData::Xy { x: *x, y: *y },
                !x.is_finite() || !y.is_finite(),
            )
        })
        .collect()
}

pub fn layout(segments: &mut [Segment], ctx: &SegmentContext<'_>, settings: &ScatterSettings) {
    for segment in segments {
        let SegmentData::Xy { x, y } = segment.data else {
            continue;
        };
        segment.geometry = match ctx.transform {
            Some(transform) if !segment.empty => {
                let center = transform.transform(x, y);
                if center.is_finite() {
                    SegmentGeometry::Ellipse {
                        center,
                        radius_x: settings.point_width / 2.0,
                        radius_y: settings.point_height / 2.0,
                    }
                } else {
                    SegmentGeometry::Empty
                }
            }
            _ => SegmentGeometry::Empty,
        };
    }
}
