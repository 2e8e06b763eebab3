use serde::{Deserialize, Serialize};

use crate::core::segment::{Segment, SegmentData, SegmentGeometry};
use crate::core::segment_builder::SegmentContext;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSettings {
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

fn default_stroke_width() -> f64 {
    2.0
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            stroke_width: default_stroke_width(),
        }
    }
}

impl LineSettings {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ChartError::InvalidConfig(
                "stroke width must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// One segment per consecutive pair; a NaN end empties the segment.
#[must_use]
pub fn create_segments(x_values: &[f64], y_values: &[f64]) -> Vec<Segment> {
    let count = x_values.len().min(y_values.len());
    (1..count)
        .map(|index| {
            let (x1, y1) = (x_values[index - 1], y_values[index - 1]);
            let (x2, y2) = (x_values[index], y_values[index]);
            let empty = [x1, y1, x2, y2].iter().any(|value| !value.is_finite());
            Segment::new(index - 1, SegmentData::Pair { x1, y1, x2, y2 }, empty)
        })
        .collect()
}

pub fn layout(segments: &mut [Segment], ctx: &SegmentContext<'_>) {
    for segment in segments {
        let SegmentData::Pair { x1, y1, x2, y2 } = segment.data else {
            continue;
        };
        segment.geometry = match ctx.transform {
            Some(transform) if !segment.empty => {
                let start = transform.transform(x1, y1);
                let end = transform.transform(x2, y2);
                if start.is_finite() && end.is_finite() {
                    SegmentGeometry::Line { start, end }
                } else {
                    SegmentGeometry::Empty
                }
            }
            _ => SegmentGeometry::Empty,
        };
    }
}
