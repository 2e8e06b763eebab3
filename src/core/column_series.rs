use serde::{Deserialize, Serialize};

use crate::core::DoubleRange;
use crate::core::segment::{Segment, SegmentData, SegmentGeometry};
use crate::core::segment_builder::SegmentContext;
use crate::core::types::Rect;
use crate::error::{ChartError, ChartResult};

/// Shared slot settings of side-by-side kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSettings {
    /// Fraction of the x slot covered by all side-by-side series together.
    #[serde(default = "default_segment_width")]
    pub width: f64,
    /// Fraction of each series' share left empty between neighbours.
    #[serde(default)]
    pub spacing: f64,
}

pub(crate) fn default_segment_width() -> f64 {
    0.8
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            width: default_segment_width(),
            spacing: 0.0,
        }
    }
}

impl ColumnSettings {
    pub fn validate(&self) -> ChartResult<()> {
        validate_slot(self.width, self.spacing)
    }
}

pub(crate) fn validate_slot(width: f64, spacing: f64) -> ChartResult<()> {
    if !width.is_finite() || width <= 0.0 || width > 1.0 {
        return Err(ChartError::InvalidConfig(
            "segment width must be in (0, 1]".to_owned(),
        ));
    }
    if !spacing.is_finite() || !(0.0..1.0).contains(&spacing) {
        return Err(ChartError::InvalidConfig(
            "segment spacing must be in [0, 1)".to_owned(),
        ));
    }
    Ok(())
}

/// Offsets (in x units) of series `position` out of `count` side-by-side
/// series sharing one x slot of `slot_width`.
#[must_use]
pub fn side_by_side_info(
    position: usize,
    count: usize,
    width: f64,
    spacing: f64,
    slot_width: f64,
) -> DoubleRange {
    let count = count.max(1);
    let total = width * slot_width;
    let share = total / count as f64;
    let start = -total / 2.0 + position.min(count - 1) as f64 * share;
    let inset = share * spacing / 2.0;
    DoubleRange::new(start + inset, start + share - inset)
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

/// Rectangle from `(x + sbs.start, y)` to `(x + sbs.end, baseline)`.
pub fn layout(segments: &mut [Segment], ctx: &SegmentContext<'_>) {
    let Some(transform) = ctx.transform else {
        segments
            .iter_mut()
            .for_each(|segment| segment.geometry = SegmentGeometry::Empty);
        return;
    };
    let baseline = ctx.baseline();
    for segment in segments {
        let SegmentData::Xy { x, y } = segment.data else {
            continue;
        };
        segment.geometry = if segment.empty {
            SegmentGeometry::Empty
        } else {
            let first = transform.transform(x + ctx.side_by_side.start(), y);
            let second = transform.transform(x + ctx.side_by_side.end(), baseline);
            if first.is_finite() && second.is_finite() {
                SegmentGeometry::Rect(Rect::from_points(first, second))
            } else {
                SegmentGeometry::Empty
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::side_by_side_info;

    #[test]
    fn single_series_is_centred() {
        let info = side_by_side_info(0, 1, 0.8, 0.0, 1.0);
        assert!((info.start() + 0.4).abs() < 1e-12);
        assert!((info.end() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn two_series_split_the_slot() {
        let first = side_by_side_info(0, 2, 0.8, 0.0, 1.0);
        let second = side_by_side_info(1, 2, 0.8, 0.0, 1.0);
        assert!((first.end() - 0.0).abs() < 1e-12);
        assert!((second.start() - 0.0).abs() < 1e-12);
        assert!((second.end() - 0.4).abs() < 1e-12);
    }
}
