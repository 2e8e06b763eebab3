use crate::core::segment::hit_test;
use crate::core::segment_builder::hit_tolerance;
use crate::core::series::SeriesId;
use crate::core::transform::SeriesTransform;
use crate::core::types::Point;
use crate::error::ChartResult;

use super::ChartArea;

/// Data point found under a pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestResult {
    pub series: SeriesId,
    pub index: usize,
}

impl ChartArea {
    /// Data point index of one series under `position`.
    pub fn series_point_at(&self, id: SeriesId, position: Point) -> ChartResult<Option<usize>> {
        let series = self.series(id)?;
        if !series.is_drawn() {
            return Ok(None);
        }
        Ok(hit_test(
            series.segments(),
            position,
            hit_tolerance(series.kind()),
        ))
    }

    /// Topmost point under `position`; later series draw above earlier ones.
    #[must_use]
    pub fn hit_test(&self, position: Point) -> Option<HitTestResult> {
        if !position.is_finite() {
            return None;
        }
        self.series_iter()
            .rev()
            .filter(|series| series.is_drawn())
            .find_map(|series| {
                hit_test(series.segments(), position, hit_tolerance(series.kind())).map(|index| {
                    HitTestResult {
                        series: series.id(),
                        index,
                    }
                })
            })
    }

    /// Values of the primary axes under `position` (NaN outside a drawable range).
    #[must_use]
    pub fn point_to_values(&self, position: Point) -> (f64, f64) {
        let x_axis = &self.axes[self.primary_x_axis.0];
        let y_axis = &self.axes[self.primary_y_axis.0];
        SeriesTransform {
            x_axis,
            y_axis,
            system: self.coordinate_system(),
        }
        .point_to_values(position)
    }
}
