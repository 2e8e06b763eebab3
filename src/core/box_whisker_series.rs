//! Box-and-whisker statistics and geometry.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::core::column_series::{default_segment_width, validate_slot};
use crate::core::segment::{BoxStatistics, Segment, SegmentData, SegmentGeometry};
use crate::core::segment_builder::SegmentContext;
use crate::core::series::SeriesPoint;
use crate::core::types::Rect;
use crate::error::ChartResult;

/// Whisker reach as a multiple of the interquartile range.
const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Quartile convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoxPlotMode {
    /// Rank `p * (n + 1)`, median excluded from the halves.
    #[default]
    Exclusive,
    /// Rank `p * (n - 1) + 1`, median included.
    Inclusive,
    /// Median of each half; odd counts leave the median out.
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxWhiskerSettings {
    #[serde(default)]
    pub mode: BoxPlotMode,
    #[serde(default = "default_segment_width")]
    pub width: f64,
    #[serde(default)]
    pub spacing: f64,
    #[serde(default = "default_show_mean")]
    pub show_mean: bool,
}

fn default_show_mean() -> bool {
    true
}

impl Default for BoxWhiskerSettings {
    fn default() -> Self {
        Self {
            mode: BoxPlotMode::Exclusive,
            width: default_segment_width(),
            spacing: 0.0,
            show_mean: true,
        }
    }
}

impl BoxWhiskerSettings {
    pub fn validate(&self) -> ChartResult<()> {
        validate_slot(self.width, self.spacing)
    }
}

/// Summary of `values` (NaN samples ignored); `None` when nothing is left.
#[must_use]
pub fn statistics(values: &[f64], mode: BoxPlotMode) -> Option<BoxStatistics> {
    let mut sorted: Vec<OrderedFloat<f64>> = values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_unstable();
    let sorted: Vec<f64> = sorted.into_iter().map(|value| value.0).collect();

    let (lower_quartile, median, upper_quartile) = quartiles(&sorted, mode);
    let iqr = upper_quartile - lower_quartile;
    let lower_fence = lower_quartile - WHISKER_IQR_FACTOR * iqr;
    let upper_fence = upper_quartile + WHISKER_IQR_FACTOR * iqr;

    let inside = sorted
        .iter()
        .copied()
        .filter(|value| *value >= lower_fence && *value <= upper_fence);
    let minimum = inside.clone().fold(f64::INFINITY, f64::min);
    let maximum = inside.fold(f64::NEG_INFINITY, f64::max);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|value| *value < lower_fence || *value > upper_fence)
        .collect();
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

    Some(BoxStatistics {
        minimum,
        lower_quartile,
        median,
        upper_quartile,
        maximum,
        mean,
        outliers,
    })
}

fn quartiles(sorted: &[f64], mode: BoxPlotMode) -> (f64, f64, f64) {
    let count = sorted.len();
    if count == 1 {
        return (sorted[0], sorted[0], sorted[0]);
    }
    let median = median_of(sorted);
    match mode {
        BoxPlotMode::Exclusive => (
            rank_value(sorted, 0.25 * (count as f64 + 1.0)),
            median,
            rank_value(sorted, 0.75 * (count as f64 + 1.0)),
        ),
        BoxPlotMode::Inclusive => (
            rank_value(sorted, 0.25 * (count as f64 - 1.0) + 1.0),
            median,
            rank_value(sorted, 0.75 * (count as f64 - 1.0) + 1.0),
        ),
        BoxPlotMode::Normal => {
            let half = count / 2;
            let upper_start = if count % 2 == 0 { half } else { half + 1 };
            (
                median_of(&sorted[..half]),
                median,
                median_of(&sorted[upper_start..]),
            )
        }
    }
}

/// Linear interpolation at a one-based rank, clamped to the sample ends.
fn rank_value(sorted: &[f64], rank: f64) -> f64 {
    let last = sorted.len() as f64;
    let rank = rank.clamp(1.0, last);
    let lower = rank.floor();
    let fraction = rank - lower;
    let lower_index = lower as usize - 1;
    let upper_index = (lower_index + 1).min(sorted.len() - 1);
    sorted[lower_index] + fraction * (sorted[upper_index] - sorted[lower_index])
}

fn median_of(sorted: &[f64]) -> f64 {
    let count = sorted.len();
    if count == 0 {
        return f64::NAN;
    }
    if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    }
}

#[must_use]
pub fn create_segments(x_values: &[f64], points: &[SeriesPoint], mode: BoxPlotMode) -> Vec<Segment> {
    x_values
        .iter()
        .zip(points)
        .enumerate()
        .map(|(index, (x, point))| match statistics(&point.values, mode) {
            Some(stats) => Segment::new(
                index,
                SegmentData::BoxPlot { x: *x, stats },
                !x.is_finite(),
            ),
            None => Segment::new(
                index,
                SegmentData::BoxPlot {
                    x: *x,
                    stats: BoxStatistics::default(),
                },
                true,
            ),
        })
        .collect()
}

pub fn layout(segments: &mut [Segment], ctx: &SegmentContext<'_>, settings: &BoxWhiskerSettings) {
    for segment in segments {
        let SegmentData::BoxPlot { x, stats } = &segment.data else {
            continue;
        };
        let Some(transform) = ctx.transform.filter(|_| !segment.empty) else {
            segment.geometry = SegmentGeometry::Empty;
            continue;
        };
        let left = x + ctx.side_by_side.start();
        let right = x + ctx.side_by_side.end();
        let center = x + ctx.center_offset();
        let quarter = ctx.half_width() / 2.0;

        let body = Rect::from_points(
            transform.transform(left, stats.upper_quartile),
            transform.transform(right, stats.lower_quartile),
        );
        let median = (
            transform.transform(left, stats.median),
            transform.transform(right, stats.median),
        );
        let whiskers = smallvec![
            (
                transform.transform(center, stats.upper_quartile),
                transform.transform(center, stats.maximum),
            ),
            (
                transform.transform(center, stats.lower_quartile),
                transform.transform(center, stats.minimum),
            ),
            (
                transform.transform(center - quarter, stats.maximum),
                transform.transform(center + quarter, stats.maximum),
            ),
            (
                transform.transform(center - quarter, stats.minimum),
                transform.transform(center + quarter, stats.minimum),
            ),
        ];
        let mean = settings
            .show_mean
            .then(|| transform.transform(center, stats.mean));
        let outliers = stats
            .outliers
            .iter()
            .map(|value| transform.transform(center, *value))
            .collect();

        segment.geometry = if body.is_finite() {
            SegmentGeometry::BoxWhisker {
                body,
                median,
                whiskers,
                mean,
                outliers,
            }
        } else {
            SegmentGeometry::Empty
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{BoxPlotMode, statistics};

    #[test]
    fn normal_mode_uses_median_of_halves() {
        let stats = statistics(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], BoxPlotMode::Normal)
            .expect("non-empty");
        assert_eq!(stats.lower_quartile, 2.0);
        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.upper_quartile, 6.0);
    }

    #[test]
    fn inclusive_mode_interpolates_ranks() {
        let stats = statistics(&[1.0, 2.0, 3.0, 4.0], BoxPlotMode::Inclusive).expect("non-empty");
        assert!((stats.lower_quartile - 1.75).abs() < 1e-12);
        assert!((stats.upper_quartile - 3.25).abs() < 1e-12);
    }

    #[test]
    fn far_values_become_outliers() {
        let stats = statistics(&[10.0, 11.0, 12.0, 13.0, 14.0, 100.0], BoxPlotMode::Exclusive)
            .expect("non-empty");
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.maximum, 14.0);
    }

    #[test]
    fn only_nan_samples_have_no_statistics() {
        assert!(statistics(&[f64::NAN], BoxPlotMode::Normal).is_none());
    }
}
