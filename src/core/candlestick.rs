use serde::{Deserialize, Serialize};

use crate::core::column_series::{default_segment_width, validate_slot};
use crate::core::empty_point::{EmptyPointMode, replace_empty_points};
use crate::core::segment::{Segment, SegmentData, SegmentGeometry};
use crate::core::segment_builder::SegmentContext;
use crate::core::series::SeriesPoint;
use crate::core::types::{Point, Rect};
use crate::error::ChartResult;

/// Slot settings of candle and OHLC series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSettings {
    #[serde(default = "default_segment_width")]
    pub width: f64,
    #[serde(default)]
    pub spacing: f64,
}

impl Default for FinancialSettings {
    fn default() -> Self {
        Self {
            width: default_segment_width(),
            spacing: 0.0,
        }
    }
}

impl FinancialSettings {
    pub fn validate(&self) -> ChartResult<()> {
        validate_slot(self.width, self.spacing)
    }
}

/// `true` when the close is at or above the open.
#[must_use]
pub fn is_bullish(open: f64, close: f64) -> bool {
    close >= open
}

/// Open/high/low/close columns after empty-point replacement.
///
/// Each component is filled on its own, so a candle missing only its high
/// borrows that high from its neighbours under `Average`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OhlcColumns {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl OhlcColumns {
    #[must_use]
    pub fn from_points(points: &[SeriesPoint], mode: EmptyPointMode) -> Self {
        let column = |component: fn(&SeriesPoint) -> f64| {
            let raw: Vec<f64> = points.iter().map(component).collect();
            replace_empty_points(&raw, mode)
        };
        Self {
            open: column(|point| point.open),
            high: column(|point| point.high),
            low: column(|point| point.low),
            close: column(|point| point.close),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Every component of every point, for range accumulation.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.high
            .iter()
            .chain(&self.low)
            .chain(&self.open)
            .chain(&self.close)
            .copied()
    }
}

#[must_use]
pub fn create_segments(x_values: &[f64], columns: &OhlcColumns) -> Vec<Segment> {
    x_values
        .iter()
        .take(columns.len())
        .enumerate()
        .map(|(index, x)| {
            let (open, high, low, close) = (
                columns.open[index],
                columns.high[index],
                columns.low[index],
                columns.close[index],
            );
            let empty = [*x, open, high, low, close]
                .iter()
                .any(|value| !value.is_finite());
            Segment::new(
                index,
                SegmentData::Financial {
                    x: *x,
                    open,
                    high,
                    low,
                    close,
                },
                empty,
            )
        })
        .collect()
}

/// Body from open/close across the slot; wick from high to low at the centre.
pub fn layout_candles(segments: &mut [Segment], ctx: &SegmentContext<'_>) {
    for segment in segments {
        let SegmentData::Financial {
            x,
            open,
            high,
            low,
            close,
        } = segment.data
        else {
            continue;
        };
        segment.geometry = match ctx.transform {
            Some(transform) if !segment.empty => {
                let center = x + ctx.center_offset();
                let body_start = transform.transform(x + ctx.side_by_side.start(), open);
                let body_end = transform.transform(x + ctx.side_by_side.end(), close);
                let high_point = transform.transform(center, high);
                let low_point = transform.transform(center, low);
                if [body_start, body_end, high_point, low_point]
                    .iter()
                    .all(|point| point.is_finite())
                {
                    SegmentGeometry::Candle {
                        body: Rect::from_points(body_start, body_end),
                        high: high_point,
                        low: low_point,
                        is_bullish: is_bullish(open, close),
                    }
                } else {
                    SegmentGeometry::Empty
                }
            }
            _ => SegmentGeometry::Empty,
        };
    }
}

/// High-low line at the centre, open tick to the left and close tick to the right.
pub fn layout_ohlc(segments: &mut [Segment], ctx: &SegmentContext<'_>) {
    for segment in segments {
        let SegmentData::Financial {
            x,
            open,
            high,
            low,
            close,
        } = segment.data
        else {
            continue;
        };
        segment.geometry = match ctx.transform {
            Some(transform) if !segment.empty => {
                let center = x + ctx.center_offset();
                let high_point = transform.transform(center, high);
                let low_point = transform.transform(center, low);
                let open_tick: (Point, Point) = (
                    transform.transform(x + ctx.side_by_side.start(), open),
                    transform.transform(center, open),
                );
                let close_tick: (Point, Point) = (
                    transform.transform(center, close),
                    transform.transform(x + ctx.side_by_side.end(), close),
                );
                if [high_point, low_point, open_tick.0, open_tick.1, close_tick.0, close_tick.1]
                    .iter()
                    .all(|point| point.is_finite())
                {
                    SegmentGeometry::Ohlc {
                        high: high_point,
                        low: low_point,
                        open: open_tick,
                        close: close_tick,
                        is_bullish: is_bullish(open, close),
                    }
                } else {
                    SegmentGeometry::Empty
                }
            }
            _ => SegmentGeometry::Empty,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{OhlcColumns, create_segments, is_bullish};
    use crate::core::empty_point::EmptyPointMode;
    use crate::core::series::SeriesPoint;

    #[test]
    fn equal_open_close_counts_as_bullish() {
        assert!(is_bullish(10.0, 10.0));
        assert!(!is_bullish(10.0, 9.0));
    }

    #[test]
    fn missing_component_marks_segment_empty() {
        let points = [
            SeriesPoint::ohlc(0.0, 1.0, 2.0, 0.5, 1.5),
            SeriesPoint::ohlc(1.0, 1.0, f64::NAN, 0.5, 1.5),
        ];
        let columns = OhlcColumns::from_points(&points, EmptyPointMode::None);
        let segments = create_segments(&[0.0, 1.0], &columns);
        assert!(!segments[0].empty);
        assert!(segments[1].empty);
    }

    #[test]
    fn zero_mode_fills_only_the_missing_component() {
        let points = [
            SeriesPoint::ohlc(0.0, 1.0, 2.0, 0.5, 1.5),
            SeriesPoint::ohlc(1.0, f64::NAN, 2.0, 0.5, 1.5),
        ];
        let columns = OhlcColumns::from_points(&points, EmptyPointMode::Zero);
        assert_eq!(columns.open, vec![1.0, 0.0]);
        assert_eq!(columns.high, vec![2.0, 2.0]);
        assert!(!create_segments(&[0.0, 1.0], &columns)[1].empty);
    }
}
