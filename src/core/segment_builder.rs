//! Two-phase segment construction.
//!
//! `create_segments` captures data-space values and empty flags whenever
//! the points change. `layout_segments` re-derives pixel geometry after
//! every transform-affecting change.

use crate::core::DoubleRange;
use crate::core::segment::Segment;
use crate::core::series::{Series, SeriesKind};
use crate::core::transform::SeriesTransform;
use crate::core::types::Rect;
use crate::core::{
    area_series, box_whisker_series, bubble_series, candlestick, column_series,
    error_bar_series, fast_series, line_series, pie_series, scatter_series, triangular_series,
};

/// Inputs shared by every geometry builder.
#[derive(Debug, Clone, Copy)]
pub struct SegmentContext<'a> {
    /// Axis pair; `None` for circular and triangular series.
    pub transform: Option<SeriesTransform<'a>>,
    /// Side-by-side offsets in x units relative to each point.
    pub side_by_side: DoubleRange,
    pub plot: Rect,
}

impl<'a> SegmentContext<'a> {
    #[must_use]
    pub fn cartesian(transform: SeriesTransform<'a>, side_by_side: DoubleRange) -> Self {
        Self {
            transform: Some(transform),
            side_by_side,
            plot: transform.plot_rect(),
        }
    }

    #[must_use]
    pub fn accumulation(plot: Rect) -> Self {
        Self {
            transform: None,
            side_by_side: DoubleRange::new(-0.4, 0.4),
            plot,
        }
    }

    /// Y value the bars and area fills grow from.
    ///
    /// The x axis crossing value (or 0) clamped into the visible y range;
    /// logarithmic axes without a positive origin use their visible start.
    #[must_use]
    pub fn baseline(&self) -> f64 {
        let Some(transform) = self.transform else {
            return 0.0;
        };
        let y_axis = transform.y_axis;
        let range = y_axis.visible_value_range();
        let origin = transform.x_axis.config().crossing_value.unwrap_or(0.0);
        if range.is_empty() {
            return origin;
        }
        if y_axis.config().kind.is_logarithmic() && origin <= 0.0 {
            return range.start();
        }
        origin.clamp(range.start(), range.end())
    }

    /// Half of the side-by-side slot width, in x units.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.side_by_side.delta() / 2.0
    }

    /// Centre offset of this series inside its slot, in x units.
    #[must_use]
    pub fn center_offset(&self) -> f64 {
        self.side_by_side.median()
    }
}

/// Phase one: data-space segments for the series' prepared values.
#[must_use]
pub fn create_segments(series: &Series) -> Vec<Segment> {
    let x = series.x_values();
    let y = series.y_values();
    match series.kind() {
        SeriesKind::Column(_) => column_series::create_segments(x, y),
        SeriesKind::Line(_) => line_series::create_segments(x, y),
        SeriesKind::Area(_) => area_series::create_segments(x, y),
        SeriesKind::Candle(_) | SeriesKind::Ohlc(_) => {
            candlestick::create_segments(x, series.ohlc_values())
        }
        SeriesKind::BoxAndWhisker(settings) => {
            box_whisker_series::create_segments(x, series.points(), settings.mode)
        }
        SeriesKind::Bubble(_) => bubble_series::create_segments(x, y, series.points()),
        SeriesKind::Scatter(_) => scatter_series::create_segments(x, y),
        SeriesKind::Pie(settings) | SeriesKind::Doughnut(settings) => {
            pie_series::create_segments(y, settings)
        }
        SeriesKind::ErrorBar(settings) => error_bar_series::create_segments(x, y, settings),
        SeriesKind::FastLine(_) => fast_series::create_line_segments(x, y),
        SeriesKind::FastScatter(_) => fast_series::create_scatter_segments(x, y),
        SeriesKind::Pyramid(settings) | SeriesKind::Funnel(settings) => {
            triangular_series::create_segments(y, settings)
        }
    }
}

/// Phase two: pixel geometry for every segment of `kind`.
pub fn layout_segments(kind: &SeriesKind, segments: &mut [Segment], ctx: &SegmentContext<'_>) {
    match kind {
        SeriesKind::Column(_) => column_series::layout(segments, ctx),
        SeriesKind::Line(_) => line_series::layout(segments, ctx),
        SeriesKind::Area(_) => area_series::layout(segments, ctx),
        SeriesKind::Candle(_) => candlestick::layout_candles(segments, ctx),
        SeriesKind::Ohlc(_) => candlestick::layout_ohlc(segments, ctx),
        SeriesKind::BoxAndWhisker(settings) => {
            box_whisker_series::layout(segments, ctx, settings)
        }
        SeriesKind::Bubble(settings) => bubble_series::layout(segments, ctx, settings),
        SeriesKind::Scatter(settings) => scatter_series::layout(segments, ctx, settings),
        SeriesKind::Pie(settings) | SeriesKind::Doughnut(settings) => {
            pie_series::layout(segments, ctx.plot, settings)
        }
        SeriesKind::ErrorBar(settings) => error_bar_series::layout(segments, ctx, settings),
        SeriesKind::FastLine(_) => fast_series::layout_lines(segments, ctx),
        SeriesKind::FastScatter(settings) => fast_series::layout_scatter(segments, ctx, settings),
        SeriesKind::Pyramid(settings) => {
            triangular_series::layout_pyramid(segments, ctx.plot, settings)
        }
        SeriesKind::Funnel(settings) => {
            triangular_series::layout_funnel(segments, ctx.plot, settings)
        }
    }
}

/// Stroke tolerance used by hit testing for `kind`.
#[must_use]
pub fn hit_tolerance(kind: &SeriesKind) -> f64 {
    match kind {
        SeriesKind::Line(settings)
        | SeriesKind::Area(settings)
        | SeriesKind::FastLine(settings) => (settings.stroke_width / 2.0).max(2.0),
        SeriesKind::Candle(_) | SeriesKind::Ohlc(_) | SeriesKind::BoxAndWhisker(_) => 2.0,
        SeriesKind::ErrorBar(_) => 3.0,
        _ => 0.0,
    }
}
