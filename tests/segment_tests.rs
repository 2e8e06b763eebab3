use approx::assert_relative_eq;
use chart_kit::core::animation::lerp;
use chart_kit::core::axis::{Axis, AxisConfig, AxisId};
use chart_kit::core::box_whisker_series::{BoxPlotMode, statistics};
use chart_kit::core::column_series::side_by_side_info;
use chart_kit::core::empty_point::{EmptyPointMode, replace_empty_points};
use chart_kit::core::pie_series::CircularSettings;
use chart_kit::core::segment::hit_test;
use chart_kit::core::segment_builder::{SegmentContext, create_segments, layout_segments};
use chart_kit::core::{
    DoubleRange, Point, Rect, SegmentGeometry, Series, SeriesConfig, SeriesId, SeriesKind,
    SeriesPoint, SeriesTransform, Size,
};

const PLOT: Rect = Rect::new(0.0, 0.0, 500.0, 200.0);

fn axes() -> (Axis, Axis) {
    let mut x_axis = Axis::new(
        AxisId(0),
        AxisConfig::numeric("x").with_bounds(Some(0.5), Some(5.5)),
        false,
    );
    let mut y_axis = Axis::new(
        AxisId(1),
        AxisConfig::numeric("y").with_bounds(Some(0.0), Some(100.0)),
        true,
    );
    for axis in [&mut x_axis, &mut y_axis] {
        axis.update_range(DoubleRange::EMPTY, Size::new(PLOT.width, PLOT.height));
        axis.set_rendered_rect(PLOT);
    }
    (x_axis, y_axis)
}

fn prepared(config: SeriesConfig, points: Vec<SeriesPoint>) -> Series {
    let mut series = Series::new(SeriesId(0), config);
    series.set_points(points);
    series.prepare_values(None);
    series.update_ranges(false);
    series
}

fn laid_out(series: &mut Series) {
    let (x_axis, y_axis) = axes();
    let transform = SeriesTransform::cartesian(&x_axis, &y_axis);
    let side_by_side = side_by_side_info(0, 1, 0.8, 0.0, 1.0);
    let ctx = SegmentContext::cartesian(transform, side_by_side);
    let mut segments = create_segments(series);
    layout_segments(series.kind(), &mut segments, &ctx);
    series.replace_segments(segments);
}

#[test]
fn average_mode_fills_every_gap() {
    let nan = f64::NAN;
    let values = [1.0, nan, 2.0, 3.0, nan, 5.5, 6.0, 7.0, nan, 10.0];
    let filled = replace_empty_points(&values, EmptyPointMode::Average);
    assert_eq!(filled, vec![1.0, 1.5, 2.0, 3.0, 4.25, 5.5, 6.0, 7.0, 8.5, 10.0]);

    let zeroed = replace_empty_points(&values, EmptyPointMode::Zero);
    assert_eq!(zeroed[1], 0.0);
    assert_eq!(zeroed[9], 10.0);
}

#[test]
fn column_rect_spans_from_value_to_baseline() {
    let points = (1..=5)
        .map(|x| SeriesPoint::xy(f64::from(x), f64::from(x) * 20.0))
        .collect();
    let mut series = prepared(SeriesConfig::new("sales", SeriesKind::column()), points);
    laid_out(&mut series);

    let SegmentGeometry::Rect(rect) = series.segments()[0].geometry else {
        panic!("column geometry expected");
    };
    assert_relative_eq!(rect.left, 60.0, epsilon = 1e-9);
    assert_relative_eq!(rect.width, 80.0, epsilon = 1e-9);
    assert_relative_eq!(rect.top, 160.0, epsilon = 1e-9);
    assert_relative_eq!(rect.bottom(), 200.0, epsilon = 1e-9);
}

#[test]
fn column_hit_test_finds_only_covered_points() {
    let points = (1..=5)
        .map(|x| SeriesPoint::xy(f64::from(x), f64::from(x) * 20.0))
        .collect();
    let mut series = prepared(SeriesConfig::new("sales", SeriesKind::column()), points);
    laid_out(&mut series);

    assert_eq!(hit_test(series.segments(), Point::new(100.0, 180.0), 0.0), Some(0));
    assert_eq!(hit_test(series.segments(), Point::new(250.0, 150.0), 0.0), Some(2));
    assert_eq!(hit_test(series.segments(), Point::new(100.0, 100.0), 0.0), None);
    assert_eq!(hit_test(series.segments(), Point::new(150.0, 190.0), 0.0), None);
}

#[test]
fn empty_points_produce_no_geometry() {
    let points = vec![
        SeriesPoint::xy(1.0, 10.0),
        SeriesPoint::xy(2.0, f64::NAN),
        SeriesPoint::xy(3.0, 30.0),
    ];
    let mut series = prepared(SeriesConfig::new("gaps", SeriesKind::column()), points);
    laid_out(&mut series);

    assert!(series.segments()[1].empty);
    assert!(series.segments()[1].geometry.is_empty());
    assert!(!series.segments()[2].geometry.is_empty());
}

#[test]
fn relayout_keeps_the_previous_geometry_for_animation() {
    let mut series = prepared(
        SeriesConfig::new("sales", SeriesKind::column()),
        vec![SeriesPoint::xy(1.0, 20.0)],
    );
    laid_out(&mut series);
    let before = series.segments()[0].geometry.bounds();

    series.set_points(vec![SeriesPoint::xy(1.0, 60.0)]);
    series.prepare_values(None);
    laid_out(&mut series);
    let after = series.segments()[0].geometry.bounds();

    let halfway = series.segments()[0].interpolated(0.5).bounds();
    assert_relative_eq!(halfway.top, (before.top + after.top) / 2.0, epsilon = 1e-9);
    let finished = series.segments()[0].interpolated(1.0).bounds();
    assert_relative_eq!(finished.top, after.top, epsilon = 1e-9);
    assert_relative_eq!(finished.height, after.height, epsilon = 1e-9);
}

#[test]
fn lerp_from_nan_jumps_to_the_target() {
    assert_eq!(lerp(f64::NAN, 5.0, 0.3), 5.0);
    assert_relative_eq!(lerp(0.0, 10.0, 0.25), 2.5);
    assert_eq!(lerp(0.0, 10.0, f64::NAN), 10.0);
}

#[test]
fn pie_slices_share_the_full_turn() {
    let points = [1.0, 1.0, 2.0]
        .iter()
        .enumerate()
        .map(|(index, y)| SeriesPoint::xy(index as f64, *y))
        .collect();
    let mut series = prepared(SeriesConfig::new("share", SeriesKind::pie()), points);
    let mut segments = create_segments(&series);
    let plot = Rect::new(0.0, 0.0, 200.0, 200.0);
    layout_segments(series.kind(), &mut segments, &SegmentContext::accumulation(plot));
    series.replace_segments(segments);

    let angles: Vec<(f64, f64)> = series
        .segments()
        .iter()
        .map(|segment| match segment.geometry {
            SegmentGeometry::Slice {
                start_angle,
                end_angle,
                ..
            } => (start_angle, end_angle),
            _ => panic!("slice geometry expected"),
        })
        .collect();
    assert_eq!(angles, vec![(0.0, 90.0), (90.0, 180.0), (180.0, 360.0)]);

    assert_eq!(hit_test(series.segments(), Point::new(150.0, 101.0), 0.0), Some(0));
    assert_eq!(hit_test(series.segments(), Point::new(60.0, 110.0), 0.0), Some(1));
    assert_eq!(hit_test(series.segments(), Point::new(100.0, 40.0), 0.0), Some(2));
    assert_eq!(hit_test(series.segments(), Point::new(199.0, 199.0), 0.0), None);
}

#[test]
fn counter_clockwise_pie_sweeps_backwards() {
    let settings = CircularSettings::pie().with_angles(360.0, 0.0);
    assert_eq!(settings.total_sweep(), -360.0);
}

#[test]
fn box_statistics_flag_values_beyond_the_fences() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0];
    let stats = statistics(&values, BoxPlotMode::Exclusive).expect("finite samples");

    assert_relative_eq!(stats.lower_quartile, 2.5, epsilon = 1e-12);
    assert_relative_eq!(stats.median, 5.0, epsilon = 1e-12);
    assert_relative_eq!(stats.upper_quartile, 7.5, epsilon = 1e-12);
    assert_eq!(stats.maximum, 8.0);
    assert_eq!(stats.outliers, vec![100.0]);
    assert!(statistics(&[f64::NAN], BoxPlotMode::Normal).is_none());
}

#[test]
fn bullish_candle_closes_at_or_above_open() {
    let points = vec![
        SeriesPoint::ohlc(1.0, 20.0, 60.0, 10.0, 50.0),
        SeriesPoint::ohlc(2.0, 50.0, 70.0, 30.0, 40.0),
    ];
    let mut series = prepared(SeriesConfig::new("prices", SeriesKind::candle()), points);
    laid_out(&mut series);

    let flags: Vec<bool> = series
        .segments()
        .iter()
        .map(|segment| match segment.geometry {
            SegmentGeometry::Candle { is_bullish, .. } => is_bullish,
            _ => panic!("candle geometry expected"),
        })
        .collect();
    assert_eq!(flags, vec![true, false]);
}

fn candle_body(mode: EmptyPointMode) -> Option<Rect> {
    let points = vec![
        SeriesPoint::ohlc(1.0, 20.0, 60.0, 10.0, 50.0),
        SeriesPoint::ohlc(2.0, f64::NAN, 70.0, 30.0, 40.0),
        SeriesPoint::ohlc(3.0, 40.0, 80.0, 20.0, 60.0),
    ];
    let config = SeriesConfig::new("prices", SeriesKind::candle()).with_empty_point_mode(mode);
    let mut series = prepared(config, points);
    laid_out(&mut series);
    match series.segments()[1].geometry {
        SegmentGeometry::Candle { body, .. } => Some(body),
        _ => None,
    }
}

#[test]
fn candle_missing_a_component_follows_the_empty_point_mode() {
    assert!(candle_body(EmptyPointMode::None).is_none());

    // 100 units span 200 px; Zero stretches the body from 0 to the close.
    let zero = candle_body(EmptyPointMode::Zero).expect("zero fills the open");
    assert_relative_eq!(zero.height, 80.0, epsilon = 1e-9);

    // Average takes the neighbouring opens: (20 + 40) / 2 = 30.
    let average = candle_body(EmptyPointMode::Average).expect("average fills the open");
    assert_relative_eq!(average.height, 20.0, epsilon = 1e-9);
}

#[test]
fn filled_components_feed_the_value_range() {
    let points = vec![
        SeriesPoint::ohlc(1.0, 20.0, 60.0, 10.0, 50.0),
        SeriesPoint::ohlc(2.0, f64::NAN, 70.0, 30.0, 40.0),
    ];
    let config = SeriesConfig::new("prices", SeriesKind::candle())
        .with_empty_point_mode(EmptyPointMode::Zero);
    let series = prepared(config, points);
    assert_eq!(series.ohlc_values().open, vec![20.0, 0.0]);
    assert_eq!(series.y_range(), DoubleRange::new(0.0, 70.0));
}
