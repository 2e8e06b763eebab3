use chart_kit::core::axis::{Axis, AxisConfig, AxisId};
use chart_kit::core::column_series::side_by_side_info;
use chart_kit::core::fast_series::project_points;
use chart_kit::core::segment_builder::{SegmentContext, create_segments, layout_segments};
use chart_kit::core::{
    DoubleRange, Rect, Series, SeriesConfig, SeriesId, SeriesKind, SeriesPoint, SeriesTransform,
};
use chart_kit::{ChartArea, ChartAreaConfig};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const PLOT: Rect = Rect::new(60.0, 10.0, 1_800.0, 1_000.0);

fn axis(id: usize, is_vertical: bool, range: DoubleRange) -> Axis {
    let mut axis = Axis::new(AxisId(id), AxisConfig::numeric(format!("axis-{id}")), is_vertical);
    axis.update_range(range, PLOT.size());
    axis.set_rendered_rect(PLOT);
    axis
}

fn bench_value_point_round_trip(c: &mut Criterion) {
    let axis = axis(0, false, DoubleRange::new(0.0, 10_000.0));

    c.bench_function("value_point_round_trip", |b| {
        b.iter(|| {
            let px = axis.value_to_point(black_box(4_321.123));
            black_box(axis.point_to_value(px))
        })
    });
}

fn bench_project_points_100k(c: &mut Criterion) {
    let x_axis = axis(0, false, DoubleRange::new(0.0, 100_000.0));
    let y_axis = axis(1, true, DoubleRange::new(-1.0, 1.0));
    let transform = SeriesTransform::cartesian(&x_axis, &y_axis);

    let x_values: Vec<f64> = (0..100_000).map(f64::from).collect();
    let y_values: Vec<f64> = x_values.iter().map(|x| (x * 0.001).sin()).collect();

    c.bench_function("project_points_100k", |b| {
        b.iter(|| project_points(&transform, black_box(&x_values), black_box(&y_values)))
    });
}

fn bench_candle_segments_10k(c: &mut Criterion) {
    let points: Vec<SeriesPoint> = (0..10_000)
        .map(|i| {
            let t = f64::from(i);
            let open = 100.0 + t * 0.05;
            let close = if i % 2 == 0 { open + 1.0 } else { open - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            SeriesPoint::ohlc(t, open, high, low, close)
        })
        .collect();
    let mut series = Series::new(SeriesId(0), SeriesConfig::new("candles", SeriesKind::candle()));
    series.set_points(points);
    series.prepare_values(None);
    series.update_ranges(false);

    let x_axis = axis(0, false, series.x_range());
    let y_axis = axis(1, true, series.y_range());
    let ctx = SegmentContext::cartesian(
        SeriesTransform::cartesian(&x_axis, &y_axis),
        side_by_side_info(0, 1, 0.8, 0.0, 1.0),
    );

    c.bench_function("candle_segments_10k", |b| {
        b.iter(|| {
            let mut segments = create_segments(black_box(&series));
            layout_segments(series.kind(), &mut segments, &ctx);
            segments
        })
    });
}

fn bench_chart_area_update_2k(c: &mut Criterion) {
    let config = ChartAreaConfig::new(chart_kit::core::Size::new(1_600.0, 900.0));
    let mut area = ChartArea::new(config).expect("valid config");
    let id = area
        .add_series(SeriesConfig::new("line", SeriesKind::line()))
        .expect("add series");
    let points = (0..2_000)
        .map(|i| SeriesPoint::xy(f64::from(i), (f64::from(i) * 0.01).cos() * 50.0))
        .collect();
    area.set_series_points(id, points).expect("set points");

    c.bench_function("chart_area_update_2k", |b| b.iter(|| area.update()));
}

criterion_group!(
    benches,
    bench_value_point_round_trip,
    bench_project_points_100k,
    bench_candle_segments_10k,
    bench_chart_area_update_2k
);
criterion_main!(benches);
