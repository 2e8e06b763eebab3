use crate::core::segment::{Segment, SegmentData, SegmentGeometry};
use crate::core::segment_builder::SegmentContext;

/// One segment per run of finite points; NaN values split the area.
#[must_use]
pub fn create_segments(x_values: &[f64], y_values: &[f64]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run_start = 0usize;
    let mut run_x = Vec::new();
    let mut run_y = Vec::new();

    for (index, (x, y)) in x_values.iter().zip(y_values).enumerate() {
        if x.is_finite() && y.is_finite() {
            if run_x.is_empty() {
                run_start = index;
            }
            run_x.push(*x);
            run_y.push(*y);
        } else if !run_x.is_empty() {
            segments.push(run_segment(
                run_start,
                std::mem::take(&mut run_x),
                std::mem::take(&mut run_y),
            ));
        }
    }
    if !run_x.is_empty() {
        segments.push(run_segment(run_start, run_x, run_y));
    }
    segments
}

fn run_segment(index: usize, x_values: Vec<f64>, y_values: Vec<f64>) -> Segment {
    Segment::new(index, SegmentData::Run { x_values, y_values }, false)
}

/// Closed polygon: baseline under the first point, every data point, then
/// the baseline under the last point.
pub fn layout(segments: &mut [Segment], ctx: &SegmentContext<'_>) {
    let baseline = ctx.baseline();
    for segment in segments {
        let SegmentData::Run { x_values, y_values } = &segment.data else {
            continue;
        };
        let Some(transform) = ctx.transform else {
            segment.geometry = SegmentGeometry::Empty;
            continue;
        };
        let (Some(first_x), Some(last_x)) = (x_values.first(), x_values.last()) else {
            segment.geometry = SegmentGeometry::Empty;
            continue;
        };

        let mut polygon = Vec::with_capacity(x_values.len() + 2);
        polygon.push(transform.transform(*first_x, baseline));
        polygon.extend(
            x_values
                .iter()
                .zip(y_values)
                .map(|(x, y)| transform.transform(*x, *y)),
        );
        polygon.push(transform.transform(*last_x, baseline));

        segment.geometry = if polygon.iter().all(|point| point.is_finite()) {
            SegmentGeometry::Polygon(polygon)
        } else {
            SegmentGeometry::Empty
        };
    }
}
