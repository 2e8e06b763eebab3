//! Batched geometry for large series: one polyline per finite run, one rect
//! batch per scatter series.

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::scatter_series::ScatterSettings;
use crate::core::segment::{Segment, SegmentData, SegmentGeometry};
use crate::core::segment_builder::SegmentContext;
use crate::core::transform::SeriesTransform;
use crate::core::types::{Point, Rect, Size};

/// Below this many points the parallel path costs more than it saves.
#[cfg(feature = "parallel-projection")]
const PARALLEL_THRESHOLD: usize = 4_096;

/// Projects `(x, y)` pairs; non-finite results become `Point::nan()`.
#[must_use]
pub fn project_points(transform: &SeriesTransform<'_>, x_values: &[f64], y_values: &[f64]) -> Vec<Point> {
    #[cfg(feature = "parallel-projection")]
    {
        if x_values.len() >= PARALLEL_THRESHOLD {
            return x_values
                .par_iter()
                .zip(y_values.par_iter())
                .map(|(x, y)| transform.transform(*x, *y))
                .collect();
        }
    }

    x_values
        .iter()
        .zip(y_values)
        .map(|(x, y)| transform.transform(*x, *y))
        .collect()
}

/// Same runs as the area series: NaN breaks the line.
#[must_use]
pub fn create_line_segments(x_values: &[f64], y_values: &[f64]) -> Vec<Segment> {
    crate::core::area_series::create_segments(x_values, y_values)
}

/// A single segment carrying every point; empty points are skipped at layout.
#[must_use]
pub fn create_scatter_segments(x_values: &[f64], y_values: &[f64]) -> Vec<Segment> {
    if x_values.is_empty() {
        return Vec::new();
    }
    vec![Segment::new(
        0,
        SegmentData::Run {
            x_values: x_values.to_vec(),
            y_values: y_values.to_vec(),
        },
        false,
    )]
}

pub fn layout_lines(segments: &mut [Segment], ctx: &SegmentContext<'_>) {
    for segment in segments {
        let SegmentData::Run { x_values, y_values } = &segment.data else {
            continue;
        };
        segment.geometry = match ctx.transform {
            Some(transform) => {
                let points = project_points(&transform, x_values, y_values);
                if points.len() >= 2 && points.iter().all(|point| point.is_finite()) {
                    SegmentGeometry::Polyline(points)
                } else {
                    SegmentGeometry::Empty
                }
            }
            None => SegmentGeometry::Empty,
        };
    }
}

pub fn layout_scatter(segments: &mut [Segment], ctx: &SegmentContext<'_>, settings: &ScatterSettings) {
    let size = Size::new(settings.point_width, settings.point_height);
    for segment in segments {
        let SegmentData::Run { x_values, y_values } = &segment.data else {
            continue;
        };
        segment.geometry = match ctx.transform {
            Some(transform) => {
                // Rect positions stay aligned with point indices; NaN rects never hit.
                let rects: Vec<Rect> = project_points(&transform, x_values, y_values)
                    .into_iter()
                    .map(|center| Rect::from_center(center, size))
                    .collect();
                if rects.iter().all(|rect| !rect.is_finite()) {
                    SegmentGeometry::Empty
                } else {
                    SegmentGeometry::Rects(rects)
                }
            }
            None => SegmentGeometry::Empty,
        };
    }
}
