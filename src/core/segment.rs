//! Segments: the renderable unit built from one or more data points.
//!
//! A segment keeps its data-space values (`SegmentData`), the pixel
//! geometry of the current layout pass and the geometry of the previous
//! pass, which is the start state of the update animation.

use smallvec::SmallVec;

use crate::core::animation::{lerp, lerp_point, lerp_points, lerp_rect};
use crate::core::types::{Point, Rect};

/// Data-space values captured when a segment is created.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentData {
    Xy {
        x: f64,
        y: f64,
    },
    Pair {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Run {
        x_values: Vec<f64>,
        y_values: Vec<f64>,
    },
    Financial {
        x: f64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    },
    BoxPlot {
        x: f64,
        stats: BoxStatistics,
    },
    Bubble {
        x: f64,
        y: f64,
        size: f64,
    },
    Slice {
        y: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ErrorBar {
        x: f64,
        y: f64,
        horizontal: (f64, f64),
        vertical: (f64, f64),
    },
    Triangular {
        y: f64,
        top: f64,
        bottom: f64,
    },
}

/// Five-number summary plus mean and outliers of a box-and-whisker point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxStatistics {
    pub minimum: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub maximum: f64,
    pub mean: f64,
    pub outliers: Vec<f64>,
}

pub type LineSegmentPx = (Point, Point);

/// Pixel geometry of one segment.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentGeometry {
    /// Nothing to draw (NaN data or unusable transform).
    Empty,
    Rect(Rect),
    Line {
        start: Point,
        end: Point,
    },
    /// Closed fill polygon.
    Polygon(Vec<Point>),
    /// Open stroke path.
    Polyline(Vec<Point>),
    Candle {
        body: Rect,
        high: Point,
        low: Point,
        is_bullish: bool,
    },
    Ohlc {
        high: Point,
        low: Point,
        open: LineSegmentPx,
        close: LineSegmentPx,
        is_bullish: bool,
    },
    BoxWhisker {
        body: Rect,
        median: LineSegmentPx,
        whiskers: SmallVec<[LineSegmentPx; 4]>,
        mean: Option<Point>,
        outliers: Vec<Point>,
    },
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
    /// Angles in degrees, clockwise from 3 o'clock.
    Slice {
        center: Point,
        start_angle: f64,
        end_angle: f64,
        inner_radius: f64,
        radius: f64,
    },
    ErrorBar {
        horizontal: Option<LineSegmentPx>,
        vertical: Option<LineSegmentPx>,
        caps: SmallVec<[LineSegmentPx; 4]>,
    },
    Rects(Vec<Rect>),
}

impl SegmentGeometry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Axis-aligned bounds, `Rect::nan()` for empty geometry.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let points: Vec<Point> = match self {
            Self::Empty => return Rect::nan(),
            Self::Rect(rect) => return *rect,
            Self::Line { start, end } => vec![*start, *end],
            Self::Polygon(points) | Self::Polyline(points) => points.clone(),
            Self::Candle {
                body, high, low, ..
            } => vec![
                Point::new(body.left, body.top),
                Point::new(body.right(), body.bottom()),
                *high,
                *low,
            ],
            Self::Ohlc {
                high, low, open, close, ..
            } => vec![*high, *low, open.0, open.1, close.0, close.1],
            Self::BoxWhisker {
                body,
                whiskers,
                outliers,
                ..
            } => {
                let mut points = vec![
                    Point::new(body.left, body.top),
                    Point::new(body.right(), body.bottom()),
                ];
                for (start, end) in whiskers {
                    points.push(*start);
                    points.push(*end);
                }
                points.extend(outliers.iter().copied());
                points
            }
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                return Rect::from_ltrb(
                    center.x - radius_x,
                    center.y - radius_y,
                    center.x + radius_x,
                    center.y + radius_y,
                );
            }
            Self::Slice { center, radius, .. } => {
                return Rect::from_ltrb(
                    center.x - radius,
                    center.y - radius,
                    center.x + radius,
                    center.y + radius,
                );
            }
            Self::ErrorBar {
                horizontal,
                vertical,
                caps,
            } => horizontal
                .iter()
                .chain(vertical.iter())
                .chain(caps.iter())
                .flat_map(|(start, end)| [*start, *end])
                .collect(),
            Self::Rects(rects) => rects
                .iter()
                .filter(|rect| rect.is_finite())
                .flat_map(|rect| {
                    [
                        Point::new(rect.left, rect.top),
                        Point::new(rect.right(), rect.bottom()),
                    ]
                })
                .collect(),
        };
        bounding_rect(&points)
    }

    /// Hit test. `tolerance` is the half stroke width for line shapes.
    #[must_use]
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        if !point.is_finite() {
            return false;
        }
        match self {
            Self::Empty => false,
            Self::Rect(rect) => rect.contains(point),
            Self::Line { start, end } => distance_to_segment(point, *start, *end) <= tolerance,
            Self::Polygon(points) => point_in_polygon(point, points),
            Self::Polyline(points) => points
                .windows(2)
                .any(|pair| distance_to_segment(point, pair[0], pair[1]) <= tolerance),
            Self::Candle {
                body, high, low, ..
            } => {
                rect_or_line_contains(*body, point, tolerance)
                    || distance_to_segment(point, *high, *low) <= tolerance
            }
            Self::Ohlc {
                high, low, open, close, ..
            } => {
                distance_to_segment(point, *high, *low) <= tolerance
                    || distance_to_segment(point, open.0, open.1) <= tolerance
                    || distance_to_segment(point, close.0, close.1) <= tolerance
            }
            Self::BoxWhisker {
                body, whiskers, ..
            } => {
                rect_or_line_contains(*body, point, tolerance)
                    || whiskers
                        .iter()
                        .any(|(start, end)| distance_to_segment(point, *start, *end) <= tolerance)
            }
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                if *radius_x <= 0.0 || *radius_y <= 0.0 {
                    return false;
                }
                let dx = (point.x - center.x) / radius_x;
                let dy = (point.y - center.y) / radius_y;
                dx * dx + dy * dy <= 1.0
            }
            Self::Slice {
                center,
                start_angle,
                end_angle,
                inner_radius,
                radius,
            } => slice_contains(*center, *start_angle, *end_angle, *inner_radius, *radius, point),
            Self::ErrorBar {
                horizontal,
                vertical,
                ..
            } => horizontal
                .iter()
                .chain(vertical.iter())
                .any(|(start, end)| distance_to_segment(point, *start, *end) <= tolerance),
            Self::Rects(rects) => rects.iter().any(|rect| rect.contains(point)),
        }
    }

    /// Blends `previous` towards `self` at progress `t`.
    ///
    /// Geometry of a different shape (or with a different point count)
    /// snaps to the final state.
    #[must_use]
    pub fn interpolate_from(&self, previous: &Self, t: f64) -> Self {
        match (previous, self) {
            (Self::Rect(old), Self::Rect(new)) => Self::Rect(lerp_rect(*old, *new, t)),
            (
                Self::Line {
                    start: old_start,
                    end: old_end,
                },
                Self::Line { start, end },
            ) => Self::Line {
                start: lerp_point(*old_start, *start, t),
                end: lerp_point(*old_end, *end, t),
            },
            (Self::Polygon(old), Self::Polygon(new)) => Self::Polygon(lerp_points(old, new, t)),
            (Self::Polyline(old), Self::Polyline(new)) => Self::Polyline(lerp_points(old, new, t)),
            (
                Self::Candle {
                    body: old_body,
                    high: old_high,
                    low: old_low,
                    ..
                },
                Self::Candle {
                    body,
                    high,
                    low,
                    is_bullish,
                },
            ) => Self::Candle {
                body: lerp_rect(*old_body, *body, t),
                high: lerp_point(*old_high, *high, t),
                low: lerp_point(*old_low, *low, t),
                is_bullish: *is_bullish,
            },
            (
                Self::Ellipse {
                    center: old_center,
                    radius_x: old_rx,
                    radius_y: old_ry,
                },
                Self::Ellipse {
                    center,
                    radius_x,
                    radius_y,
                },
            ) => Self::Ellipse {
                center: lerp_point(*old_center, *center, t),
                radius_x: lerp(*old_rx, *radius_x, t),
                radius_y: lerp(*old_ry, *radius_y, t),
            },
            (
                Self::Slice {
                    start_angle: old_start,
                    end_angle: old_end,
                    inner_radius: old_inner,
                    radius: old_radius,
                    ..
                },
                Self::Slice {
                    center,
                    start_angle,
                    end_angle,
                    inner_radius,
                    radius,
                },
            ) => Self::Slice {
                center: *center,
                start_angle: lerp(*old_start, *start_angle, t),
                end_angle: lerp(*old_end, *end_angle, t),
                inner_radius: lerp(*old_inner, *inner_radius, t),
                radius: lerp(*old_radius, *radius, t),
            },
            (Self::Rects(old), Self::Rects(new)) if old.len() == new.len() => Self::Rects(
                old.iter()
                    .zip(new)
                    .map(|(old, new)| lerp_rect(*old, *new, t))
                    .collect(),
            ),
            _ => self.clone(),
        }
    }
}

/// One segment of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Index of the first data point this segment was built from.
    pub index: usize,
    pub data: SegmentData,
    pub geometry: SegmentGeometry,
    /// True when a required data component is NaN.
    pub empty: bool,
    previous: Option<SegmentGeometry>,
}

impl Segment {
    /// Creates a segment with empty geometry; layout fills it in.
    #[must_use]
    pub fn new(index: usize, data: SegmentData, empty: bool) -> Self {
        Self {
            index,
            data,
            geometry: SegmentGeometry::Empty,
            empty,
            previous: None,
        }
    }

    #[must_use]
    pub fn previous(&self) -> Option<&SegmentGeometry> {
        self.previous.as_ref()
    }

    pub fn set_previous(&mut self, previous: SegmentGeometry) {
        self.previous = if previous.is_empty() {
            None
        } else {
            Some(previous)
        };
    }

    /// Geometry at animation progress `t`; without a previous snapshot the
    /// final geometry is returned.
    #[must_use]
    pub fn interpolated(&self, t: f64) -> SegmentGeometry {
        match &self.previous {
            Some(previous) => self.geometry.interpolate_from(previous, t),
            None => self.geometry.clone(),
        }
    }

    #[must_use]
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        !self.empty && self.geometry.contains(point, tolerance)
    }
}

/// Data point index under `point`, searching segments in order.
///
/// Batched rects report the position of the hit rect inside the batch.
#[must_use]
pub fn hit_test(segments: &[Segment], point: Point, tolerance: f64) -> Option<usize> {
    segments.iter().find_map(|segment| {
        if segment.empty {
            return None;
        }
        match &segment.geometry {
            SegmentGeometry::Rects(rects) => rects
                .iter()
                .position(|rect| rect.contains(point))
                .map(|position| segment.index + position),
            geometry => geometry
                .contains(point, tolerance)
                .then_some(segment.index),
        }
    })
}

#[must_use]
pub fn bounding_rect(points: &[Point]) -> Rect {
    let mut finite = points.iter().filter(|point| point.is_finite());
    let Some(first) = finite.next() else {
        return Rect::nan();
    };
    let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.x, first.y);
    for point in finite {
        left = left.min(point.x);
        top = top.min(point.y);
        right = right.max(point.x);
        bottom = bottom.max(point.y);
    }
    Rect::from_ltrb(left, top, right, bottom)
}

/// Shortest distance from `point` to the segment `start..end`.
#[must_use]
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return point.distance_to(start);
    }
    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance_to(Point::new(start.x + t * dx, start.y + t * dy))
}

/// Even-odd point-in-polygon test.
#[must_use]
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut previous = polygon[polygon.len() - 1];
    for current in polygon {
        if (current.y > point.y) != (previous.y > point.y) {
            let crossing_x =
                (previous.x - current.x) * (point.y - current.y) / (previous.y - current.y) + current.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        previous = *current;
    }
    inside
}

/// Flat bodies (open == close) are hit within the stroke tolerance.
fn rect_or_line_contains(rect: Rect, point: Point, tolerance: f64) -> bool {
    rect.inflate(0.0, if rect.height < tolerance { tolerance } else { 0.0 })
        .contains(point)
}

fn slice_contains(
    center: Point,
    start_angle: f64,
    end_angle: f64,
    inner_radius: f64,
    radius: f64,
    point: Point,
) -> bool {
    let distance = point.distance_to(center);
    if distance > radius || distance < inner_radius {
        return false;
    }
    let sweep = end_angle - start_angle;
    if sweep.abs() >= 360.0 {
        return true;
    }
    let angle = (point.y - center.y).atan2(point.x - center.x).to_degrees();
    let (from, sweep) = if sweep >= 0.0 {
        (start_angle, sweep)
    } else {
        (end_angle, -sweep)
    };
    (angle - from).rem_euclid(360.0) <= sweep
}

#[cfg(test)]
mod tests {
    use super::{Segment, SegmentData, SegmentGeometry, distance_to_segment, point_in_polygon};
    use crate::core::types::{Point, Rect};

    #[test]
    fn interpolation_blends_rectangles() {
        let mut segment = Segment::new(0, SegmentData::Xy { x: 0.0, y: 1.0 }, false);
        segment.geometry = SegmentGeometry::Rect(Rect::new(0.0, 100.0, 10.0, 0.0));
        segment.set_previous(SegmentGeometry::Rect(Rect::new(0.0, 0.0, 10.0, 100.0)));
        assert_eq!(
            segment.interpolated(0.5),
            SegmentGeometry::Rect(Rect::new(0.0, 50.0, 10.0, 50.0))
        );
    }

    #[test]
    fn polygon_test_handles_concave_shapes() {
        let shape = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(5.0, 5.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(2.0, 3.0), &shape));
        assert!(!point_in_polygon(Point::new(5.0, 8.0), &shape));
    }

    #[test]
    fn distance_clamps_to_segment_ends() {
        let distance = distance_to_segment(Point::new(-3.0, 4.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((distance - 5.0).abs() < 1e-12);
    }

    #[test]
    fn slice_hit_test_respects_sweep() {
        let slice = SegmentGeometry::Slice {
            center: Point::new(0.0, 0.0),
            start_angle: 0.0,
            end_angle: 90.0,
            inner_radius: 0.0,
            radius: 10.0,
        };
        assert!(slice.contains(Point::new(3.0, 3.0), 0.0));
        assert!(!slice.contains(Point::new(-3.0, 3.0), 0.0));
    }
}
