//! Pie and doughnut labels.
//!
//! Inner labels sit on the slice's mid radius. Outer labels leave the rim
//! through a two-part connector and are then shifted vertically per side
//! so neighbours do not overlap.

use ordered_float::OrderedFloat;

use crate::core::segment::SegmentGeometry;
use crate::core::transform::{PolarStartAngle, point_to_polar, polar_angle_to_point};
use crate::core::types::{Point, Rect, Size};
use crate::labels::{DataLabelPlacement, DataLabelSettings};

/// Radial length of the connector's first leg.
const CONNECTOR_RADIAL_PX: f64 = 10.0;
/// Horizontal length of the connector's second leg.
const CONNECTOR_HORIZONTAL_PX: f64 = 10.0;
/// Vertical gap kept between shifted outer labels.
const LABEL_SPACING_PX: f64 = 2.0;

/// Placement of one slice label.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularLabel {
    pub rect: Rect,
    /// Rim point, elbow and end point for outer labels.
    pub connector: Option<[Point; 3]>,
    pub is_outside: bool,
}

fn slice_parts(geometry: &SegmentGeometry) -> Option<(Point, f64, f64, f64, f64)> {
    match geometry {
        SegmentGeometry::Slice {
            center,
            start_angle,
            end_angle,
            inner_radius,
            radius,
        } => Some((*center, *start_angle, *end_angle, *inner_radius, *radius)),
        _ => None,
    }
}

/// `true` when `angle` lies inside the slice sweep (either direction).
fn angle_in_sweep(angle: f64, start: f64, end: f64) -> bool {
    let (low, high) = if start <= end { (start, end) } else { (end, start) };
    if high - low >= 360.0 {
        return true;
    }
    let offset = (angle - low).rem_euclid(360.0);
    offset <= high - low
}

fn fits_inside(rect: Rect, center: Point, start: f64, end: f64, inner: f64, radius: f64) -> bool {
    [
        Point::new(rect.left, rect.top),
        Point::new(rect.right(), rect.top),
        Point::new(rect.left, rect.bottom()),
        Point::new(rect.right(), rect.bottom()),
    ]
    .into_iter()
    .all(|corner| {
        let (distance, angle) = point_to_polar(center, corner, PolarStartAngle::Rotate0);
        distance >= inner && distance <= radius && angle_in_sweep(angle, start, end)
    })
}

fn inner_label(center: Point, mid: f64, inner: f64, radius: f64, size: Size) -> Rect {
    let anchor = polar_angle_to_point(center, (inner + radius) / 2.0, mid, PolarStartAngle::Rotate0);
    Rect::from_center(anchor, size)
}

fn outer_label(center: Point, mid: f64, radius: f64, size: Size, padding: f64) -> CircularLabel {
    let rim = polar_angle_to_point(center, radius, mid, PolarStartAngle::Rotate0);
    let elbow = polar_angle_to_point(
        center,
        radius + CONNECTOR_RADIAL_PX,
        mid,
        PolarStartAngle::Rotate0,
    );
    let to_right = elbow.x >= center.x;
    let end = elbow.offset(
        if to_right {
            CONNECTOR_HORIZONTAL_PX
        } else {
            -CONNECTOR_HORIZONTAL_PX
        },
        0.0,
    );
    let left = if to_right {
        end.x + padding
    } else {
        end.x - padding - size.width
    };
    CircularLabel {
        rect: Rect::new(left, end.y - size.height / 2.0, size.width, size.height),
        connector: Some([rim, elbow, end]),
        is_outside: true,
    }
}

/// Label for one slice; `None` for empty or non-slice geometry.
#[must_use]
pub fn circular_label(
    geometry: &SegmentGeometry,
    size: Size,
    settings: &DataLabelSettings,
) -> Option<CircularLabel> {
    let (center, start, end, inner, radius) = slice_parts(geometry)?;
    if !center.is_finite() || radius <= 0.0 {
        return None;
    }
    let mid = (start + end) / 2.0;
    let inside = |rect| CircularLabel {
        rect,
        connector: None,
        is_outside: false,
    };
    Some(match settings.placement {
        DataLabelPlacement::Inner | DataLabelPlacement::Center => {
            inside(inner_label(center, mid, inner, radius, size))
        }
        DataLabelPlacement::Outer => outer_label(center, mid, radius, size, settings.padding),
        DataLabelPlacement::Auto => {
            let rect = inner_label(center, mid, inner, radius, size);
            if fits_inside(rect, center, start, end, inner, radius) {
                inside(rect)
            } else {
                outer_label(center, mid, radius, size, settings.padding)
            }
        }
    })
}

/// Pushes overlapping outer labels apart, separately on each side of the pie.
///
/// Labels move down first; a stack that runs out of `plot` is then pushed
/// back up from the bottom edge. Connector end points follow their label.
pub fn resolve_circular_collisions(labels: &mut [Option<CircularLabel>], center: Point, plot: Rect) {
    for right_side in [true, false] {
        let mut side: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter_map(|(index, label)| {
                let label = label.as_ref()?;
                let on_right = label.rect.center().x >= center.x;
                (label.is_outside && on_right == right_side).then_some(index)
            })
            .collect();
        side.sort_by_key(|index| {
            OrderedFloat(labels[*index].as_ref().map_or(0.0, |label| label.rect.top))
        });

        let mut floor = f64::NEG_INFINITY;
        for index in &side {
            if let Some(label) = labels[*index].as_mut() {
                if label.rect.top < floor {
                    label.rect = label.rect.translate(0.0, floor - label.rect.top);
                }
                floor = label.rect.bottom() + LABEL_SPACING_PX;
            }
        }

        let mut ceiling = plot.bottom();
        for index in side.iter().rev() {
            if let Some(label) = labels[*index].as_mut() {
                if label.rect.bottom() > ceiling {
                    label.rect = label.rect.translate(0.0, ceiling - label.rect.bottom());
                }
                ceiling = label.rect.top - LABEL_SPACING_PX;
            }
        }

        for index in side {
            if let Some(label) = labels[index].as_mut() {
                let y = label.rect.center().y;
                if let Some(connector) = label.connector.as_mut() {
                    connector[2].y = y;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{circular_label, resolve_circular_collisions};
    use crate::core::segment::SegmentGeometry;
    use crate::core::types::{Point, Rect, Size};
    use crate::labels::{DataLabelPlacement, DataLabelSettings};

    fn slice(start_angle: f64, end_angle: f64) -> SegmentGeometry {
        SegmentGeometry::Slice {
            center: Point::new(100.0, 100.0),
            start_angle,
            end_angle,
            inner_radius: 0.0,
            radius: 80.0,
        }
    }

    #[test]
    fn wide_slice_keeps_its_label_inside() {
        let label = circular_label(&slice(0.0, 180.0), Size::new(20.0, 10.0), &DataLabelSettings::default())
            .expect("slice label");
        assert!(!label.is_outside);
        assert!((label.rect.center().y - 140.0).abs() < 1e-9);
    }

    #[test]
    fn thin_slice_label_moves_outside_with_connector() {
        let label = circular_label(&slice(0.0, 2.0), Size::new(20.0, 10.0), &DataLabelSettings::default())
            .expect("slice label");
        assert!(label.is_outside);
        assert!(label.rect.left > 180.0);
        assert!(label.connector.is_some());
    }

    #[test]
    fn stacked_outer_labels_are_separated() {
        let settings = DataLabelSettings::default().with_placement(DataLabelPlacement::Outer);
        let mut labels = vec![
            circular_label(&slice(0.0, 2.0), Size::new(20.0, 10.0), &settings),
            circular_label(&slice(2.0, 4.0), Size::new(20.0, 10.0), &settings),
        ];
        resolve_circular_collisions(&mut labels, Point::new(100.0, 100.0), Rect::new(0.0, 0.0, 300.0, 300.0));
        let first = labels[0].as_ref().expect("label").rect;
        let second = labels[1].as_ref().expect("label").rect;
        assert!(!first.intersects(second));
    }
}
