use crate::core::segment::{SegmentGeometry, bounding_rect};
use crate::core::types::{Point, Rect, Size};
use crate::labels::{DataLabelPlacement, DataLabelSettings};

/// Pyramid/funnel slice label: centred in the slice, or to its right.
///
/// `Auto` stays inside while the label fits the slice width at its centre.
#[must_use]
pub fn triangular_label_rect(
    geometry: &SegmentGeometry,
    size: Size,
    settings: &DataLabelSettings,
) -> Option<Rect> {
    let SegmentGeometry::Polygon(points) = geometry else {
        return None;
    };
    let bounds = bounding_rect(points);
    if !bounds.is_finite() {
        return None;
    }
    let center = bounds.center();
    let outside = Rect::new(
        bounds.right() + settings.padding,
        center.y - size.height / 2.0,
        size.width,
        size.height,
    );
    let inside = Rect::from_center(center, size);
    Some(match settings.placement {
        DataLabelPlacement::Inner | DataLabelPlacement::Center => inside,
        DataLabelPlacement::Outer => outside,
        DataLabelPlacement::Auto => {
            if size.width <= width_at(points, center.y) && size.height <= bounds.height {
                inside
            } else {
                outside
            }
        }
    })
}

/// Horizontal extent of the polygon along the line `y`.
fn width_at(points: &[Point], y: f64) -> f64 {
    let count = points.len();
    let crossings: Vec<f64> = (0..count)
        .filter_map(|index| {
            let a = points[index];
            let b = points[(index + 1) % count];
            let (low, high) = if a.y <= b.y { (a, b) } else { (b, a) };
            if y < low.y || y > high.y {
                return None;
            }
            if (high.y - low.y).abs() < f64::EPSILON {
                return Some(vec![a.x, b.x]);
            }
            let t = (y - low.y) / (high.y - low.y);
            Some(vec![low.x + t * (high.x - low.x)])
        })
        .flatten()
        .collect();
    let min = crossings.iter().copied().fold(f64::INFINITY, f64::min);
    let max = crossings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min.is_finite() && max.is_finite() {
        max - min
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::triangular_label_rect;
    use crate::core::segment::SegmentGeometry;
    use crate::core::types::{Point, Size};
    use crate::labels::DataLabelSettings;

    #[test]
    fn narrow_apex_slice_pushes_label_outside() {
        let geometry = SegmentGeometry::Polygon(vec![
            Point::new(50.0, 0.0),
            Point::new(45.0, 10.0),
            Point::new(55.0, 10.0),
            Point::new(50.0, 0.0),
        ]);
        let rect = triangular_label_rect(&geometry, Size::new(30.0, 8.0), &DataLabelSettings::default())
            .expect("polygon label");
        assert!(rect.left > 55.0);
    }
}
