//! Labels anchored to a rectangle: columns, box bodies, markers.

use crate::core::types::{Point, Rect, Size};
use crate::labels::{BarAlignment, DataLabelPlacement, DataLabelSettings, LabelFrame};

/// Unit step in pixels pointing from the baseline toward the value.
fn growth_direction(positive: bool, frame: &LabelFrame) -> (f64, f64) {
    let grows_to_end = positive != frame.is_inversed;
    match (frame.is_transposed, grows_to_end) {
        (true, true) => (1.0, 0.0),
        (true, false) => (-1.0, 0.0),
        (false, true) => (0.0, -1.0),
        (false, false) => (0.0, 1.0),
    }
}

/// Point on the edge of `rect` reached when walking along `direction`.
fn edge_point(rect: Rect, direction: (f64, f64)) -> Point {
    let center = rect.center();
    Point::new(
        center.x + direction.0 * rect.width / 2.0,
        center.y + direction.1 * rect.height / 2.0,
    )
}

fn shifted(point: Point, direction: (f64, f64), distance: f64) -> Point {
    point.offset(direction.0 * distance, direction.1 * distance)
}

/// Label rect for a bar-like segment.
///
/// `positive` tells whether the value lies above the baseline in data
/// space. `Inner` keeps the label inside the bar at `bar_alignment`;
/// `Outer` puts it past the value edge; `Auto` prefers `Outer` and falls
/// back to `Inner` when the outer rect would leave the plot.
#[must_use]
pub fn rectangular_label_rect(
    rect: Rect,
    label: Size,
    positive: bool,
    settings: &DataLabelSettings,
    frame: &LabelFrame,
) -> Rect {
    if !rect.is_finite() {
        return Rect::nan();
    }
    let direction = growth_direction(positive, frame);
    let half = if frame.is_transposed {
        label.width / 2.0
    } else {
        label.height / 2.0
    };
    let value_edge = edge_point(rect, direction);
    let base_edge = edge_point(rect, (-direction.0, -direction.1));
    let reach = settings.padding + half;

    let inner = || {
        let center = match settings.bar_alignment {
            BarAlignment::Top => shifted(value_edge, direction, -reach),
            BarAlignment::Middle => rect.center(),
            BarAlignment::Bottom => shifted(base_edge, direction, reach),
        };
        Rect::from_center(center, label)
    };
    let outer = || Rect::from_center(shifted(value_edge, direction, reach), label);

    match settings.placement {
        DataLabelPlacement::Center => Rect::from_center(rect.center(), label),
        DataLabelPlacement::Inner => inner(),
        DataLabelPlacement::Outer => outer(),
        DataLabelPlacement::Auto => {
            let candidate = outer();
            if frame.plot.contains_rect(candidate) {
                candidate
            } else {
                inner()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rectangular_label_rect;
    use crate::core::types::{Rect, Size};
    use crate::labels::{DataLabelPlacement, DataLabelSettings, LabelFrame};

    fn frame(is_inversed: bool, is_transposed: bool) -> LabelFrame {
        LabelFrame {
            plot: Rect::new(0.0, 0.0, 200.0, 200.0),
            is_inversed,
            is_transposed,
        }
    }

    #[test]
    fn outer_label_sits_above_a_positive_column() {
        let settings = DataLabelSettings::default().with_placement(DataLabelPlacement::Outer);
        let rect = rectangular_label_rect(
            Rect::new(10.0, 100.0, 20.0, 100.0),
            Size::new(10.0, 10.0),
            true,
            &settings,
            &frame(false, false),
        );
        assert_eq!(rect.bottom(), 100.0 - settings.padding);
    }

    #[test]
    fn inversed_axis_flips_the_value_edge() {
        let settings = DataLabelSettings::default().with_placement(DataLabelPlacement::Outer);
        let rect = rectangular_label_rect(
            Rect::new(10.0, 0.0, 20.0, 100.0),
            Size::new(10.0, 10.0),
            true,
            &settings,
            &frame(true, false),
        );
        assert_eq!(rect.top, 100.0 + settings.padding);
    }

    #[test]
    fn auto_falls_back_inside_when_clipped() {
        let settings = DataLabelSettings::default();
        let rect = rectangular_label_rect(
            Rect::new(10.0, 0.0, 20.0, 200.0),
            Size::new(10.0, 10.0),
            true,
            &settings,
            &frame(false, false),
        );
        assert_eq!(rect.top, settings.padding);
    }

    #[test]
    fn transposed_columns_grow_to_the_right() {
        let settings = DataLabelSettings::default().with_placement(DataLabelPlacement::Outer);
        let rect = rectangular_label_rect(
            Rect::new(0.0, 10.0, 100.0, 20.0),
            Size::new(10.0, 10.0),
            true,
            &settings,
            &frame(false, true),
        );
        assert_eq!(rect.left, 100.0 + settings.padding);
    }
}
