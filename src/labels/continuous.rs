//! Labels for line and area points.

use crate::core::types::{Point, Rect, Size};
use crate::labels::{DataLabelPlacement, DataLabelSettings, LabelFrame};

/// Whether the point at `index` takes its label on top.
///
/// Only strict valleys (both neighbours finite and larger) put the label
/// below; the first, last and NaN-adjacent points count as tops.
#[must_use]
pub fn is_top_with_label_index(values: &[f64], index: usize) -> bool {
    let Some(value) = values.get(index).copied() else {
        return true;
    };
    if index == 0 || index + 1 >= values.len() || !value.is_finite() {
        return true;
    }
    let previous = values[index - 1];
    let next = values[index + 1];
    if !previous.is_finite() || !next.is_finite() {
        return true;
    }
    !(previous > value && next > value)
}

/// Label rect around the projected point `anchor`.
///
/// `Auto` and `Outer` follow the peak test; `Inner` takes the opposite
/// side; `Center` centres the label on the point.
#[must_use]
pub fn continuous_label_rect(
    anchor: Point,
    label: Size,
    is_top: bool,
    settings: &DataLabelSettings,
    frame: &LabelFrame,
) -> Rect {
    if !anchor.is_finite() {
        return Rect::nan();
    }
    let above = match settings.placement {
        DataLabelPlacement::Center => return Rect::from_center(anchor, label),
        DataLabelPlacement::Auto | DataLabelPlacement::Outer => is_top,
        DataLabelPlacement::Inner => !is_top,
    };
    // "Above" in data space: screen up, or right on transposed charts.
    let toward_end = above != frame.is_inversed;
    let center = if frame.is_transposed {
        let distance = settings.padding + label.width / 2.0;
        anchor.offset(if toward_end { distance } else { -distance }, 0.0)
    } else {
        let distance = settings.padding + label.height / 2.0;
        anchor.offset(0.0, if toward_end { -distance } else { distance })
    };
    Rect::from_center(center, label)
}

#[cfg(test)]
mod tests {
    use super::{continuous_label_rect, is_top_with_label_index};
    use crate::core::types::{Point, Rect, Size};
    use crate::labels::{DataLabelSettings, LabelFrame};

    #[test]
    fn valleys_take_the_label_below() {
        let values = [5.0, 2.0, 6.0, f64::NAN, 1.0, 3.0];
        assert!(is_top_with_label_index(&values, 0));
        assert!(!is_top_with_label_index(&values, 1));
        assert!(is_top_with_label_index(&values, 2));
        assert!(is_top_with_label_index(&values, 4));
        assert!(is_top_with_label_index(&values, 5));
    }

    #[test]
    fn valley_label_hangs_below_the_point() {
        let frame = LabelFrame {
            plot: Rect::new(0.0, 0.0, 100.0, 100.0),
            is_inversed: false,
            is_transposed: false,
        };
        let settings = DataLabelSettings::default();
        let rect = continuous_label_rect(
            Point::new(50.0, 50.0),
            Size::new(20.0, 10.0),
            false,
            &settings,
            &frame,
        );
        assert_eq!(rect.top, 50.0 + settings.padding);
    }
}
