//! High/low/open/close labels for candle and OHLC segments.
//!
//! Directions are taken from the projected geometry, so inversed and
//! transposed axes need no special casing.

use serde::{Deserialize, Serialize};

use crate::core::segment::SegmentGeometry;
use crate::core::types::{Point, Rect, Size};
use crate::labels::{DataLabelSettings, LabelFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancialComponent {
    High,
    Low,
    Open,
    Close,
}

/// Unit vector pointing from `low` toward `high`.
fn rising_direction(high: Point, low: Point, frame: &LabelFrame) -> (f64, f64) {
    let (dx, dy) = (high.x - low.x, high.y - low.y);
    let length = dx.hypot(dy);
    if length > f64::EPSILON {
        return (dx / length, dy / length);
    }
    match (frame.is_transposed, frame.is_inversed) {
        (false, false) => (0.0, -1.0),
        (false, true) => (0.0, 1.0),
        (true, false) => (1.0, 0.0),
        (true, true) => (-1.0, 0.0),
    }
}

fn offset_rect(anchor: Point, direction: (f64, f64), label: Size, padding: f64) -> Rect {
    let half = if direction.0.abs() > direction.1.abs() {
        label.width / 2.0
    } else {
        label.height / 2.0
    };
    let distance = padding + half;
    Rect::from_center(
        anchor.offset(direction.0 * distance, direction.1 * distance),
        label,
    )
}

/// Point where `direction` leaves the candle body.
fn body_edge(body: Rect, direction: (f64, f64)) -> Point {
    let center = body.center();
    Point::new(
        center.x + direction.0 * body.width / 2.0,
        center.y + direction.1 * body.height / 2.0,
    )
}

/// One rect per component, each pushed outward from its own value.
///
/// Non-financial geometry yields nothing.
#[must_use]
pub fn financial_label_rects(
    geometry: &SegmentGeometry,
    sizes: [Size; 4],
    settings: &DataLabelSettings,
    frame: &LabelFrame,
) -> Vec<(FinancialComponent, Rect)> {
    let [high_size, low_size, open_size, close_size] = sizes;
    let padding = settings.padding;
    match geometry {
        SegmentGeometry::Candle {
            body,
            high,
            low,
            is_bullish,
        } => {
            let up = rising_direction(*high, *low, frame);
            let down = (-up.0, -up.1);
            let (open_dir, close_dir) = if *is_bullish { (down, up) } else { (up, down) };
            vec![
                (FinancialComponent::High, offset_rect(*high, up, high_size, padding)),
                (FinancialComponent::Low, offset_rect(*low, down, low_size, padding)),
                (
                    FinancialComponent::Open,
                    offset_rect(body_edge(*body, open_dir), open_dir, open_size, padding),
                ),
                (
                    FinancialComponent::Close,
                    offset_rect(body_edge(*body, close_dir), close_dir, close_size, padding),
                ),
            ]
        }
        SegmentGeometry::Ohlc {
            high,
            low,
            open,
            close,
            is_bullish,
        } => {
            let up = rising_direction(*high, *low, frame);
            let down = (-up.0, -up.1);
            let (open_dir, close_dir) = if *is_bullish { (down, up) } else { (up, down) };
            vec![
                (FinancialComponent::High, offset_rect(*high, up, high_size, padding)),
                (FinancialComponent::Low, offset_rect(*low, down, low_size, padding)),
                (
                    FinancialComponent::Open,
                    offset_rect(open.0, open_dir, open_size, padding),
                ),
                (
                    FinancialComponent::Close,
                    offset_rect(close.1, close_dir, close_size, padding),
                ),
            ]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{FinancialComponent, financial_label_rects};
    use crate::core::segment::SegmentGeometry;
    use crate::core::types::{Point, Rect, Size};
    use crate::labels::{DataLabelSettings, LabelFrame};

    #[test]
    fn high_goes_up_and_low_goes_down() {
        let geometry = SegmentGeometry::Candle {
            body: Rect::new(40.0, 40.0, 20.0, 20.0),
            high: Point::new(50.0, 20.0),
            low: Point::new(50.0, 80.0),
            is_bullish: true,
        };
        let frame = LabelFrame {
            plot: Rect::new(0.0, 0.0, 100.0, 100.0),
            is_inversed: false,
            is_transposed: false,
        };
        let settings = DataLabelSettings::default();
        let rects = financial_label_rects(&geometry, [Size::new(10.0, 10.0); 4], &settings, &frame);
        let find = |component| {
            rects
                .iter()
                .find(|(candidate, _)| *candidate == component)
                .map(|(_, rect)| *rect)
                .expect("component present")
        };
        assert_eq!(find(FinancialComponent::High).bottom(), 20.0 - settings.padding);
        assert_eq!(find(FinancialComponent::Low).top, 80.0 + settings.padding);
        // Bullish: open is the lower body edge.
        assert_eq!(find(FinancialComponent::Open).top, 60.0 + settings.padding);
        assert_eq!(find(FinancialComponent::Close).bottom(), 40.0 - settings.padding);
    }
}
