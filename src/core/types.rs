use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_ole_date, decimal_to_f64};
use crate::error::ChartResult;

/// Pixel-space point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point used for geometry that must not be drawn.
    #[must_use]
    pub const fn nan() -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned pixel rectangle stored as origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds a rectangle from two corners in any order.
    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(left, top, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[must_use]
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::from_points(Point::new(left, top), Point::new(right, bottom))
    }

    #[must_use]
    pub fn from_center(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    #[must_use]
    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.is_finite() || self.width <= 0.0 || self.height <= 0.0
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Returns `true` when both rectangles share a region of non-zero area.
    #[must_use]
    pub fn intersects(self, other: Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Grows the rectangle by `dx` on the left and right and `dy` on the top and bottom.
    #[must_use]
    pub fn inflate(self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.left - dx,
            self.top - dy,
            (self.width + 2.0 * dx).max(0.0),
            (self.height + 2.0 * dy).max(0.0),
        )
    }

    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// Returns `true` when `inner` lies completely inside this rectangle.
    #[must_use]
    pub fn contains_rect(self, inner: Rect) -> bool {
        inner.left >= self.left - 1e-9
            && inner.top >= self.top - 1e-9
            && inner.right() <= self.right() + 1e-9
            && inner.bottom() <= self.bottom() + 1e-9
    }
}

/// Raw numeric XY sample used by bindings and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a sample from decimal-typed inputs.
    pub fn from_decimal(x: Decimal, y: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: decimal_to_f64(x, "x")?,
            y: decimal_to_f64(y, "y")?,
        })
    }

    /// Builds a date-time sample; `x` is stored as an OLE automation date.
    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: datetime_to_ole_date(time.naive_utc()),
            y: decimal_to_f64(value, "y")?,
        })
    }
}
