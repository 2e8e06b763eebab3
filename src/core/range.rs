use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Immutable `[start, end]` span used by every axis kind.
///
/// Construction orders the bounds. A range built from a NaN bound is empty;
/// empty ranges are absorbing-neutral for `union` and report a NaN delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RangeBounds", into = "RangeBounds")]
pub struct DoubleRange {
    start: f64,
    end: f64,
}

/// Wire form of a range; decoding goes through [`DoubleRange::new`] so the
/// bounds come back ordered.
#[derive(Serialize, Deserialize)]
struct RangeBounds {
    start: f64,
    end: f64,
}

impl From<RangeBounds> for DoubleRange {
    fn from(bounds: RangeBounds) -> Self {
        Self::new(bounds.start, bounds.end)
    }
}

impl From<DoubleRange> for RangeBounds {
    fn from(range: DoubleRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl Default for DoubleRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl DoubleRange {
    pub const EMPTY: Self = Self {
        start: f64::NAN,
        end: f64::NAN,
    };

    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        if start.is_nan() || end.is_nan() {
            return Self::EMPTY;
        }
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Unit range `[start, start + 1]` used to repair degenerate spans.
    #[must_use]
    pub fn add_default_range(start: f64) -> Self {
        Self::new(start, start + 1.0)
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn median(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start.is_nan() || self.end.is_nan()
    }

    /// Returns `true` when the range is non-empty but spans a single value.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !self.is_empty() && self.start == self.end
    }

    #[must_use]
    pub fn union(self, other: DoubleRange) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Widens the range to include `value`; non-finite values are ignored.
    #[must_use]
    pub fn union_value(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        self.union(Self::new(value, value))
    }

    /// Extends both ends by `factor * delta`.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        if self.is_empty() {
            return self;
        }
        let delta = self.delta() * factor;
        Self::new(self.start - delta, self.end + delta)
    }

    #[must_use]
    pub fn offset(self, value: f64) -> Self {
        if self.is_empty() {
            return self;
        }
        Self::new(self.start + value, self.end + value)
    }

    #[must_use]
    pub fn intersects(self, other: DoubleRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start <= other.end
            && other.start <= self.end
    }

    /// Overlapping part of both ranges, or `EMPTY` when they are disjoint.
    #[must_use]
    pub fn intersection(self, other: DoubleRange) -> Self {
        if !self.intersects(other) {
            return Self::EMPTY;
        }
        Self::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// Inclusive membership test.
    #[must_use]
    pub fn inside(self, value: f64) -> bool {
        !self.is_empty() && value >= self.start && value <= self.end
    }

    /// Returns `true` when `other` lies inside this range.
    #[must_use]
    pub fn contains_range(self, other: DoubleRange) -> bool {
        !other.is_empty() && self.inside(other.start) && self.inside(other.end)
    }

    /// Maps each bound through `f`, re-ordering the result.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        if self.is_empty() {
            return self;
        }
        Self::new(f(self.start), f(self.end))
    }
}

impl Add for DoubleRange {
    type Output = DoubleRange;

    fn add(self, rhs: DoubleRange) -> Self::Output {
        self.union(rhs)
    }
}

impl FromIterator<f64> for DoubleRange {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        iter.into_iter()
            .fold(DoubleRange::EMPTY, DoubleRange::union_value)
    }
}
