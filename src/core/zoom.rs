//! Per-axis zoom/pan state.
//!
//! A `ZoomState` is a `(factor, position)` pair in unit space: the visible
//! window covers `[position, position + factor]` of the actual range.

use serde::{Deserialize, Serialize};

use crate::core::DoubleRange;

/// Multiplicative step used by `zoom_in`/`zoom_out` and per wheel notch.
pub const DEFAULT_ZOOM_STEP: f64 = 1.25;

/// Smallest factor accepted regardless of configuration.
const MIN_ZOOM_FACTOR_FLOOR: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    factor: f64,
    position: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::full()
    }
}

impl ZoomState {
    /// Full view: factor 1, position 0.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            factor: 1.0,
            position: 0.0,
        }
    }

    /// Builds a state clamped to `factor in [min_factor, 1]` and
    /// `position in [0, 1 - factor]`. NaN inputs fall back to the full view.
    #[must_use]
    pub fn clamped(factor: f64, position: f64, min_factor: f64) -> Self {
        let min_factor = if min_factor.is_finite() {
            min_factor.clamp(MIN_ZOOM_FACTOR_FLOOR, 1.0)
        } else {
            MIN_ZOOM_FACTOR_FLOOR
        };
        let factor = if factor.is_finite() {
            factor.clamp(min_factor, 1.0)
        } else {
            1.0
        };
        let position = if position.is_finite() {
            position.clamp(0.0, (1.0 - factor).max(0.0))
        } else {
            0.0
        };
        Self { factor, position }
    }

    #[must_use]
    pub fn factor(self) -> f64 {
        self.factor
    }

    #[must_use]
    pub fn position(self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn is_zoomed(self) -> bool {
        self.factor < 1.0 || self.position > 0.0
    }

    /// Cumulative zoom level (`1 / factor`).
    #[must_use]
    pub fn zoom_level(self) -> f64 {
        1.0 / self.factor
    }

    /// Narrows `actual` to the visible window.
    ///
    /// Logarithmic axes pass their log-space range, so the window is linear in exponents.
    #[must_use]
    pub fn visible_range(self, actual: DoubleRange) -> DoubleRange {
        if actual.is_empty() || !self.is_zoomed() {
            return actual;
        }
        let delta = actual.delta();
        DoubleRange::new(
            actual.start() + self.position * delta,
            actual.start() + (self.position + self.factor) * delta,
        )
    }

    /// State showing `[start, end]` (data units of `actual`).
    #[must_use]
    pub fn zoom_by_range(actual: DoubleRange, start: f64, end: f64, min_factor: f64) -> Self {
        let delta = actual.delta();
        if !delta.is_finite() || delta <= 0.0 {
            return Self::full();
        }
        let window = DoubleRange::new(start, end);
        if window.is_empty() {
            return Self::full();
        }
        Self::clamped(
            window.delta() / delta,
            (window.start() - actual.start()) / delta,
            min_factor,
        )
    }

    #[must_use]
    pub fn zoom_to_factor(position: f64, factor: f64, min_factor: f64) -> Self {
        Self::clamped(factor, position, min_factor)
    }

    /// Shrinks the window by `step` around its center.
    #[must_use]
    pub fn zoom_in(self, step: f64, min_factor: f64) -> Self {
        self.rescale_around_center(1.0 / valid_step(step), min_factor)
    }

    /// Grows the window by `step` around its center.
    #[must_use]
    pub fn zoom_out(self, step: f64, min_factor: f64) -> Self {
        self.rescale_around_center(valid_step(step), min_factor)
    }

    fn rescale_around_center(self, multiplier: f64, min_factor: f64) -> Self {
        let center = self.position + self.factor / 2.0;
        let factor = self.factor * multiplier;
        Self::clamped(factor, center - factor / 2.0, min_factor)
    }

    /// Applies a cumulative zoom level keeping the data under `origin` fixed.
    ///
    /// `origin` is the focal point as a fraction of the current window,
    /// measured from the axis start.
    #[must_use]
    pub fn zoom_at(self, zoom_level: f64, origin: f64, min_factor: f64) -> Self {
        if !zoom_level.is_finite() || !origin.is_finite() {
            return self;
        }
        let factor = (1.0 / zoom_level.max(1.0)).clamp(0.0, 1.0);
        let origin = origin.clamp(0.0, 1.0);
        let position = self.position + (self.factor - factor) * origin;
        Self::clamped(factor, position, min_factor)
    }

    /// Shifts the window by `delta` unit-space, stopping at the actual range ends.
    #[must_use]
    pub fn pan_by(self, delta: f64, min_factor: f64) -> Self {
        if !delta.is_finite() {
            return self;
        }
        Self::clamped(self.factor, self.position + delta, min_factor)
    }
}

fn valid_step(step: f64) -> f64 {
    if step.is_finite() && step > 1.0 {
        step
    } else {
        DEFAULT_ZOOM_STEP
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AutoScrollingMode {
    /// Window anchored at the actual range start.
    Start,
    /// Window anchored at the actual range end.
    #[default]
    End,
}

/// Zoom state showing `delta` units of `actual`, anchored per `mode`.
///
/// Returns `None` when the delta is unusable or covers the whole range.
#[must_use]
pub fn auto_scrolling_state(
    actual: DoubleRange,
    delta: f64,
    mode: AutoScrollingMode,
    min_factor: f64,
) -> Option<ZoomState> {
    let actual_delta = actual.delta();
    if !delta.is_finite() || delta <= 0.0 || !actual_delta.is_finite() || actual_delta <= 0.0 {
        return None;
    }
    if delta >= actual_delta {
        return None;
    }
    let factor = delta / actual_delta;
    let position = match mode {
        AutoScrollingMode::Start => 0.0,
        AutoScrollingMode::End => 1.0 - factor,
    };
    Some(ZoomState::clamped(factor, position, min_factor))
}
