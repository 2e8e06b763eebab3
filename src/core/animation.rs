//! Progress-driven interpolation. The caller owns the clock and passes `t`.

use crate::core::types::{Point, Rect};

/// `old + t * (new - old)`; a NaN `old` jumps straight to `new`.
#[must_use]
pub fn lerp(old: f64, new: f64, t: f64) -> f64 {
    if old.is_nan() {
        return new;
    }
    let t = clamp_progress(t);
    old + t * (new - old)
}

/// Clamps progress into `[0, 1]`; NaN counts as finished.
#[must_use]
pub fn clamp_progress(t: f64) -> f64 {
    if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) }
}

#[must_use]
pub fn lerp_point(old: Point, new: Point, t: f64) -> Point {
    Point::new(lerp(old.x, new.x, t), lerp(old.y, new.y, t))
}

#[must_use]
pub fn lerp_rect(old: Rect, new: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(old.left, new.left, t),
        lerp(old.top, new.top, t),
        lerp(old.width, new.width, t),
        lerp(old.height, new.height, t),
    )
}

/// Point lists blend pairwise; a length change snaps to `new`.
#[must_use]
pub fn lerp_points(old: &[Point], new: &[Point], t: f64) -> Vec<Point> {
    if old.len() != new.len() {
        return new.to_vec();
    }
    old.iter()
        .zip(new)
        .map(|(old, new)| lerp_point(*old, *new, t))
        .collect()
}
