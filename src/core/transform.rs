//! Data <-> pixel mapping for Cartesian and polar axes.
//!
//! Every conversion passes through a coefficient: the value's fraction of
//! the visible range after inversion. Unusable ranges and NaN inputs
//! produce NaN, which callers treat as "do not draw".

use serde::{Deserialize, Serialize};

use crate::core::axis::{Axis, AxisKind};
use crate::core::log_axis::{get_log_value, get_pow_value};
use crate::core::types::{Point, Rect};

impl Axis {
    fn log_base(&self) -> Option<f64> {
        match &self.config().kind {
            AxisKind::Logarithmic(params) => Some(params.log_base),
            _ => None,
        }
    }

    /// Raw data value to the space the axis ranges are stored in.
    #[must_use]
    pub fn to_axis_space(&self, value: f64) -> f64 {
        match self.log_base() {
            Some(base) => get_log_value(value, base),
            None => value,
        }
    }

    /// Inverse of [`Axis::to_axis_space`].
    #[must_use]
    pub fn from_axis_space(&self, value: f64) -> f64 {
        match self.log_base() {
            Some(base) => get_pow_value(value, base),
            None => value,
        }
    }

    /// Fraction of the visible range, flipped for inversed axes.
    #[must_use]
    pub fn value_to_coefficient(&self, value: f64) -> f64 {
        let range = self.visible_range();
        let delta = range.delta();
        if range.is_empty() || !delta.is_finite() || delta == 0.0 {
            return f64::NAN;
        }
        let coefficient = (self.to_axis_space(value) - range.start()) / delta;
        if self.is_inversed() {
            1.0 - coefficient
        } else {
            coefficient
        }
    }

    #[must_use]
    pub fn coefficient_to_value(&self, coefficient: f64) -> f64 {
        let range = self.visible_range();
        if range.is_empty() || !coefficient.is_finite() {
            return f64::NAN;
        }
        let coefficient = if self.is_inversed() {
            1.0 - coefficient
        } else {
            coefficient
        };
        self.from_axis_space(range.start() + coefficient * range.delta())
    }

    /// Pixel span between the two plot offsets.
    #[must_use]
    pub fn effective_length(&self) -> f64 {
        let config = self.config();
        self.rendered_length() - config.plot_offset_start - config.plot_offset_end
    }

    /// Absolute pixel coordinate of a coefficient along this axis.
    ///
    /// Horizontal axes grow to the right; vertical axes grow upward, so the
    /// end offset sits at the top of the rendered rect.
    #[must_use]
    pub fn coefficient_to_point(&self, coefficient: f64) -> f64 {
        let rect = self.rendered_rect();
        let length = self.effective_length();
        if !rect.is_finite() || !length.is_finite() || !coefficient.is_finite() {
            return f64::NAN;
        }
        let config = self.config();
        if self.is_vertical() {
            rect.top + config.plot_offset_end + (1.0 - coefficient) * length
        } else {
            rect.left + config.plot_offset_start + coefficient * length
        }
    }

    #[must_use]
    pub fn point_to_coefficient(&self, point: f64) -> f64 {
        let rect = self.rendered_rect();
        let length = self.effective_length();
        if !rect.is_finite() || !length.is_finite() || length == 0.0 || !point.is_finite() {
            return f64::NAN;
        }
        let config = self.config();
        if self.is_vertical() {
            1.0 - (point - rect.top - config.plot_offset_end) / length
        } else {
            (point - rect.left - config.plot_offset_start) / length
        }
    }

    #[must_use]
    pub fn value_to_point(&self, value: f64) -> f64 {
        self.coefficient_to_point(self.value_to_coefficient(value))
    }

    #[must_use]
    pub fn point_to_value(&self, point: f64) -> f64 {
        self.coefficient_to_value(self.point_to_coefficient(point))
    }

    /// Position of `point` as a fraction of the visible window measured from
    /// the range start, clamped to `[0, 1]`. Used as the zoom origin.
    #[must_use]
    pub fn focal_coefficient(&self, point: f64) -> f64 {
        let coefficient = self.point_to_coefficient(point);
        if !coefficient.is_finite() {
            return 0.5;
        }
        let from_start = if self.is_inversed() {
            1.0 - coefficient
        } else {
            coefficient
        };
        from_start.clamp(0.0, 1.0)
    }
}

/// Angle where polar x value zero is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PolarStartAngle {
    /// 3 o'clock.
    Rotate0,
    /// 6 o'clock.
    Rotate90,
    /// 9 o'clock.
    Rotate180,
    /// 12 o'clock.
    #[default]
    Rotate270,
}

impl PolarStartAngle {
    #[must_use]
    pub fn degrees(self) -> f64 {
        match self {
            Self::Rotate0 => 0.0,
            Self::Rotate90 => 90.0,
            Self::Rotate180 => 180.0,
            Self::Rotate270 => 270.0,
        }
    }
}

/// Screen point at `radius` and `theta_degrees` (clockwise, screen y down).
#[must_use]
pub fn polar_angle_to_point(
    center: Point,
    radius: f64,
    theta_degrees: f64,
    start_angle: PolarStartAngle,
) -> Point {
    let radians = (theta_degrees + start_angle.degrees()).to_radians();
    Point::new(
        center.x + radius * radians.cos(),
        center.y + radius * radians.sin(),
    )
}

/// Inverse of [`polar_angle_to_point`]: `(radius, theta_degrees in [0, 360))`.
#[must_use]
pub fn point_to_polar(center: Point, point: Point, start_angle: PolarStartAngle) -> (f64, f64) {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let radius = dx.hypot(dy);
    let theta = (dy.atan2(dx).to_degrees() - start_angle.degrees()).rem_euclid(360.0);
    (radius, theta)
}

/// Polar plot frame: circle inscribed in the plot rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarFrame {
    pub center: Point,
    pub radius: f64,
    pub start_angle: PolarStartAngle,
}

impl PolarFrame {
    #[must_use]
    pub fn inscribed(plot: Rect, start_angle: PolarStartAngle) -> Self {
        Self {
            center: plot.center(),
            radius: plot.width.min(plot.height) / 2.0,
            start_angle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateSystem {
    Cartesian,
    Polar(PolarFrame),
}

/// The x/y axis pair one series is plotted against.
///
/// Transposition is read from the axes: a vertical x axis swaps roles.
#[derive(Debug, Clone, Copy)]
pub struct SeriesTransform<'a> {
    pub x_axis: &'a Axis,
    pub y_axis: &'a Axis,
    pub system: CoordinateSystem,
}

impl<'a> SeriesTransform<'a> {
    #[must_use]
    pub fn cartesian(x_axis: &'a Axis, y_axis: &'a Axis) -> Self {
        Self {
            x_axis,
            y_axis,
            system: CoordinateSystem::Cartesian,
        }
    }

    #[must_use]
    pub fn is_transposed(&self) -> bool {
        self.x_axis.is_vertical()
    }

    #[must_use]
    pub fn transform(&self, x: f64, y: f64) -> Point {
        match self.system {
            CoordinateSystem::Cartesian => {
                let x_px = self.x_axis.value_to_point(x);
                let y_px = self.y_axis.value_to_point(y);
                if self.is_transposed() {
                    Point::new(y_px, x_px)
                } else {
                    Point::new(x_px, y_px)
                }
            }
            CoordinateSystem::Polar(frame) => {
                let angle = self.x_axis.value_to_coefficient(x) * 360.0;
                let radius = self.y_axis.value_to_coefficient(y) * frame.radius;
                if !angle.is_finite() || !radius.is_finite() {
                    return Point::nan();
                }
                polar_angle_to_point(frame.center, radius, angle, frame.start_angle)
            }
        }
    }

    /// Data values `(x, y)` under a pixel position.
    #[must_use]
    pub fn point_to_values(&self, point: Point) -> (f64, f64) {
        match self.system {
            CoordinateSystem::Cartesian => {
                if self.is_transposed() {
                    (
                        self.x_axis.point_to_value(point.y),
                        self.y_axis.point_to_value(point.x),
                    )
                } else {
                    (
                        self.x_axis.point_to_value(point.x),
                        self.y_axis.point_to_value(point.y),
                    )
                }
            }
            CoordinateSystem::Polar(frame) => {
                if frame.radius <= 0.0 {
                    return (f64::NAN, f64::NAN);
                }
                let (radius, theta) = point_to_polar(frame.center, point, frame.start_angle);
                (
                    self.x_axis.coefficient_to_value(theta / 360.0),
                    self.y_axis.coefficient_to_value(radius / frame.radius),
                )
            }
        }
    }

    /// Pixel of the y axis value `y` along the y direction (baseline helper).
    #[must_use]
    pub fn y_to_pixel(&self, y: f64) -> f64 {
        self.y_axis.value_to_point(y)
    }

    /// Pixel of the x axis value `x` along the x direction.
    #[must_use]
    pub fn x_to_pixel(&self, x: f64) -> f64 {
        self.x_axis.value_to_point(x)
    }

    /// Plot rect spanned by the two axes.
    #[must_use]
    pub fn plot_rect(&self) -> Rect {
        let (horizontal, vertical) = if self.is_transposed() {
            (self.y_axis, self.x_axis)
        } else {
            (self.x_axis, self.y_axis)
        };
        Rect::new(
            horizontal.rendered_rect().left,
            vertical.rendered_rect().top,
            horizontal.rendered_rect().width,
            vertical.rendered_rect().height,
        )
    }
}
