//! Zoom/pan behaviour driven by already-recognized gestures.
//!
//! Every handler is a pure function of the axis it targets: it returns the
//! new [`ZoomState`] (or `None` when the gesture does not apply) and leaves
//! applying it to the caller.

use serde::{Deserialize, Serialize};

use crate::core::axis::Axis;
use crate::core::zoom::{DEFAULT_ZOOM_STEP, ZoomState};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ZoomMode {
    /// Horizontal axes only.
    X,
    /// Vertical axes only.
    Y,
    #[default]
    XY,
}

impl ZoomMode {
    #[must_use]
    pub fn applies_to(self, is_vertical: bool) -> bool {
        match self {
            Self::X => !is_vertical,
            Self::Y => is_vertical,
            Self::XY => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// Tuning for gesture-driven zooming and panning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomPanBehavior {
    #[serde(default)]
    pub zoom_mode: ZoomMode,
    /// Deepest cumulative zoom level; `None` leaves only the numeric floor.
    #[serde(default)]
    pub maximum_zoom_level: Option<f64>,
    /// Level multiplier applied per wheel notch.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    #[serde(default = "default_double_tap_zoom_level")]
    pub double_tap_zoom_level: f64,
    #[serde(default = "default_true")]
    pub enable_panning: bool,
    #[serde(default = "default_true")]
    pub enable_pinch: bool,
    #[serde(default = "default_true")]
    pub enable_double_tap: bool,
    #[serde(default = "default_true")]
    pub enable_wheel: bool,
    #[serde(default = "default_true")]
    pub enable_selection: bool,
}

fn default_zoom_step() -> f64 {
    DEFAULT_ZOOM_STEP
}

fn default_double_tap_zoom_level() -> f64 {
    2.5
}

fn default_true() -> bool {
    true
}

impl Default for ZoomPanBehavior {
    fn default() -> Self {
        Self {
            zoom_mode: ZoomMode::XY,
            maximum_zoom_level: None,
            zoom_step: default_zoom_step(),
            double_tap_zoom_level: default_double_tap_zoom_level(),
            enable_panning: true,
            enable_pinch: true,
            enable_double_tap: true,
            enable_wheel: true,
            enable_selection: true,
        }
    }
}

impl ZoomPanBehavior {
    #[must_use]
    pub fn with_zoom_mode(mut self, zoom_mode: ZoomMode) -> Self {
        self.zoom_mode = zoom_mode;
        self
    }

    #[must_use]
    pub fn with_maximum_zoom_level(mut self, level: f64) -> Self {
        self.maximum_zoom_level = Some(level);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(level) = self.maximum_zoom_level {
            if !level.is_finite() || level < 1.0 {
                return Err(ChartError::InvalidConfig(
                    "maximum zoom level must be finite and >= 1".to_owned(),
                ));
            }
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ChartError::InvalidConfig(
                "zoom step must be finite and > 1".to_owned(),
            ));
        }
        if !self.double_tap_zoom_level.is_finite() || self.double_tap_zoom_level < 1.0 {
            return Err(ChartError::InvalidConfig(
                "double tap zoom level must be finite and >= 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Smallest zoom factor the behaviour allows.
    #[must_use]
    pub fn min_zoom_factor(&self) -> f64 {
        match self.maximum_zoom_level {
            Some(level) if level.is_finite() && level >= 1.0 => 1.0 / level,
            _ => 0.0,
        }
    }

    fn targets(&self, axis: &Axis) -> bool {
        self.zoom_mode.applies_to(axis.is_vertical())
    }

    fn changed(axis: &Axis, next: ZoomState) -> Option<ZoomState> {
        (next != axis.zoom_state()).then_some(next)
    }

    /// Zooms by `steps` wheel notches around `origin`.
    ///
    /// Positive steps zoom in. `origin` comes from [`Axis::focal_coefficient`].
    #[must_use]
    pub fn on_mouse_wheel(&self, axis: &Axis, origin: f64, steps: f64) -> Option<ZoomState> {
        if !self.enable_wheel || !self.targets(axis) || !steps.is_finite() || steps == 0.0 {
            return None;
        }
        let zoom = axis.zoom_state();
        let level = zoom.zoom_level() * self.zoom_step.powf(steps);
        Self::changed(axis, zoom.zoom_at(level, origin, axis.min_zoom_factor()))
    }

    /// Zooms to the double-tap level around `origin`, or resets a zoomed axis.
    #[must_use]
    pub fn on_double_tap(&self, axis: &Axis, origin: f64) -> Option<ZoomState> {
        if !self.enable_double_tap || !self.targets(axis) {
            return None;
        }
        let zoom = axis.zoom_state();
        let next = if zoom.is_zoomed() {
            ZoomState::full()
        } else {
            zoom.zoom_at(self.double_tap_zoom_level, origin, axis.min_zoom_factor())
        };
        Self::changed(axis, next)
    }

    /// Applies a pinch `scale` (ratio since the previous pinch event).
    #[must_use]
    pub fn on_pinch(&self, axis: &Axis, scale: f64, origin: f64) -> Option<ZoomState> {
        if !self.enable_pinch || !self.targets(axis) || !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let zoom = axis.zoom_state();
        let level = zoom.zoom_level() * scale;
        Self::changed(axis, zoom.zoom_at(level, origin, axis.min_zoom_factor()))
    }

    /// Moves the window so the content follows a drag of `delta_px`.
    ///
    /// Panning stops at the actual range ends.
    #[must_use]
    pub fn on_pan(&self, axis: &Axis, delta_px: f64) -> Option<ZoomState> {
        if !self.enable_panning || !self.targets(axis) || !delta_px.is_finite() {
            return None;
        }
        let zoom = axis.zoom_state();
        if !zoom.is_zoomed() {
            return None;
        }
        let length = axis.effective_length();
        if !length.is_finite() || length <= 0.0 {
            return None;
        }
        // Dragging right reveals smaller values; vertical pixels grow downward.
        let mut delta = delta_px / length * zoom.factor();
        if !axis.is_vertical() {
            delta = -delta;
        }
        if axis.is_inversed() {
            delta = -delta;
        }
        Self::changed(axis, zoom.pan_by(delta, axis.min_zoom_factor()))
    }

    /// Zooms to the data window between two pixel positions of a selection.
    #[must_use]
    pub fn on_selection(&self, axis: &Axis, start_px: f64, end_px: f64) -> Option<ZoomState> {
        if !self.enable_selection || !self.targets(axis) {
            return None;
        }
        let start = axis.to_axis_space(axis.point_to_value(start_px));
        let end = axis.to_axis_space(axis.point_to_value(end_px));
        if !start.is_finite() || !end.is_finite() || start == end {
            return None;
        }
        let next = ZoomState::zoom_by_range(
            axis.actual_range(),
            start.min(end),
            start.max(end),
            axis.min_zoom_factor(),
        );
        Self::changed(axis, next)
    }
}

/// Tracks whether a pan gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    behavior: ZoomPanBehavior,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            behavior: ZoomPanBehavior::default(),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn new(behavior: ZoomPanBehavior) -> Self {
        Self {
            mode: InteractionMode::Idle,
            behavior,
        }
    }

    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn behavior(&self) -> &ZoomPanBehavior {
        &self.behavior
    }

    pub fn set_behavior(&mut self, behavior: ZoomPanBehavior) {
        self.behavior = behavior;
    }

    pub fn on_pan_start(&mut self) {
        if self.behavior.enable_panning {
            self.mode = InteractionMode::Panning;
        }
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
