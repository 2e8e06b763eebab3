use tracing::debug;

use crate::core::axis::{Axis, AxisId};
use crate::core::types::Point;
use crate::core::zoom::ZoomState;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionMode, ZoomPanBehavior};

use super::ChartArea;

/// Pixel coordinate of `position` along the axis direction.
fn pixel_along(axis: &Axis, position: Point) -> f64 {
    if axis.is_vertical() {
        position.y
    } else {
        position.x
    }
}

impl ChartArea {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn zoom_pan_behavior(&self) -> &ZoomPanBehavior {
        self.interaction.behavior()
    }

    pub fn set_zoom_pan_behavior(&mut self, behavior: ZoomPanBehavior) -> ChartResult<()> {
        behavior.validate()?;
        self.interaction.set_behavior(behavior);
        Ok(())
    }

    pub fn pan_start(&mut self) {
        self.interaction.on_pan_start();
    }

    pub fn pan_end(&mut self) {
        self.interaction.on_pan_end();
    }

    /// Runs `gesture` on every live axis, stores the new states and
    /// relayouts when anything moved.
    fn apply_gesture(
        &mut self,
        gesture: impl Fn(&ZoomPanBehavior, &Axis) -> Option<ZoomState>,
    ) -> bool {
        if !self.kind.uses_axes() {
            return false;
        }
        let behavior = *self.interaction.behavior();
        let updates: Vec<(usize, ZoomState)> = self
            .axes
            .iter()
            .enumerate()
            .filter(|(_, axis)| !axis.is_disposed())
            .filter_map(|(index, axis)| gesture(&behavior, axis).map(|zoom| (index, zoom)))
            .collect();
        if updates.is_empty() {
            return false;
        }
        for (index, zoom) in updates {
            debug!(
                axis = index,
                factor = zoom.factor(),
                position = zoom.position(),
                "axis zoom changed"
            );
            self.axes[index].set_zoom_state(zoom);
        }
        self.update();
        true
    }

    fn is_over_plot(&self, position: Point) -> bool {
        self.plot_rect.is_finite() && self.plot_rect.contains(position)
    }

    /// Wheel zoom around the pointer; positive `steps` zoom in.
    pub fn mouse_wheel(&mut self, position: Point, steps: f64) -> bool {
        if !self.is_over_plot(position) {
            return false;
        }
        self.apply_gesture(|behavior, axis| {
            let origin = axis.focal_coefficient(pixel_along(axis, position));
            behavior.on_mouse_wheel(axis, origin, steps)
        })
    }

    pub fn double_tap(&mut self, position: Point) -> bool {
        if !self.is_over_plot(position) {
            return false;
        }
        self.apply_gesture(|behavior, axis| {
            let origin = axis.focal_coefficient(pixel_along(axis, position));
            behavior.on_double_tap(axis, origin)
        })
    }

    /// Pinch by `scale` (ratio since the previous event) around `center`.
    pub fn pinch(&mut self, center: Point, scale: f64) -> bool {
        if !self.is_over_plot(center) {
            return false;
        }
        self.apply_gesture(|behavior, axis| {
            let origin = axis.focal_coefficient(pixel_along(axis, center));
            behavior.on_pinch(axis, scale, origin)
        })
    }

    /// Drag by `delta` pixels; only between [`ChartArea::pan_start`] and
    /// [`ChartArea::pan_end`].
    pub fn pan(&mut self, delta: Point) -> bool {
        if self.interaction.mode() != InteractionMode::Panning {
            return false;
        }
        self.apply_gesture(|behavior, axis| behavior.on_pan(axis, pixel_along(axis, delta)))
    }

    /// Zooms to the rectangle dragged between `start` and `end`.
    pub fn selection_zoom(&mut self, start: Point, end: Point) -> bool {
        self.apply_gesture(|behavior, axis| {
            behavior.on_selection(axis, pixel_along(axis, start), pixel_along(axis, end))
        })
    }

    /// One zoom step in (or out) around the centre of every targeted axis.
    pub fn zoom_step(&mut self, zoom_in: bool) -> bool {
        self.apply_gesture(|behavior, axis| {
            if !behavior.zoom_mode.applies_to(axis.is_vertical()) {
                return None;
            }
            let zoom = axis.zoom_state();
            let next = if zoom_in {
                zoom.zoom_in(behavior.zoom_step, axis.min_zoom_factor())
            } else {
                zoom.zoom_out(behavior.zoom_step, axis.min_zoom_factor())
            };
            (next != zoom).then_some(next)
        })
    }

    pub fn set_axis_zoom(&mut self, id: AxisId, zoom: ZoomState) -> ChartResult<()> {
        self.axis_mut(id)?.set_zoom_state(zoom);
        self.update();
        Ok(())
    }

    /// Shows the raw data window `[start, end]` on an axis.
    pub fn zoom_axis_to_range(&mut self, id: AxisId, start: f64, end: f64) -> ChartResult<()> {
        let axis = self.axis(id)?;
        let (start, end) = (axis.to_axis_space(start), axis.to_axis_space(end));
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "zoom window [{start}, {end}] is not representable on axis {id}"
            )));
        }
        let zoom = ZoomState::zoom_by_range(
            axis.actual_range(),
            start.min(end),
            start.max(end),
            axis.min_zoom_factor(),
        );
        self.set_axis_zoom(id, zoom)
    }

    /// Back to the full range on every axis.
    pub fn reset_zoom(&mut self) -> bool {
        self.apply_gesture(|_, axis| {
            let zoom = axis.zoom_state();
            zoom.is_zoomed().then(ZoomState::full)
        })
    }
}
