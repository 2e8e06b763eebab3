use tracing::debug;

use crate::core::axis::{Axis, AxisConfig, AxisId};
use crate::error::{ChartError, ChartResult};

use super::{AxisRole, ChartArea};

impl ChartArea {
    #[must_use]
    pub fn primary_x_axis(&self) -> AxisId {
        self.primary_x_axis
    }

    #[must_use]
    pub fn primary_y_axis(&self) -> AxisId {
        self.primary_y_axis
    }

    /// Live axis by id; disposed and unknown ids are errors.
    pub fn axis(&self, id: AxisId) -> ChartResult<&Axis> {
        self.axes
            .get(id.0)
            .filter(|axis| !axis.is_disposed())
            .ok_or(ChartError::UnknownAxis(id))
    }

    pub(super) fn axis_mut(&mut self, id: AxisId) -> ChartResult<&mut Axis> {
        self.axes
            .get_mut(id.0)
            .filter(|axis| !axis.is_disposed())
            .ok_or(ChartError::UnknownAxis(id))
    }

    pub fn axis_role(&self, id: AxisId) -> ChartResult<AxisRole> {
        self.axis(id)?;
        Ok(self.axis_roles[id.0])
    }

    /// Every live axis in registration order.
    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.axes.iter().filter(|axis| !axis.is_disposed())
    }

    #[must_use]
    pub fn axis_by_name(&self, name: &str) -> Option<AxisId> {
        self.axes()
            .find(|axis| axis.name() == name)
            .map(Axis::id)
    }

    /// Registers a secondary axis.
    pub fn add_axis(&mut self, role: AxisRole, config: AxisConfig) -> ChartResult<AxisId> {
        self.validate_new_axis(&config)?;
        let id = AxisId(self.axes.len());
        debug!(axis = %id, name = %config.name, ?role, "axis added");
        self.axes
            .push(Axis::new(id, config, role.is_vertical(self.is_transposed)));
        self.axis_roles.push(role);
        Ok(id)
    }

    /// Disposes a secondary axis. Series that named it fall back to the
    /// primary axis on the next pass.
    pub fn remove_axis(&mut self, id: AxisId) -> ChartResult<()> {
        if id == self.primary_x_axis || id == self.primary_y_axis {
            return Err(ChartError::InvalidConfig(format!(
                "primary axis {id} cannot be removed"
            )));
        }
        self.axis_mut(id)?.dispose();
        for series in self.series.iter_mut().flatten() {
            if series.x_axis() == Some(id) || series.y_axis() == Some(id) {
                series.set_axes(None, None);
                series.clear_segments();
            }
        }
        for axis in &mut self.axes {
            axis.unassociate_axis(id);
        }
        debug!(axis = %id, "axis disposed");
        Ok(())
    }

    pub fn set_axis_config(&mut self, id: AxisId, config: AxisConfig) -> ChartResult<()> {
        config.validate()?;
        if self
            .axis_by_name(&config.name)
            .is_some_and(|existing| existing != id)
        {
            return Err(ChartError::InvalidConfig(format!(
                "duplicate axis name `{}`",
                config.name
            )));
        }
        self.axis_mut(id)?.set_config(config);
        Ok(())
    }

    #[must_use]
    pub fn is_transposed(&self) -> bool {
        self.is_transposed
    }

    /// Swaps the screen orientation of every axis.
    pub fn set_transposed(&mut self, is_transposed: bool) {
        self.is_transposed = is_transposed;
        for (axis, role) in self.axes.iter_mut().zip(&self.axis_roles) {
            axis.set_vertical(role.is_vertical(is_transposed));
        }
    }
}
