use crate::core::axis::AxisConfig;
use crate::core::series::SeriesConfig;
use crate::core::types::Size;
use crate::error::{ChartError, ChartResult};

use super::{ChartArea, ChartAreaConfig, ChartAreaKind};

pub(super) fn validate_size(size: Size) -> ChartResult<()> {
    if !size.is_valid() {
        return Err(ChartError::InvalidSize {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}

impl ChartAreaConfig {
    pub fn validate(&self) -> ChartResult<()> {
        validate_size(self.size)?;
        self.zoom_pan.validate()?;
        self.data_labels.validate()?;

        let axes = [&self.primary_x_axis, &self.primary_y_axis]
            .into_iter()
            .chain(self.secondary_axes.iter().map(|secondary| &secondary.axis));
        let mut names: Vec<&str> = Vec::new();
        for axis in axes {
            axis.validate()?;
            if names.contains(&axis.name.as_str()) {
                return Err(ChartError::InvalidConfig(format!(
                    "duplicate axis name `{}`",
                    axis.name
                )));
            }
            names.push(&axis.name);
        }
        Ok(())
    }
}

impl ChartArea {
    /// Checks a series config against this area's kind.
    pub(super) fn validate_series_config(&self, config: &SeriesConfig) -> ChartResult<()> {
        config.validate()?;
        if self.kind == ChartAreaKind::Polar && !config.kind.has_polar_geometry() {
            return Err(ChartError::InvalidConfig(format!(
                "{} series `{}` cannot be drawn in a polar area",
                config.kind.name(),
                config.name
            )));
        }
        Ok(())
    }

    /// Checks an axis config that is about to join this area.
    pub(super) fn validate_new_axis(&self, config: &AxisConfig) -> ChartResult<()> {
        config.validate()?;
        if self.axis_by_name(&config.name).is_some() {
            return Err(ChartError::InvalidConfig(format!(
                "duplicate axis name `{}`",
                config.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{AxisRole, ChartAreaConfig};
    use crate::core::axis::AxisConfig;
    use crate::core::types::Size;
    use crate::error::ChartError;

    #[test]
    fn rejects_empty_size() {
        let config = ChartAreaConfig::new(Size::new(0.0, 300.0));
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidSize { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_axis_names() {
        let config = ChartAreaConfig::new(Size::new(400.0, 300.0))
            .with_secondary_axis(AxisRole::Y, AxisConfig::numeric("primaryYAxis"));
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidConfig(_))
        ));
    }
}
