use serde::{Deserialize, Serialize};

use crate::core::axis::AxisConfig;
use crate::core::series::SeriesKind;
use crate::core::transform::PolarStartAngle;
use crate::core::types::Size;
use crate::error::{ChartError, ChartResult};
use crate::interaction::ZoomPanBehavior;
use crate::labels::DataLabelSettings;

/// How a chart area arranges its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChartAreaKind {
    #[default]
    Cartesian,
    Polar,
    /// Pie and doughnut series; axes are ignored.
    Circular,
    Pyramid,
    Funnel,
}

impl ChartAreaKind {
    /// Kinds whose series are plotted against an axis pair.
    #[must_use]
    pub fn uses_axes(self) -> bool {
        matches!(self, Self::Cartesian | Self::Polar)
    }

    /// Whether series of `kind` are drawn in this area.
    #[must_use]
    pub fn accepts(self, kind: &SeriesKind) -> bool {
        match self {
            Self::Cartesian => !kind.is_circular() && !kind.is_triangular(),
            Self::Polar => kind.has_polar_geometry(),
            Self::Circular => kind.is_circular(),
            Self::Pyramid => matches!(kind, SeriesKind::Pyramid(_)),
            Self::Funnel => matches!(kind, SeriesKind::Funnel(_)),
        }
    }
}

/// Whether an axis carries x or y values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisRole {
    X,
    Y,
}

impl AxisRole {
    /// Screen orientation of an axis with this role.
    #[must_use]
    pub fn is_vertical(self, is_transposed: bool) -> bool {
        (self == Self::Y) != is_transposed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryAxisConfig {
    pub role: AxisRole,
    pub axis: AxisConfig,
}

/// Declarative chart-area settings.
///
/// Only configuration round-trips through JSON; computed ranges, rects and
/// segments never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAreaConfig {
    #[serde(default)]
    pub kind: ChartAreaKind,
    pub size: Size,
    #[serde(default)]
    pub is_transposed: bool,
    #[serde(default)]
    pub polar_start_angle: PolarStartAngle,
    #[serde(default = "default_primary_x_axis")]
    pub primary_x_axis: AxisConfig,
    #[serde(default = "default_primary_y_axis")]
    pub primary_y_axis: AxisConfig,
    #[serde(default)]
    pub secondary_axes: Vec<SecondaryAxisConfig>,
    #[serde(default)]
    pub zoom_pan: ZoomPanBehavior,
    #[serde(default)]
    pub data_labels: DataLabelSettings,
}

fn default_primary_x_axis() -> AxisConfig {
    AxisConfig::numeric("primaryXAxis")
}

fn default_primary_y_axis() -> AxisConfig {
    AxisConfig::numeric("primaryYAxis")
}

impl ChartAreaConfig {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            kind: ChartAreaKind::Cartesian,
            size,
            is_transposed: false,
            polar_start_angle: PolarStartAngle::default(),
            primary_x_axis: default_primary_x_axis(),
            primary_y_axis: default_primary_y_axis(),
            secondary_axes: Vec::new(),
            zoom_pan: ZoomPanBehavior::default(),
            data_labels: DataLabelSettings::default(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ChartAreaKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_transposed(mut self, is_transposed: bool) -> Self {
        self.is_transposed = is_transposed;
        self
    }

    #[must_use]
    pub fn with_polar_start_angle(mut self, start_angle: PolarStartAngle) -> Self {
        self.polar_start_angle = start_angle;
        self
    }

    #[must_use]
    pub fn with_primary_axes(mut self, x_axis: AxisConfig, y_axis: AxisConfig) -> Self {
        self.primary_x_axis = x_axis;
        self.primary_y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_secondary_axis(mut self, role: AxisRole, axis: AxisConfig) -> Self {
        self.secondary_axes.push(SecondaryAxisConfig { role, axis });
        self
    }

    #[must_use]
    pub fn with_zoom_pan(mut self, zoom_pan: ZoomPanBehavior) -> Self {
        self.zoom_pan = zoom_pan;
        self
    }

    #[must_use]
    pub fn with_data_labels(mut self, data_labels: DataLabelSettings) -> Self {
        self.data_labels = data_labels;
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse chart area config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart area config: {e}"))
        })
    }
}
