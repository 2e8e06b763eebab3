//! Chart-area facade.
//!
//! [`ChartArea`] owns axes and series in flat arenas; cross-references are
//! [`AxisId`]/[`SeriesId`] indices. Hosts feed data, size and gestures in,
//! call [`ChartArea::update`] and read rects, segments and labels back.

mod axis_controller;
mod chart_area_config;
mod hit_test;
mod layout_pass;
mod series_controller;
mod validation;
mod view_models;
mod zoom_controller;

use crate::core::axis::{Axis, AxisId};
use crate::core::series::Series;
use crate::core::transform::PolarStartAngle;
use crate::core::types::{Rect, Size};
use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::labels::{DataLabel, DataLabelSettings};
use crate::layout::{ApproximateLabelMeasurer, AxisLayoutEngine, LabelMeasurer};

pub use chart_area_config::{AxisRole, ChartAreaConfig, ChartAreaKind, SecondaryAxisConfig};
pub use hit_test::HitTestResult;
pub use view_models::{LegendIcon, LegendItem, TooltipInfo};

pub struct ChartArea {
    kind: ChartAreaKind,
    size: Size,
    is_transposed: bool,
    polar_start_angle: PolarStartAngle,
    /// Indexed by `AxisId`; removed axes stay disposed in their slot.
    axes: Vec<Axis>,
    axis_roles: Vec<AxisRole>,
    primary_x_axis: AxisId,
    primary_y_axis: AxisId,
    /// Indexed by `SeriesId`; removed series leave `None`.
    series: Vec<Option<Series>>,
    interaction: InteractionState,
    layout: AxisLayoutEngine,
    measurer: Box<dyn LabelMeasurer + Send + Sync>,
    data_labels: DataLabelSettings,
    plot_rect: Rect,
    /// Data labels per series slot from the last pass.
    placed_labels: Vec<Vec<DataLabel>>,
}

impl ChartArea {
    pub fn new(config: ChartAreaConfig) -> ChartResult<Self> {
        config.validate()?;

        let is_transposed = config.is_transposed;
        let mut axes = Vec::with_capacity(2 + config.secondary_axes.len());
        let mut axis_roles = Vec::with_capacity(axes.capacity());
        let declared = [
            (AxisRole::X, config.primary_x_axis),
            (AxisRole::Y, config.primary_y_axis),
        ]
        .into_iter()
        .chain(
            config
                .secondary_axes
                .into_iter()
                .map(|secondary| (secondary.role, secondary.axis)),
        );
        for (role, axis_config) in declared {
            let id = AxisId(axes.len());
            axes.push(Axis::new(id, axis_config, role.is_vertical(is_transposed)));
            axis_roles.push(role);
        }

        Ok(Self {
            kind: config.kind,
            size: config.size,
            is_transposed,
            polar_start_angle: config.polar_start_angle,
            axes,
            axis_roles,
            primary_x_axis: AxisId(0),
            primary_y_axis: AxisId(1),
            series: Vec::new(),
            interaction: InteractionState::new(config.zoom_pan),
            layout: AxisLayoutEngine::new(),
            measurer: Box::new(ApproximateLabelMeasurer::default()),
            data_labels: config.data_labels,
            plot_rect: Rect::nan(),
            placed_labels: Vec::new(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ChartAreaKind {
        self.kind
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Changes the available size; takes effect on the next [`ChartArea::update`].
    pub fn set_size(&mut self, size: Size) -> ChartResult<()> {
        validation::validate_size(size)?;
        self.size = size;
        Ok(())
    }

    #[must_use]
    pub fn polar_start_angle(&self) -> PolarStartAngle {
        self.polar_start_angle
    }

    pub fn set_polar_start_angle(&mut self, start_angle: PolarStartAngle) {
        self.polar_start_angle = start_angle;
    }

    /// Plot rect of the last layout pass (NaN before the first one).
    #[must_use]
    pub fn plot_rect(&self) -> Rect {
        self.plot_rect
    }

    #[must_use]
    pub fn layout(&self) -> &AxisLayoutEngine {
        &self.layout
    }

    pub fn set_label_measurer(&mut self, measurer: impl LabelMeasurer + Send + Sync + 'static) {
        self.measurer = Box::new(measurer);
    }

    #[must_use]
    pub fn data_label_settings(&self) -> &DataLabelSettings {
        &self.data_labels
    }

    pub fn set_data_label_settings(&mut self, settings: DataLabelSettings) -> ChartResult<()> {
        settings.validate()?;
        self.data_labels = settings;
        Ok(())
    }

    /// Current settings as a config snapshot, ready for JSON.
    #[must_use]
    pub fn config(&self) -> ChartAreaConfig {
        let mut config = ChartAreaConfig::new(self.size)
            .with_kind(self.kind)
            .with_transposed(self.is_transposed)
            .with_polar_start_angle(self.polar_start_angle)
            .with_primary_axes(
                self.axes[self.primary_x_axis.0].config().clone(),
                self.axes[self.primary_y_axis.0].config().clone(),
            )
            .with_zoom_pan(*self.interaction.behavior())
            .with_data_labels(self.data_labels.clone());
        for (axis, role) in self.axes.iter().zip(&self.axis_roles) {
            if axis.is_disposed() || axis.id() == self.primary_x_axis || axis.id() == self.primary_y_axis {
                continue;
            }
            config = config.with_secondary_axis(*role, axis.config().clone());
        }
        config
    }
}
