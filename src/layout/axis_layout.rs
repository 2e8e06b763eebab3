//! Arranges every axis of a chart area into pixel rectangles.
//!
//! Edge axes stack outward from the plot in registration order. Axes with
//! a crossing value sit on the pixel their orthogonal axis maps that value
//! to and reserve only the part of their band that leaves the plot.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis::{Axis, AxisId, TickPosition};
use crate::core::types::Rect;
use crate::layout::label_layout::AxisLabelLayout;
use crate::layout::measurer::LabelMeasurer;

/// Overflow changes below this many pixels end the crossing relayout.
const CROSSING_SETTLE_PX: f64 = 0.5;
const MAX_CROSSING_PASSES: usize = 3;

/// Steps of one layout pass, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutPhase {
    #[default]
    Init,
    ClearActualAxis,
    UpdateActualAxis,
    Measure,
    Arrange,
    Complete,
}

impl LayoutPhase {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Init => Self::ClearActualAxis,
            Self::ClearActualAxis => Self::UpdateActualAxis,
            Self::UpdateActualAxis => Self::Measure,
            Self::Measure => Self::Arrange,
            Self::Arrange | Self::Complete => Self::Complete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisEdge {
    Left,
    Top,
    Right,
    Bottom,
}

impl AxisEdge {
    #[must_use]
    pub fn of(is_vertical: bool, is_opposed: bool) -> Self {
        match (is_vertical, is_opposed) {
            (true, false) => Self::Left,
            (true, true) => Self::Right,
            (false, false) => Self::Bottom,
            (false, true) => Self::Top,
        }
    }

    /// +1 when the band grows toward larger pixel coordinates.
    #[must_use]
    pub fn outward_sign(self) -> f64 {
        match self {
            Self::Left | Self::Top => -1.0,
            Self::Right | Self::Bottom => 1.0,
        }
    }
}

/// Reserved thickness per plot edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeSizes {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl EdgeSizes {
    fn get_mut(&mut self, edge: AxisEdge) -> &mut f64 {
        match edge {
            AxisEdge::Left => &mut self.left,
            AxisEdge::Top => &mut self.top,
            AxisEdge::Right => &mut self.right,
            AxisEdge::Bottom => &mut self.bottom,
        }
    }

    #[must_use]
    pub fn get(&self, edge: AxisEdge) -> f64 {
        match edge {
            AxisEdge::Left => self.left,
            AxisEdge::Top => self.top,
            AxisEdge::Right => self.right,
            AxisEdge::Bottom => self.bottom,
        }
    }

    /// `area` with every edge inset; collapses to zero extent instead of inverting.
    #[must_use]
    pub fn inset(&self, area: Rect) -> Rect {
        Rect::new(
            area.left + self.left,
            area.top + self.top,
            (area.width - self.left - self.right).max(0.0),
            (area.height - self.top - self.bottom).max(0.0),
        )
    }
}

/// Measured and arranged placement of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub axis: AxisId,
    pub edge: AxisEdge,
    /// Crossing value resolved against the orthogonal visible range.
    pub crossing_value: Option<f64>,
    pub cross_axis: Option<AxisId>,
    /// Tick + labels + title thickness.
    pub desired_size: f64,
    /// Pixel coordinate of the axis line across the axis direction.
    pub line: f64,
    pub labels: AxisLabelLayout,
    pub title_rect: Option<Rect>,
}

impl AxisLayout {
    #[must_use]
    pub fn is_crossing(&self) -> bool {
        self.crossing_value.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AxisLayoutEngine {
    phase: LayoutPhase,
    edge_sizes: EdgeSizes,
    layouts: Vec<AxisLayout>,
    plot_rect: Option<Rect>,
}

impl AxisLayoutEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    /// Moves to the next phase.
    pub fn advance(&mut self) -> LayoutPhase {
        self.phase = self.phase.next();
        trace!(phase = ?self.phase, "axis layout phase");
        self.phase
    }

    /// Starts a new pass from `Init`.
    pub fn begin(&mut self) {
        self.phase = LayoutPhase::Init;
        self.edge_sizes = EdgeSizes::default();
        self.layouts.clear();
        self.plot_rect = None;
    }

    #[must_use]
    pub fn edge_sizes(&self) -> EdgeSizes {
        self.edge_sizes
    }

    #[must_use]
    pub fn layouts(&self) -> &[AxisLayout] {
        &self.layouts
    }

    #[must_use]
    pub fn layout_of(&self, axis: AxisId) -> Option<&AxisLayout> {
        self.layouts.iter().find(|layout| layout.axis == axis)
    }

    #[must_use]
    pub fn plot_rect(&self) -> Option<Rect> {
        self.plot_rect
    }

    /// Desired sizes of every live axis, laid along the whole `area`.
    pub fn measure(&mut self, axes: &mut [Axis], area: Rect, measurer: &dyn LabelMeasurer) {
        self.phase = LayoutPhase::Measure;
        self.layouts.clear();

        let crossings = resolve_crossings(axes);
        for (index, crossing) in crossings.into_iter().enumerate() {
            let axis = &mut axes[index];
            if axis.is_disposed() {
                continue;
            }
            set_along_span(axis, area);
            let labels = AxisLabelLayout::compute(axis, measurer);
            let title_extent = title_extent(axis, measurer);
            let desired_size = outside_tick_length(axis) + labels.band_extent() + title_extent;
            self.layouts.push(AxisLayout {
                axis: axis.id(),
                edge: AxisEdge::of(axis.is_vertical(), axis.is_opposed()),
                crossing_value: crossing.map(|(value, _)| value),
                cross_axis: crossing.map(|(_, cross)| cross),
                desired_size,
                line: f64::NAN,
                labels,
                title_rect: None,
            });
        }
    }

    /// Final rects for every measured axis; returns the plot rect.
    pub fn arrange(&mut self, axes: &mut [Axis], area: Rect, measurer: &dyn LabelMeasurer) -> Rect {
        self.phase = LayoutPhase::Arrange;

        let mut stacked = EdgeSizes::default();
        for layout in self.layouts.iter().filter(|layout| !layout.is_crossing()) {
            *stacked.get_mut(layout.edge) += layout.desired_size;
        }

        let mut overflow = EdgeSizes::default();
        let mut plot = area;
        for _ in 0..MAX_CROSSING_PASSES {
            let reserved = EdgeSizes {
                left: stacked.left + overflow.left,
                top: stacked.top + overflow.top,
                right: stacked.right + overflow.right,
                bottom: stacked.bottom + overflow.bottom,
            };
            plot = reserved.inset(area);
            self.place_axes(axes, plot, overflow);
            let next = self.crossing_overflow(plot);
            let settled = [AxisEdge::Left, AxisEdge::Top, AxisEdge::Right, AxisEdge::Bottom]
                .into_iter()
                .all(|edge| (next.get(edge) - overflow.get(edge)).abs() < CROSSING_SETTLE_PX);
            overflow = next;
            self.edge_sizes = reserved;
            if settled {
                break;
            }
        }

        for layout in &mut self.layouts {
            let Some(axis) = axes.get_mut(layout.axis.0) else {
                continue;
            };
            // Label positions follow the final axis span.
            layout.labels = AxisLabelLayout::compute(axis, measurer);
            let offset = outside_tick_length(axis);
            layout
                .labels
                .place(axis.visible_labels_mut(), layout.edge, layout.line, offset);
            layout.title_rect = title_rect(axis, layout, measurer);
        }

        self.plot_rect = Some(plot);
        self.phase = LayoutPhase::Complete;
        plot
    }

    fn place_axes(&mut self, axes: &mut [Axis], plot: Rect, crossing_overflow: EdgeSizes) {
        for layout in &self.layouts {
            if let Some(axis) = axes.get_mut(layout.axis.0) {
                set_along_span(axis, plot);
            }
        }

        let mut offsets = crossing_overflow;
        let mut lines = Vec::with_capacity(self.layouts.len());
        for layout in &self.layouts {
            let line = match (layout.crossing_value, layout.cross_axis) {
                (Some(value), Some(cross)) => axes
                    .get(cross.0)
                    .map_or(f64::NAN, |orthogonal| orthogonal.value_to_point(value)),
                _ => {
                    let offset = offsets.get_mut(layout.edge);
                    let line = edge_coordinate(plot, layout.edge)
                        + layout.edge.outward_sign() * *offset;
                    *offset += layout.desired_size;
                    line
                }
            };
            lines.push(line);
        }

        for (layout, line) in self.layouts.iter_mut().zip(lines) {
            layout.line = line;
            if let Some(axis) = axes.get_mut(layout.axis.0) {
                axis.set_rendered_rect(band_rect(plot, layout.edge, line, layout.desired_size));
            }
        }
    }

    fn crossing_overflow(&self, plot: Rect) -> EdgeSizes {
        let mut overflow = EdgeSizes::default();
        for layout in self.layouts.iter().filter(|layout| layout.is_crossing()) {
            if !layout.line.is_finite() {
                continue;
            }
            let outer = layout.line + layout.edge.outward_sign() * layout.desired_size;
            let edge = edge_coordinate(plot, layout.edge);
            let spill = (outer - edge) * layout.edge.outward_sign();
            let slot = overflow.get_mut(layout.edge);
            *slot = slot.max(spill.max(0.0));
        }
        overflow
    }
}

/// Crossing value and orthogonal axis per axis, when the value is visible.
fn resolve_crossings(axes: &[Axis]) -> Vec<Option<(f64, AxisId)>> {
    axes.iter()
        .map(|axis| {
            let value = axis.config().crossing_value?;
            if axis.is_disposed() || !value.is_finite() {
                return None;
            }
            let orthogonal = axes.iter().find(|candidate| {
                !candidate.is_disposed()
                    && candidate.is_vertical() != axis.is_vertical()
                    && axis
                        .config()
                        .cross_axis_name
                        .as_deref()
                        .is_none_or(|name| candidate.name() == name)
            })?;
            let range = orthogonal.visible_value_range();
            if range.is_empty() || !range.inside(value) {
                trace!(axis = %axis.id(), value, "crossing value outside range; edge placement");
                return None;
            }
            Some((value, orthogonal.id()))
        })
        .collect()
}

fn set_along_span(axis: &mut Axis, plot: Rect) {
    let current = axis.rendered_rect();
    let (cross_start, cross_extent) = if current.is_finite() {
        if axis.is_vertical() {
            (current.left, current.width)
        } else {
            (current.top, current.height)
        }
    } else {
        (0.0, 0.0)
    };
    let rect = if axis.is_vertical() {
        Rect::new(cross_start, plot.top, cross_extent, plot.height)
    } else {
        Rect::new(plot.left, cross_start, plot.width, cross_extent)
    };
    axis.set_rendered_rect(rect);
}

fn edge_coordinate(plot: Rect, edge: AxisEdge) -> f64 {
    match edge {
        AxisEdge::Left => plot.left,
        AxisEdge::Top => plot.top,
        AxisEdge::Right => plot.right(),
        AxisEdge::Bottom => plot.bottom(),
    }
}

fn band_rect(plot: Rect, edge: AxisEdge, line: f64, size: f64) -> Rect {
    match edge {
        AxisEdge::Left => Rect::new(line - size, plot.top, size, plot.height),
        AxisEdge::Right => Rect::new(line, plot.top, size, plot.height),
        AxisEdge::Top => Rect::new(plot.left, line - size, plot.width, size),
        AxisEdge::Bottom => Rect::new(plot.left, line, plot.width, size),
    }
}

fn outside_tick_length(axis: &Axis) -> f64 {
    match axis.config().tick_position {
        TickPosition::Outside => axis.config().tick_length.max(0.0),
        TickPosition::Inside => 0.0,
    }
}

fn title_extent(axis: &Axis, measurer: &dyn LabelMeasurer) -> f64 {
    match axis.config().title.as_deref() {
        Some(title) if !title.is_empty() => {
            measurer.measure(title, axis.config().title_font_size).height
                + axis.config().labels.margin
        }
        _ => 0.0,
    }
}

/// Title band beyond the labels; vertical titles are rotated, so their
/// thickness is the text height.
fn title_rect(axis: &Axis, layout: &AxisLayout, measurer: &dyn LabelMeasurer) -> Option<Rect> {
    let title = axis.config().title.as_deref().filter(|title| !title.is_empty())?;
    let size = measurer.measure(title, axis.config().title_font_size);
    let inner = outside_tick_length(axis) + layout.labels.band_extent() + axis.config().labels.margin;
    let rect = axis.rendered_rect();
    Some(match layout.edge {
        AxisEdge::Bottom => Rect::new(
            rect.center().x - size.width / 2.0,
            layout.line + inner,
            size.width,
            size.height,
        ),
        AxisEdge::Top => Rect::new(
            rect.center().x - size.width / 2.0,
            layout.line - inner - size.height,
            size.width,
            size.height,
        ),
        AxisEdge::Left => Rect::new(
            layout.line - inner - size.height,
            rect.center().y - size.width / 2.0,
            size.height,
            size.width,
        ),
        AxisEdge::Right => Rect::new(
            layout.line + inner,
            rect.center().y - size.width / 2.0,
            size.height,
            size.width,
        ),
    })
}
