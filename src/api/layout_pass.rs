use tracing::{debug, trace, warn};

use crate::core::DoubleRange;
use crate::core::axis::{AxisId, AxisKind};
use crate::core::axis_labels::{LabelFormat, format_number};
use crate::core::category_axis;
use crate::core::column_series::side_by_side_info;
use crate::core::segment_builder::{SegmentContext, create_segments, layout_segments};
use crate::core::series::{Series, SeriesId};
use crate::core::transform::{CoordinateSystem, PolarFrame, SeriesTransform};
use crate::core::types::Rect;
use crate::labels::{FinancialComponent, place_series_labels};
use crate::layout::LayoutPhase;

use super::{AxisRole, ChartArea, ChartAreaKind};

/// Per-series inputs of the segment stage, resolved before any mutation.
struct SegmentPlan {
    slot: usize,
    axes: Option<(AxisId, AxisId)>,
    side_by_side: DoubleRange,
}

impl ChartArea {
    /// Runs one full layout pass.
    ///
    /// Stages run in a fixed order, each consuming the previous one's
    /// output: axis resolution, ranges, zoom limits, axis layout,
    /// segments, data labels.
    pub fn update(&mut self) {
        self.layout.begin();
        debug!(phase = ?self.layout.phase(), kind = ?self.kind, "layout pass started");
        self.clear_actual_axes();
        self.update_actual_axes();
        self.update_ranges();
        self.apply_zoom_limits();
        self.arrange_axes();
        self.update_segments();
        self.update_data_labels();
    }

    fn clear_actual_axes(&mut self) {
        let phase = self.layout.advance();
        for axis in self.axes.iter_mut().filter(|axis| !axis.is_disposed()) {
            axis.clear_registered_series();
            axis.clear_associated_axes();
        }
        debug!(?phase, axes = self.axes.len(), "actual axes cleared");
    }

    /// Resolves an axis name for `role`, falling back to the primary axis.
    fn resolve_axis(&self, series: SeriesId, name: Option<&str>, role: AxisRole) -> AxisId {
        let fallback = match role {
            AxisRole::X => self.primary_x_axis,
            AxisRole::Y => self.primary_y_axis,
        };
        let Some(name) = name else {
            return fallback;
        };
        match self.axis_by_name(name) {
            Some(id) if self.axis_roles[id.0] == role => id,
            Some(_) => {
                warn!(series = %series, axis = name, ?role, "axis has the wrong role, using the primary axis");
                fallback
            }
            None => {
                warn!(series = %series, axis = name, "unknown axis name, using the primary axis");
                fallback
            }
        }
    }

    fn update_actual_axes(&mut self) {
        let phase = self.layout.advance();
        let uses_axes = self.kind.uses_axes();
        let resolved: Vec<(usize, Option<(AxisId, AxisId)>)> = self
            .series
            .iter()
            .enumerate()
            .filter_map(|(slot, series)| {
                let series = series.as_ref()?;
                if !uses_axes || !self.kind.accepts(series.kind()) {
                    return Some((slot, None));
                }
                let config = series.config();
                let x = self.resolve_axis(series.id(), config.x_axis_name.as_deref(), AxisRole::X);
                let y = self.resolve_axis(series.id(), config.y_axis_name.as_deref(), AxisRole::Y);
                Some((slot, Some((x, y))))
            })
            .collect();

        for (slot, axes) in resolved {
            let Some(series) = self.series[slot].as_mut() else {
                continue;
            };
            match axes {
                Some((x, y)) => {
                    series.set_axes(Some(x), Some(y));
                    self.axes[x.0].register_series(series.id());
                    self.axes[y.0].register_series(series.id());
                    self.axes[x.0].associate_axis(y);
                    self.axes[y.0].associate_axis(x);
                }
                None => series.set_axes(None, None),
            }
        }
        debug!(?phase, series = self.series.len(), "actual axes updated");
    }

    fn is_category_x(&self, series: &Series) -> bool {
        series
            .x_axis()
            .and_then(|id| self.axes.get(id.0))
            .is_some_and(|axis| axis.config().kind.is_category())
    }

    /// Category grouping, empty-point replacement, series ranges and
    /// finally the axis ranges.
    fn update_ranges(&mut self) {
        let mut prepared = vec![false; self.series.len()];

        for axis_index in 0..self.axes.len() {
            let axis = &self.axes[axis_index];
            let AxisKind::Category(params) = axis.config().kind else {
                continue;
            };
            if axis.is_disposed() || self.axis_roles[axis_index] != AxisRole::X {
                continue;
            }
            let members: Vec<SeriesId> = axis.registered_series().to_vec();
            let categories: Vec<Vec<String>> = members
                .iter()
                .map(|id| {
                    self.series[id.0]
                        .as_ref()
                        .and_then(Series::categories)
                        .map(|labels| labels.into_iter().map(str::to_owned).collect())
                        .unwrap_or_default()
                })
                .collect();

            if params.arrange_by_index {
                let longest = categories
                    .iter()
                    .max_by_key(|labels| labels.len())
                    .cloned()
                    .unwrap_or_default();
                self.axes[axis_index].set_categories(longest);
                for id in &members {
                    if let Some(series) = self.series[id.0].as_mut() {
                        series.prepare_values(None);
                        prepared[id.0] = true;
                    }
                }
            } else {
                let slices: Vec<&[String]> = categories.iter().map(Vec::as_slice).collect();
                let grouping = category_axis::group_data(&slices);
                trace!(
                    axis = %AxisId(axis_index),
                    categories = grouping.grouped_x_values.len(),
                    "categories grouped"
                );
                for (id, indices) in members.iter().zip(&grouping.indices) {
                    if let Some(series) = self.series[id.0].as_mut() {
                        series.prepare_values(Some(indices));
                        prepared[id.0] = true;
                    }
                }
                self.axes[axis_index].set_categories(grouping.grouped_x_values);
            }
        }

        for slot in 0..self.series.len() {
            let is_category = self.series[slot]
                .as_ref()
                .is_some_and(|series| self.is_category_x(series));
            if let Some(series) = self.series[slot].as_mut() {
                if !prepared[slot] {
                    series.prepare_values(None);
                }
                series.update_ranges(is_category);
            }
        }

        if !self.kind.uses_axes() {
            debug!("series ranges updated");
            return;
        }
        let size = self.size;
        for axis_index in 0..self.axes.len() {
            if self.axes[axis_index].is_disposed() {
                continue;
            }
            let role = self.axis_roles[axis_index];
            let data_range: DoubleRange = self.axes[axis_index]
                .registered_series()
                .iter()
                .filter_map(|id| self.series[id.0].as_ref())
                .filter(|series| series.is_drawn())
                .map(|series| match role {
                    AxisRole::X => series.x_range(),
                    AxisRole::Y => series.y_range(),
                })
                .fold(DoubleRange::EMPTY, DoubleRange::union);
            self.axes[axis_index].update_range(data_range, size);
        }
        debug!(axes = self.axes.len(), "axis ranges updated");
    }

    fn apply_zoom_limits(&mut self) {
        let min_factor = self.interaction.behavior().min_zoom_factor();
        for axis in self.axes.iter_mut().filter(|axis| !axis.is_disposed()) {
            axis.set_min_zoom_factor(min_factor);
            axis.update_visible_range();
        }
        debug!(min_factor, "zoom limits applied");
    }

    fn arrange_axes(&mut self) {
        let area = Rect::new(0.0, 0.0, self.size.width, self.size.height);
        if self.kind.uses_axes() {
            self.layout
                .measure(&mut self.axes, area, self.measurer.as_ref());
            self.plot_rect = self
                .layout
                .arrange(&mut self.axes, area, self.measurer.as_ref());
        } else {
            self.plot_rect = area;
        }
        debug_assert!(
            !self.kind.uses_axes() || self.layout.phase() == LayoutPhase::Complete,
            "axis layout must complete before segments are built"
        );
        debug!(
            left = self.plot_rect.left,
            top = self.plot_rect.top,
            width = self.plot_rect.width,
            height = self.plot_rect.height,
            "axes arranged"
        );
    }

    pub(super) fn coordinate_system(&self) -> CoordinateSystem {
        match self.kind {
            ChartAreaKind::Polar => {
                CoordinateSystem::Polar(PolarFrame::inscribed(self.plot_rect, self.polar_start_angle))
            }
            _ => CoordinateSystem::Cartesian,
        }
    }

    /// The axis pair of a drawn series, when it has one.
    pub(super) fn transform_of(&self, series: &Series) -> Option<SeriesTransform<'_>> {
        let x_axis = self.axes.get(series.x_axis()?.0)?;
        let y_axis = self.axes.get(series.y_axis()?.0)?;
        Some(SeriesTransform {
            x_axis,
            y_axis,
            system: self.coordinate_system(),
        })
    }

    /// Offsets of a side-by-side series within its x slot.
    ///
    /// Every drawn side-by-side series on the same axis pair takes one share.
    fn side_by_side_range(&self, series: &Series) -> DoubleRange {
        let Some((width, spacing)) = series.kind().slot_settings() else {
            return DoubleRange::new(0.0, 0.0);
        };
        let peers: Vec<&Series> = self
            .series
            .iter()
            .flatten()
            .filter(|peer| {
                peer.is_drawn()
                    && peer.kind().is_side_by_side()
                    && peer.x_axis() == series.x_axis()
                    && peer.y_axis() == series.y_axis()
            })
            .collect();
        let position = peers
            .iter()
            .position(|peer| peer.id() == series.id())
            .unwrap_or(0);
        let slot_width = if self.is_category_x(series) {
            1.0
        } else {
            peers
                .iter()
                .map(|peer| peer.min_x_delta())
                .fold(f64::INFINITY, f64::min)
        };
        let slot_width = if slot_width.is_finite() { slot_width } else { 1.0 };
        side_by_side_info(position, peers.len(), width, spacing, slot_width)
    }

    fn update_segments(&mut self) {
        let plans: Vec<SegmentPlan> = self
            .series
            .iter()
            .enumerate()
            .filter_map(|(slot, series)| {
                let series = series.as_ref()?;
                let axes = series.x_axis().zip(series.y_axis());
                Some(SegmentPlan {
                    slot,
                    axes,
                    side_by_side: self.side_by_side_range(series),
                })
            })
            .collect();

        let system = self.coordinate_system();
        let plot = self.plot_rect;
        let kind = self.kind;
        let axes = &self.axes;
        let mut built = 0_usize;
        for plan in plans {
            let Some(series) = self.series[plan.slot].as_mut() else {
                continue;
            };
            if !series.is_drawn() || !kind.accepts(series.kind()) {
                series.clear_segments();
                continue;
            }
            let ctx = match plan.axes {
                Some((x, y)) => SegmentContext::cartesian(
                    SeriesTransform {
                        x_axis: &axes[x.0],
                        y_axis: &axes[y.0],
                        system,
                    },
                    plan.side_by_side,
                ),
                None if kind.uses_axes() => {
                    series.clear_segments();
                    continue;
                }
                None => SegmentContext::accumulation(plot),
            };
            let mut segments = create_segments(series);
            layout_segments(series.kind(), &mut segments, &ctx);
            trace!(series = %series.id(), segments = segments.len(), "segments laid out");
            built += segments.len();
            series.replace_segments(segments);
        }
        debug!(segments = built, "segments updated");
    }

    fn update_data_labels(&mut self) {
        let mut placed = Vec::with_capacity(self.series.len());
        for series in &self.series {
            let labels = match series {
                Some(series) if self.kind.accepts(series.kind()) => {
                    let transform = self.transform_of(series);
                    let y_axis = transform.map(|transform| transform.y_axis);
                    let text_of = |index: usize, component: Option<FinancialComponent>| {
                        let ohlc = series.ohlc_values();
                        let column = match component {
                            Some(FinancialComponent::High) => ohlc.high.as_slice(),
                            Some(FinancialComponent::Low) => ohlc.low.as_slice(),
                            Some(FinancialComponent::Open) => ohlc.open.as_slice(),
                            Some(FinancialComponent::Close) => ohlc.close.as_slice(),
                            None => series.y_values(),
                        };
                        let value = column.get(index).copied().unwrap_or(f64::NAN);
                        match y_axis {
                            Some(axis) => axis.format_value(value),
                            None => {
                                let interval = if value.fract() == 0.0 { 1.0 } else { 0.01 };
                                format_number(value, interval, &LabelFormat::Auto)
                            }
                        }
                    };
                    place_series_labels(
                        series,
                        transform.as_ref(),
                        self.plot_rect,
                        &self.data_labels,
                        self.measurer.as_ref(),
                        &text_of,
                    )
                }
                _ => Vec::new(),
            };
            placed.push(labels);
        }
        debug!(
            labels = placed.iter().map(Vec::len).sum::<usize>(),
            "data labels placed"
        );
        self.placed_labels = placed;
    }
}
