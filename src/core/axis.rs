//! Axis model shared by every chart area.
//!
//! An axis owns its range pipeline: data range -> actual range -> interval
//! -> padding -> zoom -> visible range -> visible interval -> labels.
//! Kind-specific rules live in the `*_axis` modules and are dispatched here
//! with a single `match` over [`AxisKind`].

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis_labels::{AxisLabel, AxisLabelStyle};
use crate::core::category_axis::{self, CategoryLabelPlacement};
use crate::core::date_time_axis::{self, DateTimeIntervalType, DateTimeRangePadding};
use crate::core::log_axis::{self, DEFAULT_LOG_BASE};
use crate::core::numeric_axis::{self, DEFAULT_MAXIMUM_LABELS, NumericalPadding};
use crate::core::series::SeriesId;
use crate::core::types::{Rect, Size};
use crate::core::zoom::{AutoScrollingMode, ZoomState, auto_scrolling_state};
use crate::core::DoubleRange;
use crate::error::{ChartError, ChartResult};

/// Arena handle of an axis inside a chart area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(pub usize);

impl std::fmt::Display for AxisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "axis#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NumericAxisParams {
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub interval: Option<f64>,
    #[serde(default)]
    pub range_padding: NumericalPadding,
}

/// Bounds are raw values; the axis stores its ranges as exponents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogarithmicAxisParams {
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub interval: Option<f64>,
    #[serde(default = "default_log_base")]
    pub log_base: f64,
    #[serde(default)]
    pub range_padding: NumericalPadding,
}

fn default_log_base() -> f64 {
    DEFAULT_LOG_BASE
}

impl Default for LogarithmicAxisParams {
    fn default() -> Self {
        Self {
            minimum: None,
            maximum: None,
            interval: None,
            log_base: DEFAULT_LOG_BASE,
            range_padding: NumericalPadding::Auto,
        }
    }
}

/// Bounds are OLE automation dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DateTimeAxisParams {
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub interval: Option<f64>,
    #[serde(default)]
    pub interval_type: DateTimeIntervalType,
    #[serde(default)]
    pub range_padding: DateTimeRangePadding,
    /// Unit of `AxisConfig::auto_scrolling_delta`; `Auto` follows the interval type.
    #[serde(default)]
    pub auto_scrolling_delta_type: DateTimeIntervalType,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxisParams {
    #[serde(default)]
    pub interval: Option<f64>,
    #[serde(default)]
    pub label_placement: CategoryLabelPlacement,
    /// When false, distinct categories are grouped across series.
    #[serde(default = "default_true")]
    pub arrange_by_index: bool,
}

impl Default for CategoryAxisParams {
    fn default() -> Self {
        Self {
            interval: None,
            label_placement: CategoryLabelPlacement::BetweenTicks,
            arrange_by_index: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisKind {
    Numeric(NumericAxisParams),
    Logarithmic(LogarithmicAxisParams),
    DateTime(DateTimeAxisParams),
    Category(CategoryAxisParams),
}

impl Default for AxisKind {
    fn default() -> Self {
        Self::Numeric(NumericAxisParams::default())
    }
}

impl AxisKind {
    #[must_use]
    pub fn is_logarithmic(&self) -> bool {
        matches!(self, Self::Logarithmic(_))
    }

    #[must_use]
    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category(_))
    }

    fn explicit_interval(&self) -> Option<f64> {
        let interval = match self {
            Self::Numeric(params) => params.interval,
            Self::Logarithmic(params) => params.interval,
            Self::DateTime(params) => params.interval,
            Self::Category(params) => params.interval,
        };
        numeric_axis::explicit_interval(interval)
    }

    fn has_full_override(&self) -> bool {
        match self {
            Self::Numeric(NumericAxisParams {
                minimum: Some(_),
                maximum: Some(_),
                ..
            })
            | Self::Logarithmic(LogarithmicAxisParams {
                minimum: Some(_),
                maximum: Some(_),
                ..
            })
            | Self::DateTime(DateTimeAxisParams {
                minimum: Some(_),
                maximum: Some(_),
                ..
            }) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickPosition {
    Inside,
    #[default]
    Outside,
}

/// Declarative axis settings. Everything computed lives on [`Axis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub name: String,
    #[serde(default)]
    pub kind: AxisKind,
    #[serde(default)]
    pub is_inversed: bool,
    #[serde(default)]
    pub is_opposed: bool,
    /// Value on the orthogonal axis where this axis is drawn; `None` keeps edge placement.
    #[serde(default)]
    pub crossing_value: Option<f64>,
    /// Orthogonal axis used to resolve `crossing_value`; defaults to the primary one.
    #[serde(default)]
    pub cross_axis_name: Option<String>,
    #[serde(default = "default_maximum_labels")]
    pub maximum_labels: u32,
    #[serde(default = "default_true")]
    pub enable_auto_interval_on_zooming: bool,
    #[serde(default)]
    pub plot_offset_start: f64,
    #[serde(default)]
    pub plot_offset_end: f64,
    #[serde(default)]
    pub labels: AxisLabelStyle,
    #[serde(default = "default_tick_length")]
    pub tick_length: f64,
    #[serde(default)]
    pub tick_position: TickPosition,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: f64,
    #[serde(default)]
    pub auto_scrolling_delta: Option<f64>,
    #[serde(default)]
    pub auto_scrolling_mode: AutoScrollingMode,
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    #[serde(default)]
    pub zoom_position: f64,
}

fn default_true() -> bool {
    true
}

fn default_maximum_labels() -> u32 {
    DEFAULT_MAXIMUM_LABELS
}

fn default_tick_length() -> f64 {
    8.0
}

fn default_title_font_size() -> f64 {
    14.0
}

fn default_zoom_factor() -> f64 {
    1.0
}

impl AxisConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AxisKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_inversed: false,
            is_opposed: false,
            crossing_value: None,
            cross_axis_name: None,
            maximum_labels: DEFAULT_MAXIMUM_LABELS,
            enable_auto_interval_on_zooming: true,
            plot_offset_start: 0.0,
            plot_offset_end: 0.0,
            labels: AxisLabelStyle::default(),
            tick_length: default_tick_length(),
            tick_position: TickPosition::Outside,
            title: None,
            title_font_size: default_title_font_size(),
            auto_scrolling_delta: None,
            auto_scrolling_mode: AutoScrollingMode::End,
            zoom_factor: 1.0,
            zoom_position: 0.0,
        }
    }

    #[must_use]
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, AxisKind::Numeric(NumericAxisParams::default()))
    }

    #[must_use]
    pub fn logarithmic(name: impl Into<String>) -> Self {
        Self::new(name, AxisKind::Logarithmic(LogarithmicAxisParams::default()))
    }

    #[must_use]
    pub fn date_time(name: impl Into<String>) -> Self {
        Self::new(name, AxisKind::DateTime(DateTimeAxisParams::default()))
    }

    #[must_use]
    pub fn category(name: impl Into<String>) -> Self {
        Self::new(name, AxisKind::Category(CategoryAxisParams::default()))
    }

    #[must_use]
    pub fn with_inversed(mut self, is_inversed: bool) -> Self {
        self.is_inversed = is_inversed;
        self
    }

    #[must_use]
    pub fn with_opposed(mut self, is_opposed: bool) -> Self {
        self.is_opposed = is_opposed;
        self
    }

    #[must_use]
    pub fn with_crossing_value(mut self, value: f64) -> Self {
        self.crossing_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_cross_axis_name(mut self, name: impl Into<String>) -> Self {
        self.cross_axis_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_plot_offsets(mut self, start: f64, end: f64) -> Self {
        self.plot_offset_start = start;
        self.plot_offset_end = end;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: AxisLabelStyle) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_auto_scrolling(mut self, delta: f64, mode: AutoScrollingMode) -> Self {
        self.auto_scrolling_delta = Some(delta);
        self.auto_scrolling_mode = mode;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, factor: f64, position: f64) -> Self {
        self.zoom_factor = factor;
        self.zoom_position = position;
        self
    }

    /// Sets `minimum`/`maximum` on kinds that support overrides.
    #[must_use]
    pub fn with_bounds(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        match &mut self.kind {
            AxisKind::Numeric(params) => {
                params.minimum = minimum;
                params.maximum = maximum;
            }
            AxisKind::Logarithmic(params) => {
                params.minimum = minimum;
                params.maximum = maximum;
            }
            AxisKind::DateTime(params) => {
                params.minimum = minimum;
                params.maximum = maximum;
            }
            AxisKind::Category(_) => {}
        }
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: f64) -> Self {
        match &mut self.kind {
            AxisKind::Numeric(params) => params.interval = Some(interval),
            AxisKind::Logarithmic(params) => params.interval = Some(interval),
            AxisKind::DateTime(params) => params.interval = Some(interval),
            AxisKind::Category(params) => params.interval = Some(interval),
        }
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.name.trim().is_empty() {
            return Err(ChartError::InvalidConfig(
                "axis name must not be empty".to_owned(),
            ));
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 0.0 || self.zoom_factor > 1.0 {
            return Err(ChartError::InvalidConfig(format!(
                "axis `{}` zoom factor must be in (0, 1]",
                self.name
            )));
        }
        if !self.zoom_position.is_finite() || !(0.0..=1.0).contains(&self.zoom_position) {
            return Err(ChartError::InvalidConfig(format!(
                "axis `{}` zoom position must be in [0, 1]",
                self.name
            )));
        }
        for (label, value) in [
            ("plot offset start", self.plot_offset_start),
            ("plot offset end", self.plot_offset_end),
            ("tick length", self.tick_length),
            ("label margin", self.labels.margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis `{}` {label} must be finite and >= 0",
                    self.name
                )));
            }
        }
        if !self.labels.font_size.is_finite() || self.labels.font_size <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "axis `{}` label font size must be > 0",
                self.name
            )));
        }
        if let Some(delta) = self.auto_scrolling_delta {
            if !delta.is_finite() || delta <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis `{}` auto scrolling delta must be > 0",
                    self.name
                )));
            }
        }
        if let AxisKind::Logarithmic(params) = &self.kind {
            if !params.log_base.is_finite() || params.log_base <= 1.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis `{}` log base must be > 1",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Computed axis state for one layout pass.
#[derive(Debug, Clone)]
pub struct Axis {
    id: AxisId,
    config: AxisConfig,
    is_vertical: bool,
    actual_range: DoubleRange,
    visible_range: DoubleRange,
    actual_interval: f64,
    visible_interval: f64,
    interval_type: DateTimeIntervalType,
    zoom: ZoomState,
    auto_scrolled: bool,
    min_zoom_factor: f64,
    available_length: f64,
    rendered_rect: Rect,
    visible_labels: Vec<AxisLabel>,
    categories: Vec<String>,
    registered_series: Vec<SeriesId>,
    associated_axes: Vec<AxisId>,
    disposed: bool,
}

impl Axis {
    #[must_use]
    pub fn new(id: AxisId, config: AxisConfig, is_vertical: bool) -> Self {
        let zoom = ZoomState::clamped(config.zoom_factor, config.zoom_position, 0.0);
        Self {
            id,
            config,
            is_vertical,
            actual_range: DoubleRange::EMPTY,
            visible_range: DoubleRange::EMPTY,
            actual_interval: f64::NAN,
            visible_interval: f64::NAN,
            interval_type: DateTimeIntervalType::Auto,
            zoom,
            auto_scrolled: false,
            min_zoom_factor: 0.0,
            available_length: f64::NAN,
            rendered_rect: Rect::nan(),
            visible_labels: Vec::new(),
            categories: Vec::new(),
            registered_series: Vec::new(),
            associated_axes: Vec::new(),
            disposed: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Replaces the configuration; zoom is re-seeded from the new settings.
    pub fn set_config(&mut self, config: AxisConfig) {
        self.zoom = ZoomState::clamped(config.zoom_factor, config.zoom_position, self.min_zoom_factor);
        self.auto_scrolled = false;
        self.config = config;
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.is_vertical
    }

    pub fn set_vertical(&mut self, is_vertical: bool) {
        self.is_vertical = is_vertical;
    }

    #[must_use]
    pub fn is_inversed(&self) -> bool {
        self.config.is_inversed
    }

    #[must_use]
    pub fn is_opposed(&self) -> bool {
        self.config.is_opposed
    }

    #[must_use]
    pub fn actual_range(&self) -> DoubleRange {
        self.actual_range
    }

    /// Authoritative visible range; exponents for logarithmic axes.
    #[must_use]
    pub fn visible_range(&self) -> DoubleRange {
        self.visible_range
    }

    /// Visible range in raw data units (power shadow for logarithmic axes).
    #[must_use]
    pub fn visible_value_range(&self) -> DoubleRange {
        match &self.config.kind {
            AxisKind::Logarithmic(params) => {
                let base = params.log_base;
                self.visible_range
                    .map(|exponent| log_axis::get_pow_value(exponent, base))
            }
            _ => self.visible_range,
        }
    }

    #[must_use]
    pub fn actual_interval(&self) -> f64 {
        self.actual_interval
    }

    #[must_use]
    pub fn visible_interval(&self) -> f64 {
        self.visible_interval
    }

    /// Resolved calendar unit of date-time intervals (`Auto` for other kinds).
    #[must_use]
    pub fn interval_type(&self) -> DateTimeIntervalType {
        self.interval_type
    }

    #[must_use]
    pub fn zoom_state(&self) -> ZoomState {
        self.zoom
    }

    /// Stores a new zoom state and narrows the visible range accordingly.
    pub fn set_zoom_state(&mut self, zoom: ZoomState) {
        self.zoom = ZoomState::clamped(zoom.factor(), zoom.position(), self.min_zoom_factor);
        self.auto_scrolled = false;
        self.update_visible_range();
    }

    #[must_use]
    pub fn min_zoom_factor(&self) -> f64 {
        self.min_zoom_factor
    }

    pub fn set_min_zoom_factor(&mut self, min_zoom_factor: f64) {
        self.min_zoom_factor = if min_zoom_factor.is_finite() {
            min_zoom_factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.zoom = ZoomState::clamped(self.zoom.factor(), self.zoom.position(), self.min_zoom_factor);
    }

    #[must_use]
    pub fn rendered_rect(&self) -> Rect {
        self.rendered_rect
    }

    pub fn set_rendered_rect(&mut self, rect: Rect) {
        self.rendered_rect = rect;
    }

    /// Pixel length along the axis direction, before plot offsets.
    #[must_use]
    pub fn rendered_length(&self) -> f64 {
        if self.is_vertical {
            self.rendered_rect.height
        } else {
            self.rendered_rect.width
        }
    }

    #[must_use]
    pub fn visible_labels(&self) -> &[AxisLabel] {
        &self.visible_labels
    }

    pub fn visible_labels_mut(&mut self) -> &mut [AxisLabel] {
        &mut self.visible_labels
    }

    pub(crate) fn set_visible_labels(&mut self, labels: Vec<AxisLabel>) {
        self.visible_labels = labels;
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    #[must_use]
    pub fn category_label(&self, value: f64) -> Option<&str> {
        if !value.is_finite() || value < -0.5 {
            return None;
        }
        self.categories
            .get(value.round() as usize)
            .map(String::as_str)
    }

    #[must_use]
    pub fn registered_series(&self) -> &[SeriesId] {
        &self.registered_series
    }

    pub fn register_series(&mut self, series: SeriesId) {
        if !self.registered_series.contains(&series) {
            self.registered_series.push(series);
        }
    }

    pub fn unregister_series(&mut self, series: SeriesId) {
        self.registered_series.retain(|id| *id != series);
    }

    pub fn clear_registered_series(&mut self) {
        self.registered_series.clear();
    }

    #[must_use]
    pub fn associated_axes(&self) -> &[AxisId] {
        &self.associated_axes
    }

    pub fn associate_axis(&mut self, axis: AxisId) {
        if axis != self.id && !self.associated_axes.contains(&axis) {
            self.associated_axes.push(axis);
        }
    }

    pub fn unassociate_axis(&mut self, axis: AxisId) {
        self.associated_axes.retain(|id| *id != axis);
    }

    pub fn clear_associated_axes(&mut self) {
        self.associated_axes.clear();
    }

    /// Drops every cross-reference; a disposed axis is skipped by layout.
    pub fn dispose(&mut self) {
        self.registered_series.clear();
        self.associated_axes.clear();
        self.visible_labels.clear();
        self.disposed = true;
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Widens a data range with the configured overrides.
    ///
    /// Logarithmic axes return exponents.
    #[must_use]
    pub fn calculate_actual_range(&self, data_range: DoubleRange) -> DoubleRange {
        match &self.config.kind {
            AxisKind::Numeric(params) => {
                numeric_axis::calculate_actual_range(data_range, params.minimum, params.maximum)
            }
            AxisKind::Logarithmic(params) => log_axis::calculate_actual_range(
                data_range,
                params.minimum,
                params.maximum,
                params.log_base,
            ),
            AxisKind::DateTime(params) => {
                numeric_axis::calculate_actual_range(data_range, params.minimum, params.maximum)
            }
            AxisKind::Category(_) => {
                let range = if data_range.is_empty() && !self.categories.is_empty() {
                    DoubleRange::new(0.0, (self.categories.len() - 1) as f64)
                } else {
                    data_range
                };
                if range.is_empty() {
                    DoubleRange::new(0.0, 0.0)
                } else {
                    range
                }
            }
        }
    }

    /// Interval of `range` for an axis `available_length` pixels long.
    ///
    /// Explicit intervals win; date-time axes also report the calendar unit.
    #[must_use]
    pub fn calculate_interval(
        &self,
        range: DoubleRange,
        available_length: f64,
    ) -> (f64, DateTimeIntervalType) {
        let desired = numeric_axis::desired_intervals_count(
            available_length,
            self.is_vertical,
            self.config.maximum_labels,
        );
        let explicit = self.config.kind.explicit_interval();
        match &self.config.kind {
            AxisKind::Numeric(_) => (
                explicit.unwrap_or_else(|| numeric_axis::calculate_nice_interval(range, desired)),
                DateTimeIntervalType::Auto,
            ),
            AxisKind::Logarithmic(_) => (
                explicit.unwrap_or_else(|| log_axis::calculate_interval(range, desired)),
                DateTimeIntervalType::Auto,
            ),
            AxisKind::DateTime(params) => match explicit {
                Some(interval) => (
                    interval,
                    date_time_axis::resolve_interval_type(range, desired, params.interval_type),
                ),
                None => date_time_axis::calculate_interval(range, desired, params.interval_type),
            },
            AxisKind::Category(_) => (
                explicit
                    .map(|interval| interval.round().max(1.0))
                    .unwrap_or_else(|| category_axis::calculate_interval(range, desired)),
                DateTimeIntervalType::Auto,
            ),
        }
    }

    /// Actual interval for `available` (the axis' own direction is used).
    #[must_use]
    pub fn calculate_actual_interval(&self, range: DoubleRange, available: Size) -> f64 {
        self.calculate_interval(range, self.length_in(available)).0
    }

    #[must_use]
    pub fn apply_range_padding(
        &self,
        range: DoubleRange,
        interval: f64,
        interval_type: DateTimeIntervalType,
    ) -> DoubleRange {
        if self.config.kind.has_full_override() {
            return range;
        }
        match &self.config.kind {
            AxisKind::Numeric(params) => numeric_axis::apply_range_padding(
                range,
                interval,
                params.range_padding.resolve(self.is_vertical),
            ),
            AxisKind::Logarithmic(params) => log_axis::apply_range_padding(
                range,
                interval,
                params.range_padding.resolve(self.is_vertical),
            ),
            AxisKind::DateTime(params) => date_time_axis::apply_range_padding(
                range,
                interval,
                interval_type,
                params.range_padding,
            ),
            AxisKind::Category(params) => {
                category_axis::apply_range_padding(range, params.label_placement)
            }
        }
    }

    fn length_in(&self, available: Size) -> f64 {
        if self.is_vertical {
            available.height
        } else {
            available.width
        }
    }

    /// Runs the whole range pipeline for `data_range` (raw values).
    pub fn update_range(&mut self, data_range: DoubleRange, available: Size) {
        let length = self.length_in(available);
        self.available_length = length;

        let actual = self.calculate_actual_range(data_range);
        let (interval, interval_type) = self.calculate_interval(actual, length);
        self.actual_range = self.apply_range_padding(actual, interval, interval_type);
        self.actual_interval = interval;
        self.interval_type = interval_type;

        self.apply_auto_scrolling();
        self.update_visible_range();

        trace!(
            axis = %self.id,
            actual_start = self.actual_range.start(),
            actual_end = self.actual_range.end(),
            interval = self.actual_interval,
            visible_start = self.visible_range.start(),
            visible_end = self.visible_range.end(),
            "axis range updated"
        );
    }

    fn apply_auto_scrolling(&mut self) {
        let Some(delta) = self.config.auto_scrolling_delta else {
            return;
        };
        if self.zoom.is_zoomed() && !self.auto_scrolled {
            return;
        }
        let delta = match &self.config.kind {
            AxisKind::DateTime(params) => {
                let unit = match params.auto_scrolling_delta_type {
                    DateTimeIntervalType::Auto => self.interval_type,
                    unit => unit,
                };
                date_time_axis::delta_in_days(delta, unit)
            }
            _ => delta,
        };
        if let Some(state) = auto_scrolling_state(
            self.actual_range,
            delta,
            self.config.auto_scrolling_mode,
            self.min_zoom_factor,
        ) {
            self.zoom = state;
            self.auto_scrolled = true;
        }
    }

    /// Recomputes the visible range, visible interval and labels from the
    /// current zoom state.
    pub fn update_visible_range(&mut self) {
        self.visible_range = self.zoom.visible_range(self.actual_range);
        self.visible_interval = if self.config.enable_auto_interval_on_zooming
            && self.zoom.is_zoomed()
            && self.config.kind.explicit_interval().is_none()
        {
            let (interval, interval_type) =
                self.calculate_interval(self.visible_range, self.available_length);
            if matches!(self.config.kind, AxisKind::DateTime(_)) {
                self.interval_type = interval_type;
            }
            interval
        } else {
            self.actual_interval
        };
        self.generate_visible_labels();
    }
}
