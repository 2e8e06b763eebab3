//! Series model: bound points, kind-specific settings and per-series ranges.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DoubleRange;
use crate::core::axis::AxisId;
use crate::core::box_whisker_series::BoxWhiskerSettings;
use crate::core::bubble_series::BubbleSettings;
use crate::core::candlestick::{FinancialSettings, OhlcColumns};
use crate::core::color::Color;
use crate::core::column_series::ColumnSettings;
use crate::core::empty_point::{EmptyPointMode, replace_empty_points};
use crate::core::error_bar_series::{self, ErrorBarSettings};
use crate::core::line_series::LineSettings;
use crate::core::pie_series::CircularSettings;
use crate::core::scatter_series::ScatterSettings;
use crate::core::segment::Segment;
use crate::core::triangular_series::TriangularSettings;
use crate::core::types::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Arena handle of a series inside a chart area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub usize);

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "series#{}", self.0)
    }
}

/// X value of a point: a number (dates are OLE dates) or a category label.
#[derive(Debug, Clone, PartialEq)]
pub enum XValue {
    Number(f64),
    Category(String),
}

impl From<f64> for XValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for XValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for XValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// One bound data point. Components a kind does not use stay NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub x: XValue,
    pub y: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
    /// Bubble size.
    pub size: f64,
    /// Raw samples of a box-and-whisker point.
    pub values: Vec<f64>,
}

impl SeriesPoint {
    #[must_use]
    pub fn xy(x: impl Into<XValue>, y: f64) -> Self {
        Self {
            x: x.into(),
            y,
            high: f64::NAN,
            low: f64::NAN,
            open: f64::NAN,
            close: f64::NAN,
            size: f64::NAN,
            values: Vec::new(),
        }
    }

    /// `y` mirrors `close` so line-like consumers see the closing value.
    #[must_use]
    pub fn ohlc(x: impl Into<XValue>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            high,
            low,
            open,
            close,
            ..Self::xy(x, close)
        }
    }

    #[must_use]
    pub fn bubble(x: impl Into<XValue>, y: f64, size: f64) -> Self {
        Self {
            size,
            ..Self::xy(x, y)
        }
    }

    #[must_use]
    pub fn samples(x: impl Into<XValue>, values: Vec<f64>) -> Self {
        Self {
            values,
            ..Self::xy(x, f64::NAN)
        }
    }
}

impl From<DataPoint> for SeriesPoint {
    fn from(point: DataPoint) -> Self {
        Self::xy(point.x, point.y)
    }
}

type ValueAccessor<T> = Box<dyn Fn(&T) -> f64 + Send + Sync>;

/// Accessor closures resolved once when items are bound to a series.
pub struct PointMapper<T> {
    x: Box<dyn Fn(&T) -> XValue + Send + Sync>,
    y: ValueAccessor<T>,
    high: Option<ValueAccessor<T>>,
    low: Option<ValueAccessor<T>>,
    open: Option<ValueAccessor<T>>,
    close: Option<ValueAccessor<T>>,
    size: Option<ValueAccessor<T>>,
    values: Option<Box<dyn Fn(&T) -> Vec<f64> + Send + Sync>>,
}

impl<T> PointMapper<T> {
    #[must_use]
    pub fn new(
        x: impl Fn(&T) -> XValue + Send + Sync + 'static,
        y: impl Fn(&T) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            x: Box::new(x),
            y: Box::new(y),
            high: None,
            low: None,
            open: None,
            close: None,
            size: None,
            values: None,
        }
    }

    #[must_use]
    pub fn with_ohlc(
        mut self,
        open: impl Fn(&T) -> f64 + Send + Sync + 'static,
        high: impl Fn(&T) -> f64 + Send + Sync + 'static,
        low: impl Fn(&T) -> f64 + Send + Sync + 'static,
        close: impl Fn(&T) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.open = Some(Box::new(open));
        self.high = Some(Box::new(high));
        self.low = Some(Box::new(low));
        self.close = Some(Box::new(close));
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: impl Fn(&T) -> f64 + Send + Sync + 'static) -> Self {
        self.size = Some(Box::new(size));
        self
    }

    #[must_use]
    pub fn with_values(mut self, values: impl Fn(&T) -> Vec<f64> + Send + Sync + 'static) -> Self {
        self.values = Some(Box::new(values));
        self
    }

    #[must_use]
    pub fn map_item(&self, item: &T) -> SeriesPoint {
        let read = |accessor: &Option<ValueAccessor<T>>| {
            accessor.as_ref().map_or(f64::NAN, |accessor| accessor(item))
        };
        SeriesPoint {
            x: (self.x)(item),
            y: (self.y)(item),
            high: read(&self.high),
            low: read(&self.low),
            open: read(&self.open),
            close: read(&self.close),
            size: read(&self.size),
            values: self
                .values
                .as_ref()
                .map_or_else(Vec::new, |values| values(item)),
        }
    }

    #[must_use]
    pub fn map_items(&self, items: &[T]) -> Vec<SeriesPoint> {
        items.iter().map(|item| self.map_item(item)).collect()
    }
}

impl<T> std::fmt::Debug for PointMapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointMapper")
            .field("has_ohlc", &self.open.is_some())
            .field("has_size", &self.size.is_some())
            .field("has_values", &self.values.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesKind {
    Column(ColumnSettings),
    Line(LineSettings),
    Area(LineSettings),
    Candle(FinancialSettings),
    Ohlc(FinancialSettings),
    BoxAndWhisker(BoxWhiskerSettings),
    Bubble(BubbleSettings),
    Scatter(ScatterSettings),
    Pie(CircularSettings),
    Doughnut(CircularSettings),
    ErrorBar(ErrorBarSettings),
    FastLine(LineSettings),
    FastScatter(ScatterSettings),
    Pyramid(TriangularSettings),
    Funnel(TriangularSettings),
}

impl SeriesKind {
    #[must_use]
    pub fn column() -> Self {
        Self::Column(ColumnSettings::default())
    }

    #[must_use]
    pub fn line() -> Self {
        Self::Line(LineSettings::default())
    }

    #[must_use]
    pub fn area() -> Self {
        Self::Area(LineSettings::default())
    }

    #[must_use]
    pub fn candle() -> Self {
        Self::Candle(FinancialSettings::default())
    }

    #[must_use]
    pub fn pie() -> Self {
        Self::Pie(CircularSettings::pie())
    }

    #[must_use]
    pub fn doughnut() -> Self {
        Self::Doughnut(CircularSettings::doughnut())
    }

    /// Kinds that share the x slot with their neighbours.
    #[must_use]
    pub fn is_side_by_side(&self) -> bool {
        matches!(
            self,
            Self::Column(_) | Self::Candle(_) | Self::Ohlc(_) | Self::BoxAndWhisker(_)
        )
    }

    /// `(width, spacing)` of side-by-side kinds.
    #[must_use]
    pub fn slot_settings(&self) -> Option<(f64, f64)> {
        match self {
            Self::Column(settings) => Some((settings.width, settings.spacing)),
            Self::Candle(settings) | Self::Ohlc(settings) => Some((settings.width, settings.spacing)),
            Self::BoxAndWhisker(settings) => Some((settings.width, settings.spacing)),
            _ => None,
        }
    }

    /// Kinds drawn without axes.
    #[must_use]
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::Pie(_) | Self::Doughnut(_))
    }

    #[must_use]
    pub fn is_triangular(&self) -> bool {
        matches!(self, Self::Pyramid(_) | Self::Funnel(_))
    }

    /// Kinds that can be projected around a polar frame. Slot-based kinds
    /// (columns, candles, boxes) have no sector geometry.
    #[must_use]
    pub fn has_polar_geometry(&self) -> bool {
        matches!(
            self,
            Self::Line(_) | Self::Area(_) | Self::Scatter(_) | Self::FastLine(_) | Self::FastScatter(_)
        )
    }

    #[must_use]
    pub fn is_financial(&self) -> bool {
        matches!(self, Self::Candle(_) | Self::Ohlc(_))
    }

    /// Kinds whose y range includes the zero baseline.
    #[must_use]
    pub fn includes_origin(&self) -> bool {
        matches!(self, Self::Column(_) | Self::Area(_))
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Column(_) => "column",
            Self::Line(_) => "line",
            Self::Area(_) => "area",
            Self::Candle(_) => "candle",
            Self::Ohlc(_) => "ohlc",
            Self::BoxAndWhisker(_) => "box_and_whisker",
            Self::Bubble(_) => "bubble",
            Self::Scatter(_) => "scatter",
            Self::Pie(_) => "pie",
            Self::Doughnut(_) => "doughnut",
            Self::ErrorBar(_) => "error_bar",
            Self::FastLine(_) => "fast_line",
            Self::FastScatter(_) => "fast_scatter",
            Self::Pyramid(_) => "pyramid",
            Self::Funnel(_) => "funnel",
        }
    }
}

/// Declarative series settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub name: String,
    pub kind: SeriesKind,
    /// Axis names; `None` uses the primary axis of that direction.
    #[serde(default)]
    pub x_axis_name: Option<String>,
    #[serde(default)]
    pub y_axis_name: Option<String>,
    #[serde(default)]
    pub empty_point_mode: EmptyPointMode,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl SeriesConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SeriesKind) -> Self {
        Self {
            name: name.into(),
            kind,
            x_axis_name: None,
            y_axis_name: None,
            empty_point_mode: EmptyPointMode::None,
            color: None,
            is_visible: true,
        }
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        self.x_axis_name = Some(x_axis.into());
        self.y_axis_name = Some(y_axis.into());
        self
    }

    #[must_use]
    pub fn with_empty_point_mode(mut self, mode: EmptyPointMode) -> Self {
        self.empty_point_mode = mode;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(color) = self.color {
            color.validate()?;
        }
        match &self.kind {
            SeriesKind::Column(settings) => settings.validate(),
            SeriesKind::Candle(settings) | SeriesKind::Ohlc(settings) => settings.validate(),
            SeriesKind::BoxAndWhisker(settings) => settings.validate(),
            SeriesKind::Bubble(settings) => settings.validate(),
            SeriesKind::Scatter(settings) | SeriesKind::FastScatter(settings) => {
                settings.validate()
            }
            SeriesKind::Pie(settings) | SeriesKind::Doughnut(settings) => settings.validate(),
            SeriesKind::ErrorBar(settings) => settings.validate(),
            SeriesKind::Pyramid(settings) | SeriesKind::Funnel(settings) => settings.validate(),
            SeriesKind::Line(settings)
            | SeriesKind::Area(settings)
            | SeriesKind::FastLine(settings) => settings.validate(),
        }
    }
}

/// Change applied to a series' point collection.
#[derive(Debug, Clone, PartialEq)]
pub enum PointsChange {
    Insert { index: usize, point: SeriesPoint },
    Remove { index: usize },
    Replace { index: usize, point: SeriesPoint },
    Reset(Vec<SeriesPoint>),
}

/// Series state owned by a chart area.
#[derive(Debug, Clone)]
pub struct Series {
    id: SeriesId,
    config: SeriesConfig,
    points: Vec<SeriesPoint>,
    /// Axis-space x value per point (index, grouped index or number).
    x_values: Vec<f64>,
    /// Y values after empty-point replacement.
    y_values: Vec<f64>,
    /// Filled OHLC components; empty unless the kind is financial.
    ohlc_values: OhlcColumns,
    x_range: DoubleRange,
    y_range: DoubleRange,
    x_axis: Option<AxisId>,
    y_axis: Option<AxisId>,
    segments: Vec<Segment>,
    is_toggled: bool,
}

impl Series {
    #[must_use]
    pub fn new(id: SeriesId, config: SeriesConfig) -> Self {
        Self {
            id,
            config,
            points: Vec::new(),
            x_values: Vec::new(),
            y_values: Vec::new(),
            ohlc_values: OhlcColumns::default(),
            x_range: DoubleRange::EMPTY,
            y_range: DoubleRange::EMPTY,
            x_axis: None,
            y_axis: None,
            segments: Vec::new(),
            is_toggled: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SeriesConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn kind(&self) -> &SeriesKind {
        &self.config.kind
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Hidden by the legend or by configuration.
    #[must_use]
    pub fn is_drawn(&self) -> bool {
        self.config.is_visible && !self.is_toggled
    }

    #[must_use]
    pub fn is_toggled(&self) -> bool {
        self.is_toggled
    }

    pub fn set_toggled(&mut self, is_toggled: bool) {
        self.is_toggled = is_toggled;
    }

    pub fn set_points(&mut self, points: Vec<SeriesPoint>) {
        self.points = points;
    }

    /// Replaces the points from caller items through `mapper`.
    pub fn bind<T>(&mut self, items: &[T], mapper: &PointMapper<T>) {
        self.points = mapper.map_items(items);
        debug!(series = %self.id, count = self.points.len(), "series points bound");
    }

    /// Applies one collection change event.
    pub fn apply_change(&mut self, change: PointsChange) -> ChartResult<()> {
        match change {
            PointsChange::Insert { index, point } => {
                if index > self.points.len() {
                    return Err(ChartError::InvalidData(format!(
                        "insert index {index} is past the end of {} points",
                        self.points.len()
                    )));
                }
                self.points.insert(index, point);
            }
            PointsChange::Remove { index } => {
                if index >= self.points.len() {
                    return Err(ChartError::InvalidData(format!(
                        "remove index {index} is out of bounds for {} points",
                        self.points.len()
                    )));
                }
                self.points.remove(index);
            }
            PointsChange::Replace { index, point } => {
                let Some(slot) = self.points.get_mut(index) else {
                    return Err(ChartError::InvalidData(format!(
                        "replace index {index} is out of bounds"
                    )));
                };
                *slot = point;
            }
            PointsChange::Reset(points) => self.points = points,
        }
        Ok(())
    }

    #[must_use]
    pub fn x_axis(&self) -> Option<AxisId> {
        self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> Option<AxisId> {
        self.y_axis
    }

    pub fn set_axes(
        &mut self,
        x_axis: Option<AxisId>,
        y_axis: Option<AxisId>,
    ) {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
    }

    /// Category labels of the points, when the x values are categories.
    #[must_use]
    pub fn categories(&self) -> Option<Vec<&str>> {
        let mut labels = Vec::with_capacity(self.points.len());
        for point in &self.points {
            match &point.x {
                XValue::Category(label) => labels.push(label.as_str()),
                XValue::Number(_) => return None,
            }
        }
        Some(labels)
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    /// Y values after empty-point replacement.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    /// Open/high/low/close after empty-point replacement (financial kinds).
    #[must_use]
    pub fn ohlc_values(&self) -> &OhlcColumns {
        &self.ohlc_values
    }

    #[must_use]
    pub fn x_range(&self) -> DoubleRange {
        self.x_range
    }

    #[must_use]
    pub fn y_range(&self) -> DoubleRange {
        self.y_range
    }

    /// Resolves x values and applies empty-point replacement.
    ///
    /// `grouped_x` carries category indices when the axis groups categories;
    /// otherwise category points use their index.
    pub fn prepare_values(&mut self, grouped_x: Option<&[f64]>) {
        self.x_values = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| match (&point.x, grouped_x) {
                (XValue::Number(value), _) => *value,
                (XValue::Category(_), Some(grouped)) => {
                    grouped.get(index).copied().unwrap_or(f64::NAN)
                }
                (XValue::Category(_), None) => index as f64,
            })
            .collect();

        let raw: Vec<f64> = self.points.iter().map(|point| point.y).collect();
        self.y_values = replace_empty_points(&raw, self.config.empty_point_mode);
        self.ohlc_values = if self.config.kind.is_financial() {
            OhlcColumns::from_points(&self.points, self.config.empty_point_mode)
        } else {
            OhlcColumns::default()
        };
    }

    /// Smallest distance between consecutive distinct x values (1 when unknown).
    #[must_use]
    pub fn min_x_delta(&self) -> f64 {
        let mut sorted: Vec<OrderedFloat<f64>> = self
            .x_values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
            .collect();
        sorted.sort_unstable();
        sorted
            .windows(2)
            .map(|pair| pair[1].0 - pair[0].0)
            .filter(|delta| *delta > 0.0)
            .reduce(f64::min)
            .unwrap_or(1.0)
    }

    /// Recomputes the cumulative x/y ranges from prepared values.
    ///
    /// Side-by-side kinds on non-category x axes widen the x range by half
    /// the smallest x spacing on both ends so edge bars stay inside the plot.
    pub fn update_ranges(&mut self, x_is_category: bool) {
        let mut x_range: DoubleRange = self.x_values.iter().copied().collect();
        let mut y_range: DoubleRange = match &self.config.kind {
            SeriesKind::Candle(_) | SeriesKind::Ohlc(_) => self.ohlc_values.values().collect(),
            SeriesKind::BoxAndWhisker(_) => self
                .points
                .iter()
                .flat_map(|point| point.values.iter().copied())
                .collect(),
            SeriesKind::ErrorBar(settings) => {
                let extents = error_bar_series::value_extents(&self.x_values, &self.y_values, settings);
                x_range = x_range + extents.0;
                extents.1
            }
            _ => self.y_values.iter().copied().collect(),
        };

        if self.config.kind.includes_origin() && !y_range.is_empty() {
            y_range = y_range.union_value(0.0);
        }
        if self.config.kind.is_side_by_side() && !x_is_category && !x_range.is_empty() {
            let half = self.min_x_delta() / 2.0;
            x_range = DoubleRange::new(x_range.start() - half, x_range.end() + half);
        }

        self.x_range = x_range;
        self.y_range = y_range;
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    /// Installs freshly built segments, keeping the old geometry as the
    /// animation start of segments with the same index.
    pub fn replace_segments(&mut self, mut segments: Vec<Segment>) {
        for segment in &mut segments {
            if let Ok(position) = self
                .segments
                .binary_search_by_key(&segment.index, |previous| previous.index)
            {
                segment.set_previous(self.segments[position].geometry.clone());
            }
        }
        self.segments = segments;
    }

    pub fn clear_segments(&mut self) {
        self.segments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{PointMapper, PointsChange, Series, SeriesConfig, SeriesId, SeriesKind, SeriesPoint};
    use crate::core::empty_point::EmptyPointMode;

    #[test]
    fn mapper_reads_each_accessor_once_per_item() {
        struct Sale {
            month: &'static str,
            total: f64,
        }
        let mapper = PointMapper::new(|sale: &Sale| sale.month.into(), |sale: &Sale| sale.total);
        let points = mapper.map_items(&[
            Sale { month: "Jan", total: 4.0 },
            Sale { month: "Feb", total: 7.5 },
        ]);
        assert_eq!(points[1], SeriesPoint::xy("Feb", 7.5));
    }

    #[test]
    fn collection_events_edit_points_in_place() {
        let mut series = Series::new(SeriesId(0), SeriesConfig::new("s", SeriesKind::line()));
        series
            .apply_change(PointsChange::Reset(vec![
                SeriesPoint::xy(1.0, 1.0),
                SeriesPoint::xy(2.0, 2.0),
            ]))
            .expect("reset");
        series
            .apply_change(PointsChange::Insert {
                index: 1,
                point: SeriesPoint::xy(1.5, 9.0),
            })
            .expect("insert");
        series
            .apply_change(PointsChange::Remove { index: 0 })
            .expect("remove");
        assert_eq!(series.points().len(), 2);
        assert_eq!(series.points()[0].y, 9.0);
        assert!(series.apply_change(PointsChange::Remove { index: 5 }).is_err());
    }

    #[test]
    fn category_points_default_to_their_index() {
        let mut series = Series::new(
            SeriesId(0),
            SeriesConfig::new("s", SeriesKind::column()).with_empty_point_mode(EmptyPointMode::Zero),
        );
        series.set_points(vec![SeriesPoint::xy("a", 1.0), SeriesPoint::xy("b", f64::NAN)]);
        series.prepare_values(None);
        assert_eq!(series.x_values(), &[0.0, 1.0]);
        assert_eq!(series.y_values(), &[1.0, 0.0]);
        assert_eq!(series.min_x_delta(), 1.0);
    }

    #[test]
    fn decimal_samples_bind_as_numeric_points() {
        use crate::core::types::DataPoint;
        use chrono::{TimeZone, Utc};
        use rust_decimal::Decimal;

        let sample = DataPoint::from_decimal(Decimal::new(15, 1), Decimal::new(-42, 0))
            .expect("finite decimals");
        assert_eq!(SeriesPoint::from(sample), SeriesPoint::xy(1.5, -42.0));

        let time = Utc.with_ymd_and_hms(1899, 12, 31, 0, 0, 0).single().expect("valid date");
        let dated = DataPoint::from_decimal_time(time, Decimal::ONE)
            .expect("finite decimal");
        assert_eq!(SeriesPoint::from(dated).x, super::XValue::Number(1.0));
    }
}
