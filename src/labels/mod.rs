//! Data-label placement.
//!
//! Placement only computes rectangles; formatting is supplied by the caller
//! and drawing belongs to the host.

pub mod circular;
pub mod continuous;
pub mod financial;
pub mod rectangular;
pub mod triangular;

use serde::{Deserialize, Serialize};

use crate::core::color::{Color, palette_color};
use crate::core::segment::SegmentData;
use crate::core::series::{Series, SeriesKind};
use crate::core::transform::SeriesTransform;
use crate::core::types::{Point, Rect};
use crate::error::{ChartError, ChartResult};
use crate::layout::measurer::LabelMeasurer;

pub use circular::{CircularLabel, circular_label, resolve_circular_collisions};
pub use continuous::{continuous_label_rect, is_top_with_label_index};
pub use financial::{FinancialComponent, financial_label_rects};
pub use rectangular::rectangular_label_rect;
pub use triangular::triangular_label_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DataLabelPlacement {
    #[default]
    Auto,
    Inner,
    Center,
    Outer,
}

/// Where inner labels sit inside a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BarAlignment {
    /// Next to the value edge.
    #[default]
    Top,
    Middle,
    /// Next to the baseline.
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataLabelSettings {
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub placement: DataLabelPlacement,
    #[serde(default)]
    pub bar_alignment: BarAlignment,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Label background takes the point's palette color.
    #[serde(default)]
    pub use_series_palette: bool,
}

fn default_true() -> bool {
    true
}

fn default_padding() -> f64 {
    5.0
}

fn default_font_size() -> f64 {
    12.0
}

impl Default for DataLabelSettings {
    fn default() -> Self {
        Self {
            is_visible: true,
            placement: DataLabelPlacement::Auto,
            bar_alignment: BarAlignment::Top,
            padding: default_padding(),
            font_size: default_font_size(),
            use_series_palette: false,
        }
    }
}

impl DataLabelSettings {
    #[must_use]
    pub fn with_placement(mut self, placement: DataLabelPlacement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_bar_alignment(mut self, bar_alignment: BarAlignment) -> Self {
        self.bar_alignment = bar_alignment;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ChartError::InvalidConfig(
                "data label padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "data label font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Orientation facts every placement rule needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelFrame {
    pub plot: Rect,
    /// The value axis is inversed.
    pub is_inversed: bool,
    pub is_transposed: bool,
}

impl LabelFrame {
    #[must_use]
    pub fn from_transform(transform: &SeriesTransform<'_>) -> Self {
        Self {
            plot: transform.plot_rect(),
            is_inversed: transform.y_axis.is_inversed(),
            is_transposed: transform.is_transposed(),
        }
    }
}

/// Final placement of one data label.
#[derive(Debug, Clone, PartialEq)]
pub struct DataLabel {
    pub index: usize,
    /// Set for the four labels of a financial point.
    pub component: Option<FinancialComponent>,
    pub text: String,
    pub rect: Rect,
    pub connector: Option<[Point; 3]>,
    pub background: Option<Color>,
}

/// Places labels for every drawn segment of `series`.
///
/// `transform` is `None` for circular and triangular series, which place
/// against `plot`. Error-bar and fast series carry no labels.
pub fn place_series_labels(
    series: &Series,
    transform: Option<&SeriesTransform<'_>>,
    plot: Rect,
    settings: &DataLabelSettings,
    measurer: &dyn LabelMeasurer,
    text_of: &dyn Fn(usize, Option<FinancialComponent>) -> String,
) -> Vec<DataLabel> {
    if !settings.is_visible || !series.is_drawn() {
        return Vec::new();
    }
    let frame = transform.map_or(
        LabelFrame {
            plot,
            is_inversed: false,
            is_transposed: false,
        },
        LabelFrame::from_transform,
    );
    let series_color = series
        .config()
        .color
        .unwrap_or_else(|| palette_color(series.id().0));
    let background = |index: usize| {
        settings.use_series_palette.then(|| {
            if series.kind().is_circular() || series.kind().is_triangular() {
                palette_color(index)
            } else {
                series_color
            }
        })
    };
    let label = |index: usize,
                 component: Option<FinancialComponent>,
                 text: String,
                 rect: Rect,
                 connector: Option<[Point; 3]>| DataLabel {
        index,
        component,
        text,
        rect,
        connector,
        background: background(index),
    };
    let segments = series.segments().iter().filter(|segment| !segment.empty);

    match series.kind() {
        SeriesKind::Column(_)
        | SeriesKind::BoxAndWhisker(_)
        | SeriesKind::Bubble(_)
        | SeriesKind::Scatter(_) => {
            let baseline = transform
                .and_then(|transform| transform.x_axis.config().crossing_value)
                .unwrap_or(0.0);
            segments
                .filter_map(|segment| {
                    let positive = match segment.data {
                        SegmentData::Xy { y, .. } if series.kind().includes_origin() => {
                            y >= baseline
                        }
                        _ => true,
                    };
                    let text = text_of(segment.index, None);
                    let size = measurer.measure(&text, settings.font_size);
                    let rect = rectangular_label_rect(
                        segment.geometry.bounds(),
                        size,
                        positive,
                        settings,
                        &frame,
                    );
                    rect.is_finite()
                        .then(|| label(segment.index, None, text, rect, None))
                })
                .collect()
        }
        SeriesKind::Line(_) | SeriesKind::Area(_) => {
            let Some(transform) = transform else {
                return Vec::new();
            };
            let y_values = series.y_values();
            series
                .x_values()
                .iter()
                .zip(y_values)
                .enumerate()
                .filter_map(|(index, (x, y))| {
                    let anchor = transform.transform(*x, *y);
                    if !anchor.is_finite() {
                        return None;
                    }
                    let text = text_of(index, None);
                    let size = measurer.measure(&text, settings.font_size);
                    let is_top = is_top_with_label_index(y_values, index);
                    let rect = continuous_label_rect(anchor, size, is_top, settings, &frame);
                    Some(label(index, None, text, rect, None))
                })
                .collect()
        }
        SeriesKind::Candle(_) | SeriesKind::Ohlc(_) => segments
            .flat_map(|segment| {
                let components = [
                    FinancialComponent::High,
                    FinancialComponent::Low,
                    FinancialComponent::Open,
                    FinancialComponent::Close,
                ];
                let texts = components.map(|component| text_of(segment.index, Some(component)));
                let sizes = texts
                    .clone()
                    .map(|text| measurer.measure(&text, settings.font_size));
                financial_label_rects(&segment.geometry, sizes, settings, &frame)
                    .into_iter()
                    .zip(texts)
                    .map(|((component, rect), text)| {
                        label(segment.index, Some(component), text, rect, None)
                    })
                    .collect::<Vec<_>>()
            })
            .collect(),
        SeriesKind::Pie(_) | SeriesKind::Doughnut(_) => {
            let drawn: Vec<_> = segments.collect();
            let texts: Vec<String> = drawn
                .iter()
                .map(|segment| text_of(segment.index, None))
                .collect();
            let mut placed: Vec<Option<CircularLabel>> = drawn
                .iter()
                .zip(&texts)
                .map(|(segment, text)| {
                    circular_label(
                        &segment.geometry,
                        measurer.measure(text, settings.font_size),
                        settings,
                    )
                })
                .collect();
            resolve_circular_collisions(&mut placed, plot.center(), plot);
            drawn
                .into_iter()
                .zip(texts)
                .zip(placed)
                .filter_map(|((segment, text), placed)| {
                    let placed = placed?;
                    Some(label(segment.index, None, text, placed.rect, placed.connector))
                })
                .collect()
        }
        SeriesKind::Pyramid(_) | SeriesKind::Funnel(_) => segments
            .filter_map(|segment| {
                let text = text_of(segment.index, None);
                let size = measurer.measure(&text, settings.font_size);
                let rect = triangular_label_rect(&segment.geometry, size, settings)?;
                Some(label(segment.index, None, text, rect, None))
            })
            .collect(),
        SeriesKind::ErrorBar(_) | SeriesKind::FastLine(_) | SeriesKind::FastScatter(_) => {
            Vec::new()
        }
    }
}
