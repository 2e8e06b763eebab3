//! Tooltip and legend view models handed to the host's chrome.

use serde::{Deserialize, Serialize};

use crate::core::axis::Axis;
use crate::core::axis_labels::{LabelFormat, format_number};
use crate::core::color::{Color, palette_color};
use crate::core::series::{Series, SeriesId, SeriesKind, XValue};
use crate::core::types::Point;

use super::ChartArea;

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipInfo {
    pub series: SeriesId,
    pub index: usize,
    pub x_value: f64,
    pub y_value: f64,
    /// Anchor point of the tooltip in pixels.
    pub position: Point,
    pub text: String,
    pub color: Color,
}

/// Legend marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendIcon {
    Rectangle,
    Line,
    Area,
    Circle,
    Candle,
    Pie,
    Doughnut,
    Triangle,
    Funnel,
}

impl LegendIcon {
    #[must_use]
    pub fn for_kind(kind: &SeriesKind) -> Self {
        match kind {
            SeriesKind::Column(_) | SeriesKind::BoxAndWhisker(_) => Self::Rectangle,
            SeriesKind::Line(_) | SeriesKind::FastLine(_) | SeriesKind::ErrorBar(_) => Self::Line,
            SeriesKind::Area(_) => Self::Area,
            SeriesKind::Bubble(_) | SeriesKind::Scatter(_) | SeriesKind::FastScatter(_) => {
                Self::Circle
            }
            SeriesKind::Candle(_) | SeriesKind::Ohlc(_) => Self::Candle,
            SeriesKind::Pie(_) => Self::Pie,
            SeriesKind::Doughnut(_) => Self::Doughnut,
            SeriesKind::Pyramid(_) => Self::Triangle,
            SeriesKind::Funnel(_) => Self::Funnel,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub text: String,
    pub color: Color,
    pub icon: LegendIcon,
    pub is_toggled: bool,
    pub series: SeriesId,
    /// Set for per-point items of circular and triangular series.
    pub point: Option<usize>,
}

fn series_color(series: &Series) -> Color {
    series
        .config()
        .color
        .unwrap_or_else(|| palette_color(series.id().0))
}

fn plain_number(value: f64) -> String {
    let interval = if value.fract() == 0.0 { 1.0 } else { 0.01 };
    format_number(value, interval, &LabelFormat::Auto)
}

/// Label of a point's x value: its category, or the axis formatting.
fn x_text(series: &Series, index: usize, x_axis: Option<&Axis>) -> String {
    match series.points().get(index).map(|point| &point.x) {
        Some(XValue::Category(label)) => label.clone(),
        Some(XValue::Number(value)) => match x_axis {
            Some(axis) => axis.format_value(*value),
            None => plain_number(*value),
        },
        None => String::new(),
    }
}

impl ChartArea {
    /// Tooltip for the point under `position`, if any.
    #[must_use]
    pub fn tooltip_at(&self, position: Point) -> Option<TooltipInfo> {
        let hit = self.hit_test(position)?;
        let series = self.series(hit.series).ok()?;
        let x_value = series.x_values().get(hit.index).copied()?;
        let y_value = series.y_values().get(hit.index).copied()?;
        let transform = self.transform_of(series);

        let anchor = match transform {
            Some(transform) => transform.transform(x_value, y_value),
            None => series
                .segments()
                .iter()
                .find(|segment| segment.index == hit.index)
                .map_or(position, |segment| segment.geometry.bounds().center()),
        };
        let anchor = if anchor.is_finite() { anchor } else { position };

        let x_label = x_text(series, hit.index, transform.map(|transform| transform.x_axis));
        let y_label = match transform {
            Some(transform) => transform.y_axis.format_value(y_value),
            None => plain_number(y_value),
        };
        let color = if series.kind().is_circular() || series.kind().is_triangular() {
            palette_color(hit.index)
        } else {
            series_color(series)
        };
        Some(TooltipInfo {
            series: hit.series,
            index: hit.index,
            x_value,
            y_value,
            position: anchor,
            text: format!("{x_label} : {y_label}"),
            color,
        })
    }

    /// Legend entries: one per series, or one per point for circular and
    /// triangular series.
    #[must_use]
    pub fn legend_items(&self) -> Vec<LegendItem> {
        let mut items = Vec::new();
        for series in self.series_iter() {
            if !series.config().is_visible || !self.kind.accepts(series.kind()) {
                continue;
            }
            let icon = LegendIcon::for_kind(series.kind());
            if series.kind().is_circular() || series.kind().is_triangular() {
                items.extend((0..series.points().len()).map(|index| LegendItem {
                    text: x_text(series, index, None),
                    color: palette_color(index),
                    icon,
                    is_toggled: series.is_toggled(),
                    series: series.id(),
                    point: Some(index),
                }));
            } else {
                items.push(LegendItem {
                    text: series.name().to_owned(),
                    color: series_color(series),
                    icon,
                    is_toggled: series.is_toggled(),
                    series: series.id(),
                    point: None,
                });
            }
        }
        items
    }
}
