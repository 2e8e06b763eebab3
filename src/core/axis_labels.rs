use serde::{Deserialize, Serialize};

use crate::core::axis::{Axis, AxisKind};
use crate::core::date_time_axis::{self, DateTimeIntervalType};
use crate::core::log_axis::get_pow_value;
use crate::core::types::{Rect, Size};
use crate::core::{category_axis, numeric_axis};

/// Upper bound on generated labels per axis, guarding against tiny intervals.
pub const MAX_VISIBLE_LABELS: usize = 1_000;

/// How axis values are turned into label text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelFormat {
    /// Decimals derived from the visible interval.
    #[default]
    Auto,
    Fixed {
        decimals: u8,
    },
    /// Value multiplied by 100 with a `%` suffix.
    Percent {
        decimals: u8,
    },
    /// chrono pattern applied to OLE dates.
    DateTime {
        pattern: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelAlignment {
    Start,
    #[default]
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EdgeLabelsDrawingMode {
    #[default]
    Center,
    Shift,
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelsIntersectAction {
    None,
    #[default]
    Hide,
    MultipleRows,
}

/// Label styling consumed by measurement and label layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabelStyle {
    #[serde(default)]
    pub format: LabelFormat,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub alignment: LabelAlignment,
    #[serde(default = "default_label_margin")]
    pub margin: f64,
    #[serde(default)]
    pub intersect_action: LabelsIntersectAction,
    #[serde(default)]
    pub edge_labels: EdgeLabelsDrawingMode,
}

fn default_font_size() -> f64 {
    12.0
}

fn default_label_margin() -> f64 {
    4.0
}

impl Default for AxisLabelStyle {
    fn default() -> Self {
        Self {
            format: LabelFormat::Auto,
            font_size: default_font_size(),
            alignment: LabelAlignment::Center,
            margin: default_label_margin(),
            intersect_action: LabelsIntersectAction::Hide,
            edge_labels: EdgeLabelsDrawingMode::Center,
        }
    }
}

/// One tick label of an axis.
///
/// `value` is a raw data value. `position`, `size`, `rect` and `row` are
/// filled by the axis layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub value: f64,
    pub text: String,
    pub position: f64,
    pub size: Size,
    pub rect: Rect,
    pub row: usize,
    pub visible: bool,
}

impl AxisLabel {
    #[must_use]
    pub fn new(value: f64, text: String) -> Self {
        Self {
            value,
            text,
            position: f64::NAN,
            size: Size::default(),
            rect: Rect::nan(),
            row: 0,
            visible: true,
        }
    }
}

/// Formats a plain number; `Auto` derives decimals from `interval`.
#[must_use]
pub fn format_number(value: f64, interval: f64, format: &LabelFormat) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let text = match format {
        LabelFormat::Auto | LabelFormat::DateTime { .. } => {
            let decimals = auto_decimals(interval);
            format!("{value:.decimals$}")
        }
        LabelFormat::Fixed { decimals } => {
            let decimals = usize::from(*decimals);
            format!("{value:.decimals$}")
        }
        LabelFormat::Percent { decimals } => {
            let decimals = usize::from(*decimals);
            format!("{:.decimals$}%", value * 100.0)
        }
    };
    normalize_negative_zero(text)
}

fn auto_decimals(interval: f64) -> usize {
    if !interval.is_finite() || interval <= 0.0 || interval >= 1.0 {
        return 0;
    }
    let mut decimals = (-interval.log10().floor()).max(0.0) as usize;
    // Intervals like 0.25 need one more digit than their magnitude suggests.
    let scaled = interval * 10f64.powi(decimals as i32);
    if (scaled - scaled.round()).abs() > 1e-9 {
        decimals += 1;
    }
    decimals.min(10)
}

fn normalize_negative_zero(text: String) -> String {
    let is_zero = text
        .trim_start_matches('-')
        .chars()
        .all(|ch| ch == '0' || ch == '.' || ch == '%');
    if is_zero && text.starts_with('-') {
        text[1..].to_owned()
    } else {
        text
    }
}

impl Axis {
    /// Formats a raw data value as this axis would label it.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        match &self.config().kind {
            AxisKind::Category(_) => self
                .category_label(value)
                .map(str::to_owned)
                .unwrap_or_else(|| format_number(value, 1.0, &LabelFormat::Auto)),
            AxisKind::DateTime(_) => {
                let pattern = match &self.config().labels.format {
                    LabelFormat::DateTime { pattern } => pattern.as_str(),
                    _ => self.interval_type().default_label_pattern(),
                };
                date_time_axis::format_ole_date(value, pattern)
            }
            AxisKind::Logarithmic(_) => {
                let interval = if value.abs() >= 1.0 { 1.0 } else { value.abs() };
                format_number(value, interval, &self.config().labels.format)
            }
            AxisKind::Numeric(_) => {
                format_number(value, self.visible_interval(), &self.config().labels.format)
            }
        }
    }

    /// Regenerates `visible_labels` from the visible range and interval.
    pub fn generate_visible_labels(&mut self) {
        let visible = self.visible_range();
        let interval = self.visible_interval();
        let values: Vec<f64> = match &self.config().kind {
            AxisKind::Numeric(_) => {
                numeric_axis::generate_ticks(visible, interval, MAX_VISIBLE_LABELS)
            }
            AxisKind::Logarithmic(params) => {
                let base = params.log_base;
                numeric_axis::generate_ticks(visible, interval.max(1.0), MAX_VISIBLE_LABELS)
                    .into_iter()
                    .map(|exponent| get_pow_value(exponent, base))
                    .collect()
            }
            AxisKind::DateTime(_) => {
                let unit = match self.interval_type() {
                    DateTimeIntervalType::Auto => DateTimeIntervalType::Days,
                    unit => unit,
                };
                date_time_axis::generate_ticks(visible, interval, unit, MAX_VISIBLE_LABELS)
            }
            AxisKind::Category(_) => {
                category_axis::generate_ticks(visible, interval, MAX_VISIBLE_LABELS)
                    .into_iter()
                    .filter(|index| {
                        self.categories().is_empty() || (*index as usize) < self.categories().len()
                    })
                    .collect()
            }
        };

        let labels = values
            .into_iter()
            .map(|value| AxisLabel::new(value, self.format_value(value)))
            .collect();
        self.set_visible_labels(labels);
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelFormat, format_number};

    #[test]
    fn auto_format_follows_interval_precision() {
        assert_eq!(format_number(20.0, 20.0, &LabelFormat::Auto), "20");
        assert_eq!(format_number(0.3, 0.1, &LabelFormat::Auto), "0.3");
        assert_eq!(format_number(0.75, 0.25, &LabelFormat::Auto), "0.75");
    }

    #[test]
    fn negative_zero_is_rendered_without_sign() {
        assert_eq!(format_number(-0.0001, 1.0, &LabelFormat::Auto), "0");
    }

    #[test]
    fn percent_format_scales_value() {
        assert_eq!(
            format_number(0.125, 0.1, &LabelFormat::Percent { decimals: 1 }),
            "12.5%"
        );
    }
}
