//! Error bars drawn around points of a source series.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::DoubleRange;
use crate::core::segment::{LineSegmentPx, Segment, SegmentData, SegmentGeometry};
use crate::core::segment_builder::SegmentContext;
use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ErrorBarType {
    #[default]
    Fixed,
    /// Error is a percentage of each value.
    Percentage,
    /// Population standard deviation, bars centred on the series mean.
    StandardDeviation,
    /// Standard deviation over `sqrt(n)`, bars centred on each point.
    StandardError,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ErrorBarMode {
    #[default]
    Both,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ErrorBarDirection {
    #[default]
    Both,
    Plus,
    Minus,
}

/// Per-point error magnitudes used by [`ErrorBarType::Custom`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CustomErrors {
    #[serde(default)]
    pub horizontal_positive: Vec<f64>,
    #[serde(default)]
    pub horizontal_negative: Vec<f64>,
    #[serde(default)]
    pub vertical_positive: Vec<f64>,
    #[serde(default)]
    pub vertical_negative: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBarSettings {
    #[serde(default)]
    pub error_type: ErrorBarType,
    #[serde(default)]
    pub mode: ErrorBarMode,
    #[serde(default)]
    pub horizontal_direction: ErrorBarDirection,
    #[serde(default)]
    pub vertical_direction: ErrorBarDirection,
    /// Amount, percentage or deviation multiplier depending on `error_type`.
    #[serde(default = "default_error")]
    pub horizontal_error: f64,
    #[serde(default = "default_error")]
    pub vertical_error: f64,
    #[serde(default = "default_cap_length")]
    pub horizontal_cap_length: f64,
    #[serde(default = "default_cap_length")]
    pub vertical_cap_length: f64,
    #[serde(default)]
    pub custom: CustomErrors,
}

fn default_error() -> f64 {
    1.0
}

fn default_cap_length() -> f64 {
    10.0
}

impl Default for ErrorBarSettings {
    fn default() -> Self {
        Self {
            error_type: ErrorBarType::Fixed,
            mode: ErrorBarMode::Both,
            horizontal_direction: ErrorBarDirection::Both,
            vertical_direction: ErrorBarDirection::Both,
            horizontal_error: default_error(),
            vertical_error: default_error(),
            horizontal_cap_length: default_cap_length(),
            vertical_cap_length: default_cap_length(),
            custom: CustomErrors::default(),
        }
    }
}

impl ErrorBarSettings {
    #[must_use]
    pub fn with_type(mut self, error_type: ErrorBarType) -> Self {
        self.error_type = error_type;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ErrorBarMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_errors(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_error = horizontal;
        self.vertical_error = vertical;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (label, value) in [
            ("horizontal error", self.horizontal_error),
            ("vertical error", self.vertical_error),
            ("horizontal cap length", self.horizontal_cap_length),
            ("vertical cap length", self.vertical_cap_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "error bar {label} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    fn shows_horizontal(&self) -> bool {
        matches!(self.mode, ErrorBarMode::Both | ErrorBarMode::Horizontal)
    }

    fn shows_vertical(&self) -> bool {
        matches!(self.mode, ErrorBarMode::Both | ErrorBarMode::Vertical)
    }
}

/// Absolute error bar extents of one point, in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorValues {
    pub center_x: f64,
    pub center_y: f64,
    /// `(low, high)` x extent of the horizontal bar, NaN when hidden.
    pub horizontal: (f64, f64),
    /// `(low, high)` y extent of the vertical bar, NaN when hidden.
    pub vertical: (f64, f64),
}

/// Population mean and standard deviation of the finite values.
#[must_use]
pub fn mean_and_deviation(values: &[f64]) -> (f64, f64, usize) {
    let finite: Vec<f64> = values.iter().copied().filter(|value| value.is_finite()).collect();
    let count = finite.len();
    if count == 0 {
        return (f64::NAN, f64::NAN, 0);
    }
    let mean = finite.iter().sum::<f64>() / count as f64;
    let variance = finite
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / count as f64;
    (mean, variance.sqrt(), count)
}

fn directed(center: f64, minus: f64, plus: f64, direction: ErrorBarDirection) -> (f64, f64) {
    match direction {
        ErrorBarDirection::Both => (center - minus, center + plus),
        ErrorBarDirection::Plus => (center, center + plus),
        ErrorBarDirection::Minus => (center - minus, center),
    }
}

/// Error extents for every point.
///
/// Custom arrays shorter than the point count are truncated to the
/// shortest array in use; points past it get no bars.
#[must_use]
pub fn compute_errors(x_values: &[f64], y_values: &[f64], settings: &ErrorBarSettings) -> Vec<ErrorValues> {
    let count = x_values.len().min(y_values.len());
    let (mean_x, deviation_x, count_x) = mean_and_deviation(&x_values[..count]);
    let (mean_y, deviation_y, count_y) = mean_and_deviation(&y_values[..count]);

    let custom_len = if settings.error_type == ErrorBarType::Custom {
        let custom = &settings.custom;
        let mut lengths = Vec::new();
        if settings.shows_horizontal() {
            lengths.push(custom.horizontal_positive.len());
            lengths.push(custom.horizontal_negative.len());
        }
        if settings.shows_vertical() {
            lengths.push(custom.vertical_positive.len());
            lengths.push(custom.vertical_negative.len());
        }
        let usable = lengths.into_iter().min().unwrap_or(0).min(count);
        if usable < count {
            debug!(
                points = count,
                usable, "custom error arrays shorter than point count, truncating"
            );
        }
        usable
    } else {
        count
    };

    (0..count)
        .map(|index| {
            let x = x_values[index];
            let y = y_values[index];
            let hidden = (f64::NAN, f64::NAN);
            if !x.is_finite() || !y.is_finite() || index >= custom_len {
                return ErrorValues {
                    center_x: x,
                    center_y: y,
                    horizontal: hidden,
                    vertical: hidden,
                };
            }

            let (center_x, h_minus, h_plus, center_y, v_minus, v_plus) = match settings.error_type {
                ErrorBarType::Fixed => (
                    x,
                    settings.horizontal_error,
                    settings.horizontal_error,
                    y,
                    settings.vertical_error,
                    settings.vertical_error,
                ),
                ErrorBarType::Percentage => {
                    let h = x.abs() * settings.horizontal_error / 100.0;
                    let v = y.abs() * settings.vertical_error / 100.0;
                    (x, h, h, y, v, v)
                }
                ErrorBarType::StandardDeviation => {
                    let h = deviation_x * settings.horizontal_error;
                    let v = deviation_y * settings.vertical_error;
                    (mean_x, h, h, mean_y, v, v)
                }
                ErrorBarType::StandardError => {
                    let h = deviation_x / (count_x as f64).sqrt() * settings.horizontal_error;
                    let v = deviation_y / (count_y as f64).sqrt() * settings.vertical_error;
                    (x, h, h, y, v, v)
                }
                ErrorBarType::Custom => {
                    let custom = &settings.custom;
                    let read = |values: &[f64]| values.get(index).copied().unwrap_or(0.0);
                    (
                        x,
                        read(&custom.horizontal_negative),
                        read(&custom.horizontal_positive),
                        y,
                        read(&custom.vertical_negative),
                        read(&custom.vertical_positive),
                    )
                }
            };

            ErrorValues {
                center_x: x,
                center_y: y,
                horizontal: if settings.shows_horizontal() {
                    directed(center_x, h_minus, h_plus, settings.horizontal_direction)
                } else {
                    hidden
                },
                vertical: if settings.shows_vertical() {
                    directed(center_y, v_minus, v_plus, settings.vertical_direction)
                } else {
                    hidden
                },
            }
        })
        .collect()
}

/// X and y ranges covered by all bars.
#[must_use]
pub fn value_extents(
    x_values: &[f64],
    y_values: &[f64],
    settings: &ErrorBarSettings,
) -> (DoubleRange, DoubleRange) {
    compute_errors(x_values, y_values, settings).iter().fold(
        (DoubleRange::EMPTY, DoubleRange::EMPTY),
        |(x_range, y_range), errors| {
            (
                x_range
                    .union_value(errors.center_x)
                    .union_value(errors.horizontal.0)
                    .union_value(errors.horizontal.1),
                y_range
                    .union_value(errors.center_y)
                    .union_value(errors.vertical.0)
                    .union_value(errors.vertical.1),
            )
        },
    )
}

#[must_use]
pub fn create_segments(x_values: &[f64], y_values: &[f64], settings: &ErrorBarSettings) -> Vec<Segment> {
    compute_errors(x_values, y_values, settings)
        .into_iter()
        .enumerate()
        .map(|(index, errors)| {
            let empty = !errors.center_x.is_finite() || !errors.center_y.is_finite();
            Segment::new(
                index,
                SegmentData::ErrorBar {
                    x: errors.center_x,
                    y: errors.center_y,
                    horizontal: errors.horizontal,
                    vertical: errors.vertical,
                },
                empty,
            )
        })
        .collect()
}

pub fn layout(segments: &mut [Segment], ctx: &SegmentContext<'_>, settings: &ErrorBarSettings) {
    for segment in segments {
        let SegmentData::ErrorBar {
            x,
            y,
            horizontal,
            vertical,
        } = segment.data
        else {
            continue;
        };
        let Some(transform) = ctx.transform.filter(|_| !segment.empty) else {
            segment.geometry = SegmentGeometry::Empty;
            continue;
        };

        let project = |start: Point, end: Point| -> Option<LineSegmentPx> {
            (start.is_finite() && end.is_finite()).then_some((start, end))
        };
        let horizontal_line = project(
            transform.transform(horizontal.0, y),
            transform.transform(horizontal.1, y),
        );
        let vertical_line = project(
            transform.transform(x, vertical.0),
            transform.transform(x, vertical.1),
        );

        let mut caps: SmallVec<[LineSegmentPx; 4]> = SmallVec::new();
        if let Some(line) = horizontal_line {
            caps.extend(end_caps(line, settings.horizontal_cap_length));
        }
        if let Some(line) = vertical_line {
            caps.extend(end_caps(line, settings.vertical_cap_length));
        }

        segment.geometry = if horizontal_line.is_none() && vertical_line.is_none() {
            SegmentGeometry::Empty
        } else {
            SegmentGeometry::ErrorBar {
                horizontal: horizontal_line,
                vertical: vertical_line,
                caps,
            }
        };
    }
}

/// Perpendicular caps of `cap_length` pixels at both ends of `line`.
fn end_caps(line: LineSegmentPx, cap_length: f64) -> SmallVec<[LineSegmentPx; 2]> {
    let (start, end) = line;
    let length = start.distance_to(end);
    if length == 0.0 || cap_length <= 0.0 {
        return SmallVec::new();
    }
    let half = cap_length / 2.0;
    let normal_x = -(end.y - start.y) / length * half;
    let normal_y = (end.x - start.x) / length * half;
    [start, end]
        .into_iter()
        .map(|point| {
            (
                point.offset(-normal_x, -normal_y),
                point.offset(normal_x, normal_y),
            )
        })
        .collect()
}
