//! Range and interval rules for numeric axes.
//!
//! The same nice-interval search is reused by the logarithmic, date-time and
//! category axes with their own unit conversions layered on top.

use serde::{Deserialize, Serialize};

use crate::core::DoubleRange;

/// Multipliers tried, largest first, when searching a nice interval.
const INTERVAL_DIVISORS: [f64; 4] = [10.0, 5.0, 2.0, 1.0];

/// Pixel-density factors tuned for label readability.
const VERTICAL_DENSITY: f64 = 0.533;
const HORIZONTAL_DENSITY: f64 = 0.8;

/// Default upper bound of labels per 100 pixels.
pub const DEFAULT_MAXIMUM_LABELS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NumericalPadding {
    /// `Round` on vertical axes, `None` on horizontal axes.
    #[default]
    Auto,
    None,
    Round,
    RoundStart,
    RoundEnd,
    /// Rounds, then extends one interval on both ends.
    Additional,
    PrependInterval,
    AppendInterval,
}

impl NumericalPadding {
    #[must_use]
    pub fn resolve(self, is_vertical: bool) -> Self {
        match self {
            Self::Auto if is_vertical => Self::Round,
            Self::Auto => Self::None,
            other => other,
        }
    }
}

/// Number of intervals an axis of `length_px` should show.
#[must_use]
pub fn desired_intervals_count(length_px: f64, is_vertical: bool, maximum_labels: u32) -> f64 {
    if !length_px.is_finite() || length_px <= 0.0 {
        return 1.0;
    }
    let density = if is_vertical {
        VERTICAL_DENSITY
    } else {
        HORIZONTAL_DENSITY
    };
    (length_px * density * f64::from(maximum_labels.max(1)) / 100.0).max(1.0)
}

/// Rounds `range.delta() / desired_count` to a 1/2/5 x 10^n step.
#[must_use]
pub fn calculate_nice_interval(range: DoubleRange, desired_count: f64) -> f64 {
    let delta = range.delta();
    if !delta.is_finite() || delta <= 0.0 {
        return 1.0;
    }
    let desired_count = desired_count.max(1.0);
    let mut nice_interval = delta / desired_count;
    let min_interval = 10f64.powf(nice_interval.log10().floor());

    for divisor in INTERVAL_DIVISORS {
        let candidate = min_interval * divisor;
        if desired_count < delta / candidate {
            break;
        }
        nice_interval = candidate;
    }

    nice_interval
}

/// Returns the explicit interval when usable, otherwise `None` to request auto.
#[must_use]
pub fn explicit_interval(interval: Option<f64>) -> Option<f64> {
    interval.filter(|value| value.is_finite() && *value > 0.0)
}

/// Applies the `minimum`/`maximum` overrides to a data-derived range.
///
/// Unset overrides keep the data bound. An empty data range falls back to a
/// unit range anchored at whichever override exists, or at zero. A single
/// value range becomes `[value, value + 1]`.
#[must_use]
pub fn calculate_actual_range(
    data_range: DoubleRange,
    minimum: Option<f64>,
    maximum: Option<f64>,
) -> DoubleRange {
    let minimum = minimum.filter(|value| value.is_finite());
    let maximum = maximum.filter(|value| value.is_finite());

    let range = match (minimum, maximum) {
        (Some(min), Some(max)) => DoubleRange::new(min, max),
        (Some(min), None) => {
            if data_range.is_empty() || data_range.end() <= min {
                DoubleRange::add_default_range(min)
            } else {
                DoubleRange::new(min, data_range.end())
            }
        }
        (None, Some(max)) => {
            if data_range.is_empty() || data_range.start() >= max {
                DoubleRange::new(max - 1.0, max)
            } else {
                DoubleRange::new(data_range.start(), max)
            }
        }
        (None, None) if data_range.is_empty() => DoubleRange::add_default_range(0.0),
        (None, None) => data_range,
    };

    if range.is_degenerate() {
        DoubleRange::add_default_range(range.start())
    } else {
        range
    }
}

/// Pads a numeric range according to `padding` (already resolved from `Auto`).
#[must_use]
pub fn apply_range_padding(range: DoubleRange, interval: f64, padding: NumericalPadding) -> DoubleRange {
    if range.is_empty() || !interval.is_finite() || interval <= 0.0 {
        return range;
    }
    let round_start = (range.start() / interval).floor() * interval;
    let round_end = (range.end() / interval).ceil() * interval;

    match padding {
        NumericalPadding::Auto | NumericalPadding::None => range,
        NumericalPadding::Round => DoubleRange::new(round_start, round_end),
        NumericalPadding::RoundStart => DoubleRange::new(round_start, range.end()),
        NumericalPadding::RoundEnd => DoubleRange::new(range.start(), round_end),
        NumericalPadding::Additional => {
            DoubleRange::new(round_start - interval, round_end + interval)
        }
        NumericalPadding::PrependInterval => {
            DoubleRange::new(range.start() - interval, range.end())
        }
        NumericalPadding::AppendInterval => DoubleRange::new(range.start(), range.end() + interval),
    }
}

/// Tick values inside `range` aligned to multiples of `interval`.
#[must_use]
pub fn generate_ticks(range: DoubleRange, interval: f64, max_ticks: usize) -> Vec<f64> {
    if range.is_empty() || !interval.is_finite() || interval <= 0.0 {
        return Vec::new();
    }
    let epsilon = interval * 1e-9;
    let mut value = (range.start() / interval).ceil() * interval;
    if value - interval >= range.start() - epsilon {
        value -= interval;
    }

    let mut ticks = Vec::new();
    while value <= range.end() + epsilon && ticks.len() < max_ticks {
        if value >= range.start() - epsilon {
            ticks.push(snap_to_interval(value, interval));
        }
        value += interval;
    }
    ticks
}

/// Removes accumulated float noise (e.g. `0.30000000000000004`).
fn snap_to_interval(value: f64, interval: f64) -> f64 {
    let decimals = (-interval.log10().floor()).clamp(0.0, 15.0) as i32 + 2;
    let factor = 10f64.powi(decimals);
    let snapped = (value * factor).round() / factor;
    if snapped == 0.0 { 0.0 } else { snapped }
}

#[cfg(test)]
mod tests {
    use super::{
        NumericalPadding, apply_range_padding, calculate_actual_range, calculate_nice_interval,
        desired_intervals_count, generate_ticks,
    };
    use crate::core::DoubleRange;

    #[test]
    fn vertical_500px_axis_over_hundred_picks_twenty() {
        let count = desired_intervals_count(500.0, true, 3);
        let interval = calculate_nice_interval(DoubleRange::new(0.0, 100.0), count);
        assert_eq!(interval, 20.0);
    }

    #[test]
    fn horizontal_axis_is_denser() {
        let count = desired_intervals_count(500.0, false, 3);
        let interval = calculate_nice_interval(DoubleRange::new(0.0, 100.0), count);
        assert_eq!(interval, 10.0);
    }

    #[test]
    fn overrides_replace_only_the_bounds_they_set() {
        let data = DoubleRange::new(3.0, 42.0);
        assert_eq!(
            calculate_actual_range(data, Some(0.0), None),
            DoubleRange::new(0.0, 42.0)
        );
        assert_eq!(
            calculate_actual_range(data, None, Some(50.0)),
            DoubleRange::new(3.0, 50.0)
        );
        assert_eq!(
            calculate_actual_range(data, Some(f64::NAN), None),
            DoubleRange::new(3.0, 42.0)
        );
    }

    #[test]
    fn empty_and_degenerate_ranges_get_unit_defaults() {
        assert_eq!(
            calculate_actual_range(DoubleRange::EMPTY, None, None),
            DoubleRange::new(0.0, 1.0)
        );
        assert_eq!(
            calculate_actual_range(DoubleRange::new(7.0, 7.0), None, None),
            DoubleRange::new(7.0, 8.0)
        );
    }

    #[test]
    fn round_padding_snaps_to_interval_multiples() {
        let padded =
            apply_range_padding(DoubleRange::new(3.0, 97.0), 20.0, NumericalPadding::Round);
        assert_eq!(padded, DoubleRange::new(0.0, 100.0));
        let additional =
            apply_range_padding(DoubleRange::new(3.0, 97.0), 20.0, NumericalPadding::Additional);
        assert_eq!(additional, DoubleRange::new(-20.0, 120.0));
    }

    #[test]
    fn ticks_cover_the_range_inclusively() {
        let ticks = generate_ticks(DoubleRange::new(0.0, 1.0), 0.1, 100);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
    }
}
