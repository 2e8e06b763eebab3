//! Logarithmic axis rules.
//!
//! Ranges and intervals of a logarithmic axis live in log space: a visible
//! range of `[0, 3]` with base 10 displays `1 ..= 1000`.

use crate::core::DoubleRange;
use crate::core::numeric_axis::{NumericalPadding, calculate_nice_interval};

pub const DEFAULT_LOG_BASE: f64 = 10.0;

/// `log_base(value)`; non-positive values have no logarithm and yield NaN.
#[must_use]
pub fn get_log_value(value: f64, base: f64) -> f64 {
    if value.is_nan() || value <= 0.0 || base.is_nan() || base <= 0.0 || base == 1.0 {
        return f64::NAN;
    }
    if base == 10.0 {
        value.log10()
    } else if base == 2.0 {
        value.log2()
    } else {
        value.ln() / base.ln()
    }
}

/// `base ^ exponent`.
#[must_use]
pub fn get_pow_value(exponent: f64, base: f64) -> f64 {
    base.powf(exponent)
}

/// Converts a raw-value data range into a log-space actual range.
///
/// Overrides are raw values. Non-positive values are skipped; when nothing
/// positive remains the range defaults to `[0, 1]` (one decade).
#[must_use]
pub fn calculate_actual_range(
    data_range: DoubleRange,
    minimum: Option<f64>,
    maximum: Option<f64>,
    base: f64,
) -> DoubleRange {
    let to_log = |value: f64| get_log_value(value, base);
    let data_log = if data_range.is_empty() {
        DoubleRange::EMPTY
    } else {
        let start = if data_range.start() > 0.0 {
            data_range.start()
        } else {
            // Only the positive tail of the data can be drawn.
            f64::NAN
        };
        let end = data_range.end();
        match (to_log(start), to_log(end)) {
            (s, e) if s.is_finite() && e.is_finite() => DoubleRange::new(s, e),
            (_, e) if e.is_finite() => DoubleRange::new(e.min(0.0), e),
            _ => DoubleRange::EMPTY,
        }
    };

    let minimum = minimum.map(to_log).filter(|value| value.is_finite());
    let maximum = maximum.map(to_log).filter(|value| value.is_finite());

    let range = match (minimum, maximum) {
        (Some(min), Some(max)) => DoubleRange::new(min, max),
        (Some(min), None) if data_log.is_empty() || data_log.end() <= min => {
            DoubleRange::add_default_range(min)
        }
        (Some(min), None) => DoubleRange::new(min, data_log.end()),
        (None, Some(max)) if data_log.is_empty() || data_log.start() >= max => {
            DoubleRange::new(max - 1.0, max)
        }
        (None, Some(max)) => DoubleRange::new(data_log.start(), max),
        (None, None) if data_log.is_empty() => DoubleRange::add_default_range(0.0),
        (None, None) => data_log,
    };

    if range.is_degenerate() {
        DoubleRange::add_default_range(range.start())
    } else {
        range
    }
}

/// Log-space interval: the numeric nice interval floored to whole decades.
#[must_use]
pub fn calculate_interval(log_range: DoubleRange, desired_count: f64) -> f64 {
    calculate_nice_interval(log_range, desired_count).floor().max(1.0)
}

/// Log axes only round to whole exponents; other modes pass through.
#[must_use]
pub fn apply_range_padding(
    log_range: DoubleRange,
    interval: f64,
    padding: NumericalPadding,
) -> DoubleRange {
    if log_range.is_empty() {
        return log_range;
    }
    match padding {
        NumericalPadding::Round | NumericalPadding::Additional => {
            let interval = interval.max(1.0);
            let start = (log_range.start() / interval).floor() * interval;
            let end = (log_range.end() / interval).ceil() * interval;
            if padding == NumericalPadding::Additional {
                DoubleRange::new(start - interval, end + interval)
            } else {
                DoubleRange::new(start, end)
            }
        }
        NumericalPadding::RoundStart => {
            DoubleRange::new(log_range.start().floor(), log_range.end())
        }
        NumericalPadding::RoundEnd => DoubleRange::new(log_range.start(), log_range.end().ceil()),
        _ => log_range,
    }
}
