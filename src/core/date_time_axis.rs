//! Calendar-aware range rules for date-time axes.
//!
//! Axis values are OLE automation dates (fractional days since 1899-12-30),
//! so a one-day span is `1.0`. Intervals are expressed in a calendar unit
//! chosen from the span, and padding rounds to unit boundaries.

use chrono::{Datelike, Months, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::DoubleRange;
use crate::core::numeric_axis::calculate_nice_interval;
use crate::core::primitives::{
    datetime_to_ole_date, is_midnight, month_start, ole_date_to_datetime, ymd_hms,
};

const DAYS_PER_YEAR: f64 = 365.0;
const DAYS_PER_MONTH: f64 = 30.0;
const HOURS_PER_DAY: f64 = 24.0;
const MINUTES_PER_DAY: f64 = 1_440.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateTimeIntervalType {
    #[default]
    Auto,
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl DateTimeIntervalType {
    /// Units probed by automatic interval selection, coarsest first.
    const AUTO_ORDER: [Self; 7] = [
        Self::Years,
        Self::Months,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Milliseconds,
    ];

    /// Number of this unit in one day (years and months use 365/30 day approximations).
    #[must_use]
    pub fn units_per_day(self) -> f64 {
        match self {
            Self::Years => 1.0 / DAYS_PER_YEAR,
            Self::Months => 1.0 / DAYS_PER_MONTH,
            Self::Auto | Self::Days => 1.0,
            Self::Hours => HOURS_PER_DAY,
            Self::Minutes => MINUTES_PER_DAY,
            Self::Seconds => SECONDS_PER_DAY,
            Self::Milliseconds => MILLIS_PER_DAY,
        }
    }

    /// chrono format pattern used for labels at this granularity.
    #[must_use]
    pub fn default_label_pattern(self) -> &'static str {
        match self {
            Self::Years => "%Y",
            Self::Months => "%b %Y",
            Self::Auto | Self::Days => "%m/%d/%Y",
            Self::Hours | Self::Minutes => "%H:%M",
            Self::Seconds => "%H:%M:%S",
            Self::Milliseconds => "%H:%M:%S%.3f",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateTimeRangePadding {
    /// Resolves to `None`.
    #[default]
    Auto,
    None,
    Round,
    Additional,
    PrependInterval,
    AppendInterval,
}

/// Picks an interval and its calendar unit for an OLE-date range.
///
/// With `Auto`, the first unit (years, months, days, ...) whose nice interval
/// over the span expressed in that unit reaches `1` wins.
#[must_use]
pub fn calculate_interval(
    range: DoubleRange,
    desired_count: f64,
    requested: DateTimeIntervalType,
) -> (f64, DateTimeIntervalType) {
    let span_days = range.delta();
    if !span_days.is_finite() || span_days <= 0.0 {
        let unit = if requested == DateTimeIntervalType::Auto {
            DateTimeIntervalType::Days
        } else {
            requested
        };
        return (1.0, unit);
    }

    let nice_in = |unit: DateTimeIntervalType| {
        calculate_nice_interval(
            DoubleRange::new(0.0, span_days * unit.units_per_day()),
            desired_count,
        )
    };

    if requested != DateTimeIntervalType::Auto {
        return (nice_in(requested), requested);
    }

    for unit in DateTimeIntervalType::AUTO_ORDER {
        let interval = nice_in(unit);
        if interval >= 1.0 {
            return (interval, unit);
        }
    }
    (
        nice_in(DateTimeIntervalType::Milliseconds),
        DateTimeIntervalType::Milliseconds,
    )
}

/// Resolves the unit of an explicit interval; `Auto` is inferred from the span.
#[must_use]
pub fn resolve_interval_type(
    range: DoubleRange,
    desired_count: f64,
    requested: DateTimeIntervalType,
) -> DateTimeIntervalType {
    if requested == DateTimeIntervalType::Auto {
        calculate_interval(range, desired_count, requested).1
    } else {
        requested
    }
}

/// Adds `interval` calendar units to an OLE date.
///
/// Whole years and months step the calendar (month lengths and leap years
/// respected); fractional parts fall back to day approximations.
#[must_use]
pub fn add_interval(value: f64, interval: f64, unit: DateTimeIntervalType) -> f64 {
    if !value.is_finite() || !interval.is_finite() {
        return f64::NAN;
    }
    match unit {
        DateTimeIntervalType::Years => add_months(value, interval * 12.0),
        DateTimeIntervalType::Months => add_months(value, interval),
        other => value + interval / other.units_per_day(),
    }
}

fn add_months(value: f64, months: f64) -> f64 {
    let whole = months.trunc();
    let fraction = months - whole;
    let Some(time) = ole_date_to_datetime(value) else {
        return f64::NAN;
    };
    let magnitude = Months::new(whole.abs().min(f64::from(u32::MAX)) as u32);
    let stepped = if whole >= 0.0 {
        time.checked_add_months(magnitude)
    } else {
        time.checked_sub_months(magnitude)
    };
    match stepped {
        Some(stepped) => datetime_to_ole_date(stepped) + fraction * DAYS_PER_MONTH,
        None => f64::NAN,
    }
}

/// Start of the `unit` containing `time`; years align to multiples of `interval`.
fn floor_to_unit(time: NaiveDateTime, interval: f64, unit: DateTimeIntervalType) -> NaiveDateTime {
    let floored = match unit {
        DateTimeIntervalType::Years => {
            let step = interval.round().max(1.0) as i32;
            let year = time.year().div_euclid(step) * step;
            ymd_hms(year, 1, 1, 0, 0, 0)
        }
        DateTimeIntervalType::Months => month_start(time),
        DateTimeIntervalType::Auto | DateTimeIntervalType::Days => {
            ymd_hms(time.year(), time.month(), time.day(), 0, 0, 0)
        }
        DateTimeIntervalType::Hours => {
            ymd_hms(time.year(), time.month(), time.day(), time.hour(), 0, 0)
        }
        DateTimeIntervalType::Minutes => ymd_hms(
            time.year(),
            time.month(),
            time.day(),
            time.hour(),
            time.minute(),
            0,
        ),
        DateTimeIntervalType::Seconds => time.with_nanosecond(0),
        DateTimeIntervalType::Milliseconds => Some(time),
    };
    floored.unwrap_or(time)
}

/// Rounds an OLE date down to the start of its calendar unit.
#[must_use]
pub fn round_down(value: f64, interval: f64, unit: DateTimeIntervalType) -> f64 {
    match ole_date_to_datetime(value) {
        Some(time) => datetime_to_ole_date(floor_to_unit(time, interval, unit)),
        None => value,
    }
}

/// Rounds an OLE date up to the next calendar-unit boundary (identity on boundaries).
#[must_use]
pub fn round_up(value: f64, interval: f64, unit: DateTimeIntervalType) -> f64 {
    let Some(time) = ole_date_to_datetime(value) else {
        return value;
    };
    let floored = floor_to_unit(time, interval, unit);
    if floored == time {
        return value;
    }
    let step = match unit {
        DateTimeIntervalType::Years => interval.round().max(1.0),
        _ => 1.0,
    };
    add_interval(datetime_to_ole_date(floored), step, unit)
}

#[must_use]
pub fn apply_range_padding(
    range: DoubleRange,
    interval: f64,
    unit: DateTimeIntervalType,
    padding: DateTimeRangePadding,
) -> DoubleRange {
    if range.is_empty() || !interval.is_finite() || interval <= 0.0 {
        return range;
    }
    match padding {
        DateTimeRangePadding::Auto | DateTimeRangePadding::None => range,
        DateTimeRangePadding::Round => DoubleRange::new(
            round_down(range.start(), interval, unit),
            round_up(range.end(), interval, unit),
        ),
        DateTimeRangePadding::Additional => {
            let start = round_down(range.start(), interval, unit);
            let end = round_up(range.end(), interval, unit);
            DoubleRange::new(
                add_interval(start, -interval, unit),
                add_interval(end, interval, unit),
            )
        }
        DateTimeRangePadding::PrependInterval => DoubleRange::new(
            add_interval(range.start(), -interval, unit),
            range.end(),
        ),
        DateTimeRangePadding::AppendInterval => DoubleRange::new(
            range.start(),
            add_interval(range.end(), interval, unit),
        ),
    }
}

/// Calendar-stepped tick values inside `range`.
#[must_use]
pub fn generate_ticks(
    range: DoubleRange,
    interval: f64,
    unit: DateTimeIntervalType,
    max_ticks: usize,
) -> Vec<f64> {
    if range.is_empty() || !interval.is_finite() || interval <= 0.0 {
        return Vec::new();
    }
    let epsilon = 1e-9;
    let mut value = round_down(range.start(), interval, unit);
    let mut ticks = Vec::new();
    let mut guard = 0usize;
    while value <= range.end() + epsilon && ticks.len() < max_ticks && guard < max_ticks * 4 {
        if value >= range.start() - epsilon {
            ticks.push(value);
        }
        let next = add_interval(value, interval, unit);
        if !next.is_finite() || next <= value {
            break;
        }
        value = next;
        guard += 1;
    }
    ticks
}

/// Converts an auto-scrolling delta expressed in `unit` into days.
#[must_use]
pub fn delta_in_days(delta: f64, unit: DateTimeIntervalType) -> f64 {
    delta / unit.units_per_day()
}

/// Formats an OLE date; unconvertible values render as an empty string.
#[must_use]
pub fn format_ole_date(value: f64, pattern: &str) -> String {
    match ole_date_to_datetime(value) {
        Some(time) if is_midnight(time) && pattern.contains("%H") => {
            time.format("%m/%d").to_string()
        }
        Some(time) => time.format(pattern).to_string(),
        None => String::new(),
    }
}
