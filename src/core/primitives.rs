use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

fn ole_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Converts a calendar timestamp into an OLE automation date (fractional days since 1899-12-30).
#[must_use]
pub fn datetime_to_ole_date(time: NaiveDateTime) -> f64 {
    let millis = (time - ole_epoch()).num_milliseconds();
    millis as f64 / MILLIS_PER_DAY
}

/// Converts an OLE automation date back to a calendar timestamp.
///
/// Returns `None` for non-finite input or values outside chrono's range.
#[must_use]
pub fn ole_date_to_datetime(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() {
        return None;
    }
    let millis = (value * MILLIS_PER_DAY).round();
    if millis.abs() > 1.0e17 {
        return None;
    }
    ole_epoch().checked_add_signed(Duration::milliseconds(millis as i64))
}

/// Builds a timestamp from calendar components.
#[must_use]
pub fn ymd_hms(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Returns `true` when the timestamp sits exactly at midnight.
#[must_use]
pub fn is_midnight(time: NaiveDateTime) -> bool {
    time.hour() == 0 && time.minute() == 0 && time.second() == 0 && time.nanosecond() == 0
}

/// First instant of the month containing `time`.
#[must_use]
pub fn month_start(time: NaiveDateTime) -> Option<NaiveDateTime> {
    ymd_hms(time.year(), time.month(), 1, 0, 0, 0)
}
