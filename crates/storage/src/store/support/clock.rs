#![forbid(unsafe_code)]

use super::super::StoreError;
use cp_core::TimeBasis;
use cp_core::stats::CalendarDate;
use std::ops::Range;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, Time};

/// Current and preceding calendar period, both half-open `[start, end)` in Unix ms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::store) struct PeriodBounds {
    pub(in crate::store) current: Range<i64>,
    pub(in crate::store) previous: Range<i64>,
}

const OUT_OF_RANGE: StoreError = StoreError::InvalidInput("timestamp out of range");

pub(in crate::store) fn datetime_from_ms(ts_ms: i64) -> OffsetDateTime {
    let nanos = i128::from(ts_ms) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn ms_at_midnight(date: Date) -> i64 {
    let nanos = date.with_time(Time::MIDNIGHT).assume_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

fn first_of_month(year: i32, month: Month) -> Result<Date, StoreError> {
    Date::from_calendar_date(year, month, 1).map_err(|_| OUT_OF_RANGE)
}

/// First day of the month `offset` months away from `(year, month)`.
fn shift_month(year: i32, month: Month, offset: i32) -> Result<Date, StoreError> {
    let index = year * 12 + i32::from(u8::from(month)) - 1 + offset;
    let month = u8::try_from(index.rem_euclid(12) + 1).map_err(|_| OUT_OF_RANGE)?;
    let month = Month::try_from(month).map_err(|_| OUT_OF_RANGE)?;
    first_of_month(index.div_euclid(12), month)
}

pub(in crate::store) fn day_bounds(now_ms: i64) -> Result<PeriodBounds, StoreError> {
    let today = datetime_from_ms(now_ms).date();
    let tomorrow = today.next_day().ok_or(OUT_OF_RANGE)?;
    let yesterday = today.previous_day().ok_or(OUT_OF_RANGE)?;
    Ok(PeriodBounds {
        current: ms_at_midnight(today)..ms_at_midnight(tomorrow),
        previous: ms_at_midnight(yesterday)..ms_at_midnight(today),
    })
}

pub(in crate::store) fn month_bounds(now_ms: i64) -> Result<PeriodBounds, StoreError> {
    let today = datetime_from_ms(now_ms).date();
    let start = first_of_month(today.year(), today.month())?;
    let next = shift_month(today.year(), today.month(), 1)?;
    let previous = shift_month(today.year(), today.month(), -1)?;
    Ok(PeriodBounds {
        current: ms_at_midnight(start)..ms_at_midnight(next),
        previous: ms_at_midnight(previous)..ms_at_midnight(start),
    })
}

pub(in crate::store) fn year_bounds(now_ms: i64) -> Result<PeriodBounds, StoreError> {
    let year = datetime_from_ms(now_ms).year();
    let start = first_of_month(year, Month::January)?;
    let next = first_of_month(year + 1, Month::January)?;
    let previous = first_of_month(year - 1, Month::January)?;
    Ok(PeriodBounds {
        current: ms_at_midnight(start)..ms_at_midnight(next),
        previous: ms_at_midnight(previous)..ms_at_midnight(start),
    })
}

const TREND_WINDOW_DAYS: i64 = 30;
const TREND_WINDOW_MONTHS: i32 = 12;

/// Start of the default trend window: the last 30 days or the last 12 months,
/// both counting the current bucket. Yearly trends are unbounded.
pub(in crate::store) fn trend_window_start(
    basis: TimeBasis,
    now_ms: i64,
) -> Result<Option<i64>, StoreError> {
    let today = datetime_from_ms(now_ms).date();
    match basis {
        TimeBasis::Day => {
            let start = today
                .checked_sub(time::Duration::days(TREND_WINDOW_DAYS - 1))
                .ok_or(OUT_OF_RANGE)?;
            Ok(Some(ms_at_midnight(start)))
        }
        TimeBasis::Month => {
            let start = shift_month(today.year(), today.month(), 1 - TREND_WINDOW_MONTHS)?;
            Ok(Some(ms_at_midnight(start)))
        }
        TimeBasis::Year => Ok(None),
    }
}

/// SQLite expression truncating a Unix-ms column to the bucket label (UTC).
pub(in crate::store) fn bucket_sql(basis: TimeBasis, column: &str) -> String {
    let pattern = match basis {
        TimeBasis::Day => "%Y-%m-%d",
        TimeBasis::Month => "%Y-%m",
        TimeBasis::Year => "%Y",
    };
    format!("strftime('{pattern}', {column} / 1000, 'unixepoch')")
}

pub(in crate::store) fn calendar_date_from_ms(ts_ms: i64) -> CalendarDate {
    let date = datetime_from_ms(ts_ms).date();
    CalendarDate::new(date.year(), u8::from(date.month()), date.day())
}

pub(in crate::store) fn parse_birth_date(value: &str) -> Option<CalendarDate> {
    let date = Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).ok()?;
    Some(CalendarDate::new(date.year(), u8::from(date.month()), date.day()))
}
