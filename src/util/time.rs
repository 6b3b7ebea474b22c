//! Local time handling.
//!
//! Everything is stored in UTC. User input and rendered dates use the clan's timezone,
//! America/Sao_Paulo.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

use crate::error::AppError;

pub const TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

const TIME_FORMAT_HINT: &str = "Use HH:MM, DD/MM HH:MM or DD/MM/YYYY HH:MM.";

/// Parses an event time typed by a user.
///
/// Accepted forms, in the clan's timezone:
/// - `HH:MM` - today, or tomorrow when that time already passed
/// - `DD/MM HH:MM` - this year, or next year when that date already passed
/// - `DD/MM/YYYY HH:MM`
///
/// The date and time tokens may appear in either order.
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - The parsed instant
/// - `Err(AppError::BadRequest)` - Input does not match any accepted form
pub fn parse_event_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
    let invalid = || {
        AppError::BadRequest(format!(
            "Invalid date/time '{}'. {}",
            input.trim(),
            TIME_FORMAT_HINT
        ))
    };

    let tokens: Vec<&str> = input.split_whitespace().collect();
    let (date_token, time_token) = match tokens.as_slice() {
        [time] => (None, *time),
        [a, b] if a.contains('/') => (Some(*a), *b),
        [a, b] if b.contains('/') => (Some(*b), *a),
        _ => return Err(invalid()),
    };

    let time = NaiveTime::parse_from_str(time_token, "%H:%M").map_err(|_| invalid())?;
    let local_now = now.with_timezone(&TIMEZONE);
    let today = local_now.date_naive();

    let result = match date_token {
        None => {
            let candidate = to_utc(today.and_time(time)).ok_or_else(invalid)?;
            if candidate < now {
                to_utc((today + Duration::days(1)).and_time(time)).ok_or_else(invalid)?
            } else {
                candidate
            }
        }
        Some(date) => {
            let parts: Vec<&str> = date.split('/').collect();
            let (day, month, year) = match parts.as_slice() {
                [d, m] => (parse_part(d)?, parse_part(m)?, None),
                [d, m, y] => (parse_part(d)?, parse_part(m)?, Some(parse_part(y)? as i32)),
                _ => return Err(invalid()),
            };

            let date = match year {
                Some(year) => NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?,
                None => {
                    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)
                        .ok_or_else(invalid)?;
                    if this_year < today {
                        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
                            .ok_or_else(invalid)?
                    } else {
                        this_year
                    }
                }
            };

            to_utc(date.and_time(time)).ok_or_else(invalid)?
        }
    };

    Ok(result)
}

fn parse_part(value: &str) -> Result<u32, AppError> {
    value.parse::<u32>().map_err(|_| {
        AppError::BadRequest(format!("Invalid date '{}'. {}", value, TIME_FORMAT_HINT))
    })
}

fn to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    TIMEZONE
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Midnight of the current local day, as UTC.
pub fn start_of_local_day(now: DateTime<Utc>) -> DateTime<Utc> {
    let local_midnight = now.with_timezone(&TIMEZONE).date_naive().and_time(NaiveTime::MIN);

    to_utc(local_midnight).unwrap_or(now)
}

/// 23:59:59 local time, `days` days after today, as UTC.
pub fn end_of_local_day_after(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    let date = now.with_timezone(&TIMEZONE).date_naive() + Duration::days(days);
    let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);

    to_utc(date.and_time(end)).unwrap_or(now)
}

/// `dd/mm` in local time.
pub fn format_day_month(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&TIMEZONE).format("%d/%m").to_string()
}

/// `HH:MM` in local time.
pub fn format_clock_time(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&TIMEZONE).format("%H:%M").to_string()
}

/// `dd/mm/YYYY HH:MM` in local time, the form the edit modal is prefilled with.
pub fn format_for_input(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&TIMEZONE).format("%d/%m/%Y %H:%M").to_string()
}

/// Three letter weekday in local time.
pub fn weekday_short(dt: DateTime<Utc>) -> &'static str {
    match dt.with_timezone(&TIMEZONE).weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Discord timestamp markup rendering the full date plus the relative offset.
pub fn discord_timestamp(dt: DateTime<Utc>) -> String {
    let ts = dt.timestamp();
    format!("<t:{}:F> (<t:{}:R>)", ts, ts)
}
