//! Unit conversion and the text rendering of temperatures and dates.

use miette::Diagnostic;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, Time, UtcOffset};

use crate::{Fahrenheit, NumberError};

const DEGREE_CELSIUS: &str = "\u{b0}C";

const ISO_DATE: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");
const ISO_TIME: &[FormatItem<'_>] =
    format_description!("[hour][optional [:[minute][optional [:[second][optional [.[subsecond]]]]]]]");
const ISO_OFFSET: &[FormatItem<'_>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");
const LONG_DATE: &[FormatItem<'_>] =
    format_description!("[weekday repr:long] [day] [month repr:long] [year]");

#[derive(Debug, Error, Diagnostic)]
pub enum DateError {
    #[error("`{input}` is not an ISO-8601 date")]
    #[diagnostic(
        code(weather::date::parse),
        help("dates look like `2021-07-06` or `2021-07-06T07:00:00`")
    )]
    Parse {
        input: String,
        #[source]
        source: time::error::Parse,
    },
    #[error(transparent)]
    #[diagnostic(code(weather::date::format))]
    Format(#[from] time::error::Format),
}

/// Append the unit to a temperature. The value is not rounded; floats keep
/// their fractional part, so `37.0` stays `37.0°C`.
pub fn format_temperature(temp: f64) -> String {
    // Debug prints the shortest representation that round-trips, with `.0`
    format!("{temp:?}{DEGREE_CELSIUS}")
}

/// Parse the calendar date of an ISO-8601 date or date-time. The time and
/// offset, when present, must be valid but are otherwise ignored: the date is
/// never shifted to another timezone.
pub fn parse_iso_date(iso: &str) -> Result<Date, DateError> {
    let error = |source| DateError::Parse {
        input: iso.to_string(),
        source,
    };

    let (date, time) = match iso.split_once(['T', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (iso, None),
    };
    let date = Date::parse(date, ISO_DATE).map_err(error)?;
    if let Some(time) = time {
        let (time, offset) = match time.find(['+', '-']) {
            Some(at) => time.split_at(at),
            None => (time.strip_suffix('Z').unwrap_or(time), ""),
        };
        Time::parse(time, ISO_TIME).map_err(error)?;
        if !offset.is_empty() {
            UtcOffset::parse(offset, ISO_OFFSET).map_err(error)?;
        }
    }
    Ok(date)
}

/// Render an ISO-8601 date like `Tuesday 06 July 2021`.
pub fn convert_date(iso: &str) -> Result<String, DateError> {
    Ok(parse_iso_date(iso)?.format(LONG_DATE)?)
}

/// Round to one decimal place. The stored binary value is what gets rounded,
/// so `30.85` (a hair above the tie) goes up while an exact `0.25` goes to even.
pub(crate) fn round_tenth(value: f64) -> f64 {
    // Scaling by ten first would round once more before the tie is decided.
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Convert to degrees Celsius, rounded to one decimal place.
pub fn convert_f_to_c(temp: impl Into<Fahrenheit>) -> f64 {
    round_tenth(temp.into().to_celsius())
}

/// Same as [`convert_f_to_c`] for a temperature written as text.
pub fn parse_f_to_c(temp: &str) -> Result<f64, NumberError> {
    Ok(convert_f_to_c(temp.parse::<Fahrenheit>()?))
}
