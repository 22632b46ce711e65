//! Range grammar: turns the free-text range of a column into a typed
//! [`RangeSpec`].
//!
//! | type | syntax |
//! |---|---|
//! | `date` | `DD.MM.YYYY-DD.MM.YYYY` |
//! | `time` | `HH:MM:SS-HH:MM:SS` |
//! | `float_range`, `integer_range` | `NUM-NUM` |
//! | `range_negative` | `NUM, NUM` |
//! | `choice` | `a, b[, ...]` |
//!
//! Every other type ignores its range text.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use thiserror::Error;

use crate::types::DataType;

/// Largest magnitude accepted for integer bounds (exactly representable in f64).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parsed, validated range of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeSpec {
    Date { start: NaiveDate, end: NaiveDate },
    Time { start: NaiveTime, end: NaiveTime },
    Float { low: f64, high: f64 },
    /// Inclusive whole-number bounds.
    Integer { low: i64, high: i64 },
    Choice { values: Vec<String> },
    Boolean,
    Name,
    Phone,
    Email,
    Random,
    /// Values are copied from the imported dataset.
    Passthrough,
}

impl RangeSpec {
    /// Type identifier of the generator family this spec feeds.
    pub fn kind(&self) -> &'static str {
        match self {
            RangeSpec::Date { .. } => "date",
            RangeSpec::Time { .. } => "time",
            RangeSpec::Float { .. } => "float",
            RangeSpec::Integer { .. } => "integer",
            RangeSpec::Choice { .. } => "choice",
            RangeSpec::Boolean => "boolean",
            RangeSpec::Name => "name",
            RangeSpec::Phone => "phone",
            RangeSpec::Email => "email",
            RangeSpec::Random => "random",
            RangeSpec::Passthrough => "passthrough",
        }
    }
}

/// Failure to parse a range text, before it is attached to a column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("{0}")]
    Format(String),
    #[error("{0}")]
    Semantic(String),
}

/// Parse `text` according to the grammar of `data_type`.
pub fn parse_range(data_type: DataType, text: &str) -> Result<RangeSpec, RangeError> {
    let text = text.trim();
    if data_type.requires_range() && text.is_empty() {
        return Err(RangeError::Format(format!(
            "range must not be empty for {data_type} (expected {})",
            data_type.range_hint().unwrap_or("a range")
        )));
    }

    match data_type {
        DataType::Date => parse_date_range(text),
        DataType::Time => parse_time_range(text),
        DataType::FloatRange => {
            let (low, high) = parse_numeric_pair(text, '-', data_type)?;
            if !(high - low).is_finite() {
                return Err(RangeError::Semantic(format!(
                    "range {low}..{high} is too wide"
                )));
            }
            Ok(RangeSpec::Float { low, high })
        }
        DataType::IntegerRange | DataType::RangeNegative => {
            let separator = if data_type == DataType::RangeNegative {
                ','
            } else {
                '-'
            };
            let (low, high) = parse_numeric_pair(text, separator, data_type)?;
            let (low, high) = snap_to_integers(low, high)?;
            Ok(RangeSpec::Integer { low, high })
        }
        DataType::Choice => parse_choice(text),
        DataType::Boolean => Ok(RangeSpec::Boolean),
        DataType::Name => Ok(RangeSpec::Name),
        DataType::Phone => Ok(RangeSpec::Phone),
        DataType::Email => Ok(RangeSpec::Email),
        DataType::Random => Ok(RangeSpec::Random),
        DataType::FromLoadCsv => Ok(RangeSpec::Passthrough),
    }
}

/// Split `text` into two bounds around `separator`.
///
/// For `-` the separator is the first dash that follows a digit or a dot, so
/// a leading sign or an exponent sign stays attached to its number.
pub fn split_interval(text: &str, separator: char) -> Option<(&str, &str)> {
    let position = if separator == '-' {
        let mut previous: Option<char> = None;
        text.char_indices().find_map(|(idx, ch)| {
            let found = ch == '-' && previous.is_some_and(|prev| prev.is_ascii_digit() || prev == '.');
            if !ch.is_whitespace() {
                previous = Some(ch);
            }
            found.then_some(idx)
        })?
    } else {
        text.find(separator)?
    };
    let (left, right) = text.split_at(position);
    Some((left.trim(), right[separator.len_utf8()..].trim()))
}

fn parse_date_range(text: &str) -> Result<RangeSpec, RangeError> {
    let captures = date_regex().captures(text).ok_or_else(|| {
        RangeError::Format(format!("'{text}' does not match DD.MM.YYYY-DD.MM.YYYY"))
    })?;
    let start = calendar_date(&captures[1], &captures[2], &captures[3])?;
    let end = calendar_date(&captures[4], &captures[5], &captures[6])?;
    if start >= end {
        return Err(RangeError::Semantic(format!(
            "start date {} must be before end date {}",
            &text[..10],
            &text[11..]
        )));
    }
    Ok(RangeSpec::Date { start, end })
}

fn calendar_date(day: &str, month: &str, year: &str) -> Result<NaiveDate, RangeError> {
    let parsed = (day.parse::<u32>(), month.parse::<u32>(), year.parse::<i32>());
    if let (Ok(day), Ok(month), Ok(year)) = parsed
        && let Some(date) = NaiveDate::from_ymd_opt(year, month, day)
    {
        return Ok(date);
    }
    Err(RangeError::Format(format!(
        "{day}.{month}.{year} is not a calendar date"
    )))
}

fn parse_time_range(text: &str) -> Result<RangeSpec, RangeError> {
    let captures = time_regex()
        .captures(text)
        .ok_or_else(|| RangeError::Format(format!("'{text}' does not match HH:MM:SS-HH:MM:SS")))?;
    let start = time_of_day(&captures[1], &captures[2], &captures[3])?;
    let end = time_of_day(&captures[4], &captures[5], &captures[6])?;
    if start.num_seconds_from_midnight() >= end.num_seconds_from_midnight() {
        return Err(RangeError::Semantic(format!(
            "start time {} must be before end time {}",
            start.format("%H:%M:%S"),
            end.format("%H:%M:%S")
        )));
    }
    Ok(RangeSpec::Time { start, end })
}

fn time_of_day(hours: &str, minutes: &str, seconds: &str) -> Result<NaiveTime, RangeError> {
    let parsed = (hours.parse::<u32>(), minutes.parse::<u32>(), seconds.parse::<u32>());
    if let (Ok(h), Ok(m), Ok(s)) = parsed
        && let Some(time) = NaiveTime::from_hms_opt(h, m, s)
    {
        return Ok(time);
    }
    Err(RangeError::Format(format!(
        "{hours}:{minutes}:{seconds} is not a time of day"
    )))
}

fn parse_numeric_pair(
    text: &str,
    separator: char,
    data_type: DataType,
) -> Result<(f64, f64), RangeError> {
    let hint = data_type.range_hint().unwrap_or("NUM-NUM");
    let (left, right) = split_interval(text, separator)
        .ok_or_else(|| RangeError::Format(format!("'{text}' does not match {hint}")))?;
    let low = parse_number(left, hint)?;
    let high = parse_number(right, hint)?;
    if low >= high {
        return Err(RangeError::Semantic(format!(
            "start {low} must be less than end {high}"
        )));
    }
    Ok((low, high))
}

fn parse_number(value: &str, hint: &str) -> Result<f64, RangeError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| RangeError::Format(format!("'{value}' is not a number (expected {hint})")))
}

fn snap_to_integers(low: f64, high: f64) -> Result<(i64, i64), RangeError> {
    let low = low.ceil();
    let high = high.floor();
    if low.abs() > MAX_SAFE_INTEGER || high.abs() > MAX_SAFE_INTEGER {
        return Err(RangeError::Semantic(format!(
            "integer bounds must be within ±{MAX_SAFE_INTEGER}"
        )));
    }
    if low > high {
        return Err(RangeError::Semantic(
            "range contains no whole number".to_string(),
        ));
    }
    Ok((low as i64, high as i64))
}

fn parse_choice(text: &str) -> Result<RangeSpec, RangeError> {
    let values: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    if values.len() < 2 {
        return Err(RangeError::Semantic(format!(
            "choice needs at least two values, got {}",
            values.len()
        )));
    }
    Ok(RangeSpec::Choice { values })
}

fn date_regex() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    DATE.get_or_init(|| {
        Regex::new(r"^(\d{2})\.(\d{2})\.(\d{4})-(\d{2})\.(\d{2})\.(\d{4})$")
            .expect("date range regex is valid")
    })
}

fn time_regex() -> &'static Regex {
    static TIME: OnceLock<Regex> = OnceLock::new();
    TIME.get_or_init(|| {
        Regex::new(r"^(\d{2}):(\d{2}):(\d{2})-(\d{2}):(\d{2}):(\d{2})$")
            .expect("time range regex is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_dash_after_digit() {
        assert_eq!(split_interval("1.5-3", '-'), Some(("1.5", "3")));
        assert_eq!(split_interval("-5-10", '-'), Some(("-5", "10")));
        assert_eq!(split_interval("1e-3-2", '-'), Some(("1e-3", "2")));
        assert_eq!(split_interval("-5, 7", ','), Some(("-5", "7")));
        assert_eq!(split_interval("abc", '-'), None);
    }

    #[test]
    fn integer_bounds_snap_inward() {
        let spec = parse_range(DataType::IntegerRange, "1.5-4.5").expect("range");
        assert_eq!(spec, RangeSpec::Integer { low: 2, high: 4 });

        let err = parse_range(DataType::IntegerRange, "1.2-1.8").expect_err("no integer");
        assert!(matches!(err, RangeError::Semantic(_)));
    }

    #[test]
    fn time_fields_are_bounded() {
        let err = parse_range(DataType::Time, "10:61:00-11:00:00").expect_err("bad minutes");
        assert!(matches!(err, RangeError::Format(_)));
    }

    #[test]
    fn nullary_types_ignore_text() {
        assert_eq!(parse_range(DataType::Phone, "whatever"), Ok(RangeSpec::Phone));
        assert_eq!(parse_range(DataType::FromLoadCsv, ""), Ok(RangeSpec::Passthrough));
    }
}
