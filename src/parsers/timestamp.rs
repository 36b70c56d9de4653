//! Parser for the export's human-readable timestamps, e.g.
//! `Jan 11, 2015, 11:21:12 PM EDT`.
//!
//! The zone abbreviation is kept as text and never applied as an offset.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::parsers::FormatError;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// 0-23
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub zone: String,
}

/// Bucket size for [`TimeStamp::truncate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Day,
    Month,
    Year,
}

impl TimeStamp {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        self.date()?.and_hms_opt(self.hour, self.minute, self.second)
    }

    pub fn truncate(&self, interval: Interval) -> Option<NaiveDate> {
        match interval {
            Interval::Day => self.date(),
            Interval::Month => NaiveDate::from_ymd_opt(self.year, self.month, 1),
            Interval::Year => NaiveDate::from_ymd_opt(self.year, 1, 1),
        }
    }

    /// Monday = 0 .. Sunday = 6.
    pub fn weekday(&self) -> Option<u32> {
        self.date().map(|d| d.weekday().num_days_from_monday())
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if !self.zone.is_empty() {
            write!(f, " {}", self.zone)?;
        }
        Ok(())
    }
}

impl FromStr for TimeStamp {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timestamp(s)
    }
}

pub fn parse_timestamp(text: &str) -> Result<TimeStamp, FormatError> {
    let text = text.trim();
    let pattern = || FormatError::Pattern(text.to_string());

    let mut segments = text.splitn(3, ',');
    let (month_day, year, clock) = match (segments.next(), segments.next(), segments.next()) {
        (Some(md), Some(y), Some(c)) => (md, y, c),
        _ => return Err(pattern()),
    };

    let mut month_day = month_day.split_whitespace();
    let month_name = month_day.next().ok_or_else(pattern)?;
    let month = month_number(month_name)
        .ok_or_else(|| FormatError::UnknownMonth(month_name.to_string()))?;
    let day: u32 = parse_field("day", month_day.next().ok_or_else(pattern)?)?;
    if month_day.next().is_some() {
        return Err(pattern());
    }
    let year: i32 = parse_field("year", year.trim())?;

    let mut clock = clock.split(':');
    let (hour, minute, tail) = match (clock.next(), clock.next(), clock.next(), clock.next()) {
        (Some(h), Some(m), Some(t), None) => (h, m, t),
        _ => return Err(pattern()),
    };
    let hour: u32 = parse_field("hour", hour.trim())?;
    let minute: u32 = parse_field("minute", minute.trim())?;

    // tail is "SS [AM|PM] [ZONE...]"; newer exports put U+202F before the meridiem
    let mut tail = tail.split_whitespace();
    let second: u32 = parse_field("second", tail.next().ok_or_else(pattern)?)?;
    let rest: Vec<&str> = tail.collect();
    let (meridiem, zone) = match rest.split_first() {
        Some((first, zone)) if Meridiem::parse(first).is_some() => {
            (Meridiem::parse(first), zone.join(" "))
        }
        _ => (None, rest.join(" ")),
    };

    let hour = adjust_hour(hour, meridiem);
    check_range("hour", hour, 23)?;
    check_range("minute", minute, 59)?;
    check_range("second", second, 59)?;
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(FormatError::InvalidDate { year, month, day });
    }

    Ok(TimeStamp {
        year,
        month,
        day,
        hour,
        minute,
        second,
        zone,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn parse(s: &str) -> Option<Self> {
        match s.get(..2)? {
            m if m.eq_ignore_ascii_case("AM") => Some(Self::Am),
            m if m.eq_ignore_ascii_case("PM") => Some(Self::Pm),
            _ => None,
        }
    }
}

fn adjust_hour(hour: u32, meridiem: Option<Meridiem>) -> u32 {
    match meridiem {
        Some(Meridiem::Pm) if hour < 12 => hour + 12,
        Some(Meridiem::Am) if hour == 12 => 0,
        _ => hour,
    }
}

/// Looks up the first three characters, so `Sept` and `March` also resolve.
fn month_number(name: &str) -> Option<u32> {
    let abbr = name.get(..3)?;
    MONTHS
        .iter()
        .position(|m| *m == abbr)
        .map(|i| i as u32 + 1)
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, FormatError> {
    value.parse().map_err(|_| FormatError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn check_range(field: &'static str, value: u32, max: u32) -> Result<(), FormatError> {
    if value > max {
        return Err(FormatError::OutOfRange { field, value });
    }
    Ok(())
}
