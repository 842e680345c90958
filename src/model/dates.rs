// File: ./src/model/dates.rs
// Calendar helpers for the ISO dates used throughout todo.txt lines.
use chrono::{Days, Months, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Day,
    Week,
    Month,
    Year,
}

impl Interval {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'd' => Some(Interval::Day),
            'w' => Some(Interval::Week),
            'm' => Some(Interval::Month),
            'y' => Some(Interval::Year),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Interval::Day => 'd',
            Interval::Week => 'w',
            Interval::Month => 'm',
            Interval::Year => 'y',
        }
    }
}

/// True for `dddd-dd-dd`, regardless of whether the numbers form a real date.
pub fn is_date_shaped(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

/// Parses a date-shaped string, rejecting impossible calendar dates such as
/// `2013-11-31`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !is_date_shaped(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Adds `amount` units to `date`. Months and years clamp to the last day of
/// the target month when the day would overflow.
pub fn add_interval(date: NaiveDate, amount: u32, unit: Interval) -> Option<NaiveDate> {
    match unit {
        Interval::Day => date.checked_add_days(Days::new(amount as u64)),
        Interval::Week => date.checked_add_days(Days::new(amount as u64 * 7)),
        Interval::Month => date.checked_add_months(Months::new(amount)),
        Interval::Year => date.checked_add_months(Months::new(amount.checked_mul(12)?)),
    }
}
