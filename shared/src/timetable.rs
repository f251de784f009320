//! Meeting times and conflict detection.
//!
//! The catalog publishes meeting times as human-formatted strings like
//! `"1:00 pm - 2:20 pm"` with day codes `"MWR"`. This module parses those
//! into a comparable representation and decides whether a set of meetings
//! can coexist on one timetable.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A time of day in 24-hour clock, minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

/// Day of week using the university's single-letter codes
/// (R = Thursday, U = Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "M")]
    Monday,
    #[serde(rename = "T")]
    Tuesday,
    #[serde(rename = "W")]
    Wednesday,
    #[serde(rename = "R")]
    Thursday,
    #[serde(rename = "F")]
    Friday,
    #[serde(rename = "S")]
    Saturday,
    #[serde(rename = "U")]
    Sunday,
}

impl Weekday {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'R' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            'S' => Some(Weekday::Saturday),
            'U' => Some(Weekday::Sunday),
            _ => None,
        }
    }
}

/// Parse a day-code string like `"MWR"` into a set of weekdays.
///
/// Commas and whitespace are tolerated as separators; any other character
/// is a parse error.
pub fn parse_days(days: &str) -> Result<BTreeSet<Weekday>> {
    let mut set = BTreeSet::new();
    for c in days.chars() {
        if c == ',' || c.is_whitespace() {
            continue;
        }
        let day = Weekday::from_code(c)
            .ok_or_else(|| Error::Parse(format!("unknown day code {c:?} in {days:?}")))?;
        set.insert(day);
    }
    Ok(set)
}

/// One recurring meeting: a set of days plus a start and end time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTime {
    pub days: BTreeSet<Weekday>,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl MeetingTime {
    /// Whether two meetings collide: they share at least one day and their
    /// time ranges overlap. Touching boundaries count as overlap, so a
    /// class ending 1:20 pm conflicts with one starting 1:20 pm.
    pub fn conflicts_with(&self, other: &MeetingTime) -> bool {
        if self.days.is_disjoint(&other.days) {
            return false;
        }
        !(self.end < other.start) && !(self.start > other.end)
    }
}

/// Whether any pair of meetings in the slice collides.
pub fn has_conflict(meetings: &[MeetingTime]) -> bool {
    for (i, a) in meetings.iter().enumerate() {
        for b in &meetings[i + 1..] {
            if a.conflicts_with(b) {
                return true;
            }
        }
    }
    false
}

// groups: 1 = start hour, 2 = start minute, 3 = start am/pm,
//         4 = end hour, 5 = end minute, 6 = end am/pm
fn time_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,2}):(\d{2})\s([ap]m)\s-\s(\d{1,2}):(\d{2})\s([ap]m)")
            .expect("invalid time range regex")
    })
}

fn to_24_hour(hour: u8, suffix: &str) -> u8 {
    if suffix == "pm" && hour < 12 {
        hour + 12
    } else {
        hour
    }
}

/// Parse a catalog time range like `"9:30 am - 10:20 am"` into start and
/// end clock times.
pub fn parse_time_range(time: &str) -> Result<(ClockTime, ClockTime)> {
    let caps = time_range_regex()
        .captures(time)
        .ok_or_else(|| Error::Parse(format!("unrecognized time range {time:?}")))?;

    let field = |i: usize| -> u8 {
        // the regex only matches 1-2 digit groups, so parse cannot fail
        caps[i].parse().unwrap_or(0)
    };

    let start = ClockTime::new(to_24_hour(field(1), &caps[3]), field(2));
    let end = ClockTime::new(to_24_hour(field(4), &caps[6]), field(5));
    Ok((start, end))
}
