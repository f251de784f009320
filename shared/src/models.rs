//! Shared data models.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::timetable::MeetingTime;

/// A course requested by the caller, e.g. subject `SENG`, code `265`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub subject: String,
    pub code: String,
}

fn course_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-zA-Z]+)(\d+)$").expect("invalid course name regex"))
}

impl Course {
    /// The compact catalog name, e.g. `"SENG265"`.
    pub fn name(&self) -> String {
        format!("{}{}", self.subject, self.code)
    }
}

impl FromStr for Course {
    type Err = Error;

    /// Parse a compact course name like `"SENG265"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = course_name_regex()
            .captures(s)
            .ok_or_else(|| Error::Validation(format!("invalid course name {s:?}")))?;
        Ok(Self {
            subject: caps[1].to_string(),
            code: caps[2].to_string(),
        })
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.subject, self.code)
    }
}

/// Kind of section, keyed by the leading letter of the section code
/// (A01 = lecture, B02 = lab, T03 = tutorial).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Lecture,
    Lab,
    Tutorial,
}

impl SectionKind {
    /// Classify a section by its code; sections of other kinds are
    /// not scheduled and return `None`.
    pub fn from_section_code(code: &str) -> Option<Self> {
        match code.chars().next() {
            Some('A') => Some(SectionKind::Lecture),
            Some('B') => Some(SectionKind::Lab),
            Some('T') => Some(SectionKind::Tutorial),
            _ => None,
        }
    }
}

/// A group of interchangeable sections: same course, same kind, identical
/// meeting times. Registering in any CRN of the group yields the same
/// timetable, so the generator treats the group as one choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGroup {
    /// Compact course name, e.g. `"SENG265"`
    pub course: String,
    pub kind: SectionKind,
    /// Registration numbers of every section in the group
    pub crns: Vec<String>,
    /// Section codes of every section in the group, e.g. `["A01", "A02"]`
    pub section_codes: Vec<String>,
    pub meeting_times: Vec<MeetingTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_course_name() {
        let course: Course = "SENG265".parse().unwrap();
        assert_eq!(course.subject, "SENG");
        assert_eq!(course.code, "265");
        assert_eq!(course.name(), "SENG265");
    }

    #[test]
    fn test_parse_course_name_rejects_invalid() {
        assert!("".parse::<Course>().is_err());
        assert!("265".parse::<Course>().is_err());
        assert!("SENG".parse::<Course>().is_err());
        assert!("SENG 265".parse::<Course>().is_err());
        assert!("SENG265A".parse::<Course>().is_err());
    }

    #[test]
    fn test_section_kind_from_code() {
        assert_eq!(
            SectionKind::from_section_code("A01"),
            Some(SectionKind::Lecture)
        );
        assert_eq!(
            SectionKind::from_section_code("B05"),
            Some(SectionKind::Lab)
        );
        assert_eq!(
            SectionKind::from_section_code("T02"),
            Some(SectionKind::Tutorial)
        );
        assert_eq!(SectionKind::from_section_code("X01"), None);
        assert_eq!(SectionKind::from_section_code(""), None);
    }
}
