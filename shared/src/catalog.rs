//! CourseUP catalog API client.
//!
//! Section data comes from the CourseUP proxy of the university timetable:
//! `GET {base}/api/sections/{term}?subject=SENG&code=265&v9=true`.

use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Course;

/// An academic term, formatted `YYYYMM` with MM one of 01 (spring),
/// 05 (summer) or 09 (fall).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term(String);

impl Term {
    /// Parse and validate a configured term string.
    pub fn parse(term: &str) -> Result<Self> {
        let valid = term.len() == 6
            && term.chars().all(|c| c.is_ascii_digit())
            && matches!(&term[4..], "01" | "05" | "09");
        if !valid {
            return Err(Error::Config(format!(
                "invalid term {term:?}: expected YYYYMM with MM one of 01, 05, 09"
            )));
        }
        Ok(Self(term.to_string()))
    }

    /// The term containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        let month = match date.month() {
            1..=4 => 1,
            5..=8 => 5,
            _ => 9,
        };
        Self(format!("{}{:02}", date.year(), month))
    }

    /// The term containing today.
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One meeting time entry as published by the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMeetingTime {
    /// Day codes, e.g. `"MWR"`
    pub days: String,
    /// Time range, e.g. `"1:00 pm - 2:20 pm"`, or the literal `"TBA"`
    pub time: String,
}

/// One section as published by the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    /// e.g. `"A01"`
    pub section_code: String,
    /// Registration number
    pub crn: String,
    #[serde(default)]
    pub meeting_times: Vec<RawMeetingTime>,
}

/// Client for the CourseUP sections endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    term: Term,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, term: Term) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            term,
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Fetch every published section of a course for this client's term.
    pub async fn fetch_sections(&self, course: &Course) -> Result<Vec<RawSection>> {
        let url = format!("{}/api/sections/{}", self.base_url, self.term);
        debug!(course = %course, term = %self.term, "fetching sections");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("subject", course.subject.as_str()),
                ("code", course.code.as_str()),
                ("v9", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Catalog(format!(
                "sections request for {course} returned {status}"
            )));
        }

        Ok(response.json().await?)
    }
}
