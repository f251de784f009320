//! Shared library for the schedule generator Lambda functions.
//!
//! This crate provides the catalog client, timetable model, and schedule
//! enumeration engine used across the Lambda functions.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod timetable;

pub use catalog::{CatalogClient, RawMeetingTime, RawSection, Term};
pub use config::Config;
pub use error::{Error, Result};
pub use generator::{find_conflict_free, group_sections, Enumeration, EnumerationLimits, TimeBounds};
pub use models::{Course, SectionGroup, SectionKind};
pub use timetable::{has_conflict, ClockTime, MeetingTime, Weekday};
