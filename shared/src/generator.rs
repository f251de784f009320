//! Schedule generation engine.
//!
//! Raw catalog sections are filtered against the caller's time bounds,
//! deduplicated into groups of interchangeable sections, and arranged into
//! pools of one group per (course, kind). The generator then walks the
//! cartesian product of the pools and keeps every combination whose meeting
//! times do not collide.

use tracing::debug;

use crate::catalog::RawSection;
use crate::error::Result;
use crate::models::{SectionGroup, SectionKind};
use crate::timetable::{has_conflict, parse_days, parse_time_range, MeetingTime};

/// Daily window a section must fit inside to be considered.
#[derive(Debug, Clone, Copy)]
pub struct TimeBounds {
    pub earliest_start_hour: u8,
    pub latest_end_hour: u8,
}

impl Default for TimeBounds {
    fn default() -> Self {
        Self {
            earliest_start_hour: 7,
            latest_end_hour: 23,
        }
    }
}

/// A section reduced to what scheduling needs.
#[derive(Debug, Clone)]
pub struct ProcessedSection {
    pub kind: SectionKind,
    pub crn: String,
    pub section_code: String,
    pub meeting_times: Vec<MeetingTime>,
}

/// Convert a raw catalog section into its meeting times.
///
/// `TBA` meetings carry no schedule and are skipped. Returns `Ok(None)`
/// when the section is of a kind we do not schedule, or when any meeting
/// falls outside the time bounds (the whole section is then unusable).
pub fn process_section(raw: &RawSection, bounds: &TimeBounds) -> Result<Option<ProcessedSection>> {
    let Some(kind) = SectionKind::from_section_code(&raw.section_code) else {
        debug!(section = %raw.section_code, "skipping section of unscheduled kind");
        return Ok(None);
    };

    let mut meeting_times = Vec::new();
    for meeting in &raw.meeting_times {
        if meeting.time == "TBA" {
            continue;
        }

        let (start, end) = parse_time_range(&meeting.time)?;
        if start.hour < bounds.earliest_start_hour || end.hour > bounds.latest_end_hour {
            debug!(
                section = %raw.section_code,
                time = %meeting.time,
                "section falls outside time bounds"
            );
            return Ok(None);
        }

        meeting_times.push(MeetingTime {
            days: parse_days(&meeting.days)?,
            start,
            end,
        });
    }

    Ok(Some(ProcessedSection {
        kind,
        crn: raw.crn.clone(),
        section_code: raw.section_code.clone(),
        meeting_times,
    }))
}

/// Group a course's sections into pools, one per kind with at least one
/// surviving group.
///
/// Sections of the same kind with identical meeting times are
/// interchangeable and merge into a single [`SectionGroup`] accumulating
/// all of their CRNs and section codes.
pub fn group_sections(
    course: &str,
    raws: &[RawSection],
    bounds: &TimeBounds,
) -> Result<Vec<Vec<SectionGroup>>> {
    let mut by_kind: [Vec<SectionGroup>; 3] = [Vec::new(), Vec::new(), Vec::new()];

    for raw in raws {
        let Some(section) = process_section(raw, bounds)? else {
            continue;
        };

        let pool = &mut by_kind[match section.kind {
            SectionKind::Lecture => 0,
            SectionKind::Lab => 1,
            SectionKind::Tutorial => 2,
        }];

        if let Some(group) = pool
            .iter_mut()
            .find(|g| g.meeting_times == section.meeting_times)
        {
            group.crns.push(section.crn);
            group.section_codes.push(section.section_code);
        } else {
            pool.push(SectionGroup {
                course: course.to_string(),
                kind: section.kind,
                crns: vec![section.crn],
                section_codes: vec![section.section_code],
                meeting_times: section.meeting_times,
            });
        }
    }

    Ok(by_kind.into_iter().filter(|pool| !pool.is_empty()).collect())
}

/// Caps on how much work one request may do.
#[derive(Debug, Clone, Copy)]
pub struct EnumerationLimits {
    pub max_schedules: usize,
    pub max_combinations: u64,
}

/// Outcome of walking the section pools.
#[derive(Debug)]
pub struct Enumeration {
    /// Conflict-free combinations, one section group per pool
    pub schedules: Vec<Vec<SectionGroup>>,
    pub combinations_checked: u64,
    pub combinations_total: u64,
    /// True when a limit stopped enumeration before the full product
    pub truncated: bool,
}

fn advance(indexes: &mut [usize], pools: &[Vec<SectionGroup>]) -> bool {
    for i in (0..indexes.len()).rev() {
        indexes[i] += 1;
        if indexes[i] < pools[i].len() {
            return true;
        }
        indexes[i] = 0;
    }
    false
}

/// Enumerate the cartesian product of the pools, keeping combinations
/// whose meeting times do not conflict, until done or a limit is hit.
pub fn find_conflict_free(pools: &[Vec<SectionGroup>], limits: &EnumerationLimits) -> Enumeration {
    let combinations_total: u64 = pools.iter().map(|p| p.len() as u64).product();

    let mut result = Enumeration {
        schedules: Vec::new(),
        combinations_checked: 0,
        combinations_total,
        truncated: false,
    };

    if pools.is_empty() {
        result.combinations_total = 0;
        return result;
    }

    // a pool with no choices means no complete schedule exists
    if combinations_total == 0 {
        return result;
    }

    let mut indexes = vec![0usize; pools.len()];
    loop {
        if result.combinations_checked == limits.max_combinations
            || result.schedules.len() == limits.max_schedules
        {
            result.truncated = result.combinations_checked < combinations_total;
            break;
        }

        let candidate: Vec<&SectionGroup> = indexes
            .iter()
            .enumerate()
            .map(|(pool, &choice)| &pools[pool][choice])
            .collect();
        let meetings: Vec<MeetingTime> = candidate
            .iter()
            .flat_map(|g| g.meeting_times.iter().cloned())
            .collect();

        result.combinations_checked += 1;
        if !has_conflict(&meetings) {
            result
                .schedules
                .push(candidate.into_iter().cloned().collect());
        }

        if !advance(&mut indexes, pools) {
            break;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawMeetingTime;

    fn raw(code: &str, crn: &str, meetings: &[(&str, &str)]) -> RawSection {
        RawSection {
            section_code: code.to_string(),
            crn: crn.to_string(),
            meeting_times: meetings
                .iter()
                .map(|(days, time)| RawMeetingTime {
                    days: days.to_string(),
                    time: time.to_string(),
                })
                .collect(),
        }
    }

    fn no_limits() -> EnumerationLimits {
        EnumerationLimits {
            max_schedules: usize::MAX,
            max_combinations: u64::MAX,
        }
    }

    #[test]
    fn test_process_section_skips_tba() {
        let section = raw(
            "A01",
            "10001",
            &[("MWR", "1:00 pm - 2:20 pm"), ("", "TBA")],
        );
        let processed = process_section(&section, &TimeBounds::default())
            .unwrap()
            .unwrap();
        assert_eq!(processed.kind, SectionKind::Lecture);
        assert_eq!(processed.meeting_times.len(), 1);
    }

    #[test]
    fn test_process_section_rejects_out_of_bounds() {
        let bounds = TimeBounds {
            earliest_start_hour: 9,
            latest_end_hour: 17,
        };
        let early = raw("A01", "10001", &[("MW", "8:30 am - 9:20 am")]);
        let late = raw("A02", "10002", &[("MW", "5:30 pm - 6:20 pm")]);
        let fits = raw("A03", "10003", &[("MW", "9:30 am - 10:20 am")]);
        assert!(process_section(&early, &bounds).unwrap().is_none());
        assert!(process_section(&late, &bounds).unwrap().is_none());
        assert!(process_section(&fits, &bounds).unwrap().is_some());
    }

    #[test]
    fn test_process_section_unscheduled_kind() {
        let section = raw("X01", "10001", &[("MW", "9:30 am - 10:20 am")]);
        assert!(process_section(&section, &TimeBounds::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_process_section_bad_time_is_error() {
        let section = raw("A01", "10001", &[("MW", "whenever")]);
        assert!(process_section(&section, &TimeBounds::default()).is_err());
    }

    #[test]
    fn test_group_sections_merges_identical_times() {
        let sections = [
            raw("A01", "10001", &[("MWR", "1:00 pm - 2:20 pm")]),
            raw("A02", "10002", &[("MWR", "1:00 pm - 2:20 pm")]),
            raw("A03", "10003", &[("TR", "9:30 am - 10:50 am")]),
            raw("B01", "20001", &[("F", "2:30 pm - 3:20 pm")]),
        ];
        let pools = group_sections("SENG265", &sections, &TimeBounds::default()).unwrap();

        assert_eq!(pools.len(), 2); // lectures and labs
        let lectures = &pools[0];
        assert_eq!(lectures.len(), 2);
        assert_eq!(lectures[0].crns, vec!["10001", "10002"]);
        assert_eq!(lectures[0].section_codes, vec!["A01", "A02"]);
        assert_eq!(lectures[1].crns, vec!["10003"]);
        assert_eq!(pools[1][0].kind, SectionKind::Lab);
    }

    #[test]
    fn test_group_sections_drops_empty_kinds() {
        let sections = [raw("A01", "10001", &[("MWR", "1:00 pm - 2:20 pm")])];
        let pools = group_sections("MATH100", &sections, &TimeBounds::default()).unwrap();
        assert_eq!(pools.len(), 1);
        assert!(group_sections("MATH100", &[], &TimeBounds::default())
            .unwrap()
            .is_empty());
    }

    fn pools_from(courses: &[(&str, &[RawSection])]) -> Vec<Vec<SectionGroup>> {
        let mut pools = Vec::new();
        for (name, sections) in courses {
            pools.extend(group_sections(name, sections, &TimeBounds::default()).unwrap());
        }
        pools
    }

    #[test]
    fn test_find_conflict_free_filters_collisions() {
        let a = [
            raw("A01", "10001", &[("MW", "9:30 am - 10:20 am")]),
            raw("A02", "10002", &[("MW", "1:00 pm - 2:20 pm")]),
        ];
        let b = [raw("A01", "20001", &[("MW", "9:30 am - 10:20 am")])];
        let pools = pools_from(&[("CSC111", &a), ("MATH100", &b)]);

        let result = find_conflict_free(&pools, &no_limits());
        assert_eq!(result.combinations_total, 2);
        assert_eq!(result.combinations_checked, 2);
        assert!(!result.truncated);
        // only the 1:00 pm CSC111 lecture avoids the MATH100 slot
        assert_eq!(result.schedules.len(), 1);
        assert_eq!(result.schedules[0][0].crns, vec!["10002"]);
    }

    #[test]
    fn test_find_conflict_free_visits_full_product() {
        let a = [
            raw("A01", "10001", &[("M", "8:30 am - 9:20 am")]),
            raw("A02", "10002", &[("M", "9:30 am - 10:20 am")]),
            raw("A03", "10003", &[("M", "10:30 am - 11:20 am")]),
        ];
        let b = [
            raw("A01", "20001", &[("T", "8:30 am - 9:20 am")]),
            raw("A02", "20002", &[("T", "9:30 am - 10:20 am")]),
        ];
        let pools = pools_from(&[("CSC111", &a), ("MATH100", &b)]);

        let result = find_conflict_free(&pools, &no_limits());
        assert_eq!(result.combinations_total, 6);
        assert_eq!(result.combinations_checked, 6);
        // disjoint days, so every combination survives
        assert_eq!(result.schedules.len(), 6);
    }

    #[test]
    fn test_find_conflict_free_honors_caps() {
        let a = [
            raw("A01", "10001", &[("M", "8:30 am - 9:20 am")]),
            raw("A02", "10002", &[("M", "9:30 am - 10:20 am")]),
        ];
        let b = [
            raw("A01", "20001", &[("T", "8:30 am - 9:20 am")]),
            raw("A02", "20002", &[("T", "9:30 am - 10:20 am")]),
        ];
        let pools = pools_from(&[("CSC111", &a), ("MATH100", &b)]);

        let capped = find_conflict_free(
            &pools,
            &EnumerationLimits {
                max_schedules: 2,
                max_combinations: u64::MAX,
            },
        );
        assert_eq!(capped.schedules.len(), 2);
        assert!(capped.truncated);

        let capped = find_conflict_free(
            &pools,
            &EnumerationLimits {
                max_schedules: usize::MAX,
                max_combinations: 3,
            },
        );
        assert_eq!(capped.combinations_checked, 3);
        assert!(capped.truncated);
    }

    #[test]
    fn test_find_conflict_free_empty_pool_means_no_schedules() {
        let a = [raw("A01", "10001", &[("M", "8:30 am - 9:20 am")])];
        let mut pools = pools_from(&[("CSC111", &a)]);
        pools.push(Vec::new());

        let result = find_conflict_free(&pools, &no_limits());
        assert!(result.schedules.is_empty());
        assert_eq!(result.combinations_total, 0);
        assert_eq!(result.combinations_checked, 0);
        assert!(!result.truncated);
    }

    #[test]
    fn test_find_conflict_free_no_pools() {
        let result = find_conflict_free(&[], &no_limits());
        assert!(result.schedules.is_empty());
        assert_eq!(result.combinations_total, 0);
        assert!(!result.truncated);
    }
}
