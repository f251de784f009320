//! Schedule Finder Lambda - generates conflict-free course schedules.
//!
//! For one request this Lambda:
//! 1. Parses the requested course names
//! 2. Fetches each course's sections from the CourseUP catalog
//! 3. Groups interchangeable sections into one pool per (course, kind)
//! 4. Enumerates section combinations and returns the conflict-free ones

use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use shared::{
    find_conflict_free, group_sections, CatalogClient, Config, Course, EnumerationLimits,
    SectionGroup, Term, TimeBounds,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct FinderRequest {
    /// Compact course names, e.g. `["SENG265", "MATH122"]`
    courses: Vec<String>,
    earliest_start_hour: Option<u8>,
    latest_end_hour: Option<u8>,
    max_schedules: Option<usize>,
}

#[derive(Debug, Serialize)]
struct FinderResponse {
    schedules: Vec<Vec<SectionGroup>>,
    schedules_found: usize,
    combinations_checked: u64,
    combinations_total: u64,
    truncated: bool,
    /// Requested courses that produced no usable sections
    courses_without_sections: Vec<String>,
}

struct AppState {
    config: Config,
    catalog: CatalogClient,
}

impl AppState {
    fn new() -> shared::Result<Self> {
        let config = Config::from_env();
        let term = match &config.term {
            Some(term) => Term::parse(term)?,
            None => Term::current(),
        };
        let catalog = CatalogClient::new(config.catalog_base_url.clone(), term);
        Ok(Self { config, catalog })
    }
}

async fn handler(
    state: Arc<AppState>,
    event: LambdaEvent<FinderRequest>,
) -> Result<FinderResponse, Error> {
    let request = event.payload;

    if request.courses.is_empty() {
        return Err(shared::Error::Validation("no courses requested".to_string()).into());
    }

    let courses = request
        .courses
        .iter()
        .map(|name| name.parse::<Course>())
        .collect::<shared::Result<Vec<_>>>()?;

    let bounds = TimeBounds {
        earliest_start_hour: request
            .earliest_start_hour
            .unwrap_or(state.config.earliest_start_hour),
        latest_end_hour: request
            .latest_end_hour
            .unwrap_or(state.config.latest_end_hour),
    };

    info!(courses = ?request.courses, term = %state.catalog.term(), "generating schedules");

    let mut pools = Vec::new();
    let mut courses_without_sections = Vec::new();
    for course in &courses {
        let sections = state.catalog.fetch_sections(course).await?;
        let course_pools = group_sections(&course.name(), &sections, &bounds)?;
        if course_pools.is_empty() {
            warn!(course = %course, "no usable sections");
            courses_without_sections.push(course.name());
        }
        pools.extend(course_pools);
    }

    let limits = EnumerationLimits {
        // callers may lower the schedule cap but never raise it
        max_schedules: request
            .max_schedules
            .unwrap_or(state.config.max_schedules)
            .min(state.config.max_schedules),
        max_combinations: state.config.max_combinations,
    };

    let result = find_conflict_free(&pools, &limits);

    info!(
        schedules_found = result.schedules.len(),
        combinations_checked = result.combinations_checked,
        combinations_total = result.combinations_total,
        truncated = result.truncated,
        "schedule generation complete"
    );

    Ok(FinderResponse {
        schedules_found: result.schedules.len(),
        combinations_checked: result.combinations_checked,
        combinations_total: result.combinations_total,
        truncated: result.truncated,
        schedules: result.schedules,
        courses_without_sections,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new()?);
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}
