//! Page renderers. View models are built from a borrowed `SessionState` and
//! rendered through askama templates under `templates/`.

use askama::Template;

use crate::jobs::{EmploymentType, JobPosting, RemoteFilter};
use crate::session::actions::TAILORING_FAILED_MESSAGE;
use crate::session::state::{DEFAULT_QUERY, SALARY_CEILING, SALARY_FLOOR, SALARY_STEP};
use crate::session::{Page, SessionState};

/// One radio button.
pub struct Choice {
    pub value: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchPage<'a> {
    pub query: &'a str,
    pub employment_types: Vec<Choice>,
    pub remote_filters: Vec<Choice>,
    pub salary_min: u32,
    pub salary_max: u32,
    pub salary_floor: u32,
    pub salary_ceiling: u32,
    pub salary_step: u32,
    pub error: Option<&'a str>,
    pub suggestions: Option<&'a str>,
}

/// Radio selections echoed back after a failed search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub employment_type: EmploymentType,
    pub remote: RemoteFilter,
}

impl<'a> SearchPage<'a> {
    pub fn new(session: &'a SessionState, selection: Selection, error: Option<&'a str>) -> Self {
        let query = if session.search_query.is_empty() {
            DEFAULT_QUERY
        } else {
            session.search_query.as_str()
        };
        Self {
            query,
            employment_types: EmploymentType::ALL
                .iter()
                .map(|t| Choice {
                    value: t.label(),
                    selected: *t == selection.employment_type,
                })
                .collect(),
            remote_filters: RemoteFilter::ALL
                .iter()
                .map(|r| Choice {
                    value: r.label(),
                    selected: *r == selection.remote,
                })
                .collect(),
            salary_min: session.salary_range.min(),
            salary_max: session.salary_range.max(),
            salary_floor: SALARY_FLOOR,
            salary_ceiling: SALARY_CEILING,
            salary_step: SALARY_STEP,
            error,
            suggestions: session.title_suggestions.as_deref(),
        }
    }
}

pub struct JobCard<'a> {
    pub index: usize,
    pub title: &'a str,
    pub employer: &'a str,
    pub location: &'a str,
    pub employment_type: &'a str,
    pub posted: &'a str,
    pub apply_link: &'a str,
    pub description: &'a str,
    pub has_resume: bool,
    pub advice: Option<&'a str>,
    pub advice_error: Option<&'static str>,
    pub cover_letter_url: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage<'a> {
    pub cards: Vec<JobCard<'a>>,
}

impl<'a> ResultsPage<'a> {
    pub fn new(session: &'a SessionState, profile_url: &'a str) -> Self {
        let cards = session
            .jobs()
            .iter()
            .enumerate()
            .map(|(index, job)| job_card(session, index, job, profile_url))
            .collect();
        Self { cards }
    }
}

fn job_card<'a>(
    session: &'a SessionState,
    index: usize,
    job: &'a JobPosting,
    profile_url: &'a str,
) -> JobCard<'a> {
    JobCard {
        index,
        title: job.title(),
        employer: job.employer(),
        location: job.location(),
        employment_type: job.employment_type(),
        posted: job.posted_at(),
        apply_link: safe_link(job.apply_link()),
        description: job.description(),
        has_resume: session.resume(index).is_some(),
        advice: session.advice(index),
        advice_error: session
            .tailoring_failed(index)
            .then_some(TAILORING_FAILED_MESSAGE),
        cover_letter_url: session
            .cover_letter_requested(index)
            .then_some(profile_url),
    }
}

/// Only http(s) links are rendered as-is; anything else becomes "#".
fn safe_link(link: &str) -> &str {
    if link.starts_with("https://") || link.starts_with("http://") {
        link
    } else {
        "#"
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub status: u16,
    pub message: &'a str,
}

/// Renders whichever page the session is on.
pub fn render_current(
    session: &SessionState,
    profile_url: &str,
    selection: Selection,
    error: Option<&str>,
) -> Result<String, askama::Error> {
    match session.page() {
        Page::Search => SearchPage::new(session, selection, error).render(),
        Page::Results => ResultsPage::new(session, profile_url).render(),
    }
}
