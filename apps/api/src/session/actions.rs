//! User actions applied to one session, with the external calls injected.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::{JobQuery, JobSearch, SearchCriteria};
use crate::resume::{extract_text, ResumeFile};
use crate::session::state::SessionState;
use crate::tailoring::{ResumeTailor, TitleSuggester};

pub const NO_JOBS_MESSAGE: &str = "No jobs found for your search.";
pub const SEARCH_FAILED_MESSAGE: &str = "Error fetching jobs. Please try again later.";
pub const TAILORING_FAILED_MESSAGE: &str =
    "Could not generate tailoring advice. Please try again later.";
pub const SUGGESTIONS_FAILED_MESSAGE: &str =
    "Could not suggest similar job titles. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(usize),
    NoJobs,
    Failed,
}

impl SearchOutcome {
    /// Message shown on the search page, if any.
    pub fn message(self) -> Option<&'static str> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::NoJobs => Some(NO_JOBS_MESSAGE),
            SearchOutcome::Failed => Some(SEARCH_FAILED_MESSAGE),
        }
    }
}

/// Runs a search. Only a non-empty result moves the session to Results.
pub async fn submit_search(
    session: &mut SessionState,
    search: &dyn JobSearch,
    criteria: SearchCriteria,
) -> SearchOutcome {
    session.search_query = criteria.query.clone();
    session.salary_range = criteria.salary_range;

    let query = JobQuery::from_criteria(&criteria);
    match search.search(&query).await {
        Ok(jobs) if jobs.is_empty() => {
            info!(query = %query.query, "Job search returned no results");
            SearchOutcome::NoJobs
        }
        Ok(jobs) => {
            let count = jobs.len();
            info!(query = %query.query, "Job search returned {count} results");
            session.show_results(jobs);
            SearchOutcome::Found(count)
        }
        Err(e) => {
            warn!(query = %query.query, "Job search failed: {e}");
            SearchOutcome::Failed
        }
    }
}

/// Extracts the resume for job `index` and immediately asks for tailoring advice.
///
/// Extraction errors reject the upload. A tailoring failure keeps the resume and
/// marks the job card instead.
pub async fn upload_resume(
    session: &mut SessionState,
    tailor: &dyn ResumeTailor,
    index: usize,
    file: ResumeFile,
) -> Result<(), AppError> {
    let description = session
        .job(index)
        .map(|job| job.description_for_tailoring().to_string())
        .ok_or_else(|| AppError::NotFound(format!("Job {index} not found")))?;

    let resume_text = extract_text(file).await?;
    session.record_resume(index, resume_text.clone());

    match tailor.tailor(&resume_text, &description).await {
        Ok(advice) => {
            info!(job = index, "Tailoring advice generated");
            session.record_advice(index, advice);
        }
        Err(e) => {
            warn!(job = index, "Tailoring failed: {e}");
            session.record_tailoring_failure(index);
        }
    }
    Ok(())
}

/// Reveals the cover-letter contact link on job `index`.
pub fn request_cover_letter(session: &mut SessionState, index: usize) -> Result<(), AppError> {
    if session.job(index).is_none() {
        return Err(AppError::NotFound(format!("Job {index} not found")));
    }
    session.request_cover_letter(index);
    Ok(())
}

/// Asks for similar job titles. Returns the message to show when the call fails.
pub async fn suggest_titles(
    session: &mut SessionState,
    suggester: &dyn TitleSuggester,
    query: &str,
) -> Option<&'static str> {
    session.search_query = query.to_string();
    match suggester.suggest_titles(query).await {
        Ok(text) => {
            session.title_suggestions = Some(text);
            None
        }
        Err(e) => {
            warn!("Title suggestion failed: {e}");
            session.title_suggestions = None;
            Some(SUGGESTIONS_FAILED_MESSAGE)
        }
    }
}
