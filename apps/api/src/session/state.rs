use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::jobs::JobPosting;

pub const SALARY_FLOOR: u32 = 0;
pub const SALARY_CEILING: u32 = 300_000;
pub const SALARY_STEP: u32 = 10_000;
pub const DEFAULT_QUERY: &str = "Developer jobs in Chicago";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Search query cannot be empty")]
    EmptyQuery,

    #[error("Salary range must lie within 0..=300000, got {min}..={max}")]
    SalaryOutOfBounds { min: u32, max: u32 },

    #[error("Minimum salary {min} exceeds maximum salary {max}")]
    SalaryInverted { min: u32, max: u32 },
}

/// Salary slider value. Always `min <= max`, both within the slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    min: u32,
    max: u32,
}

impl SalaryRange {
    pub fn new(min: u32, max: u32) -> Result<Self, ValidationError> {
        if min > SALARY_CEILING || max > SALARY_CEILING {
            return Err(ValidationError::SalaryOutOfBounds { min, max });
        }
        if min > max {
            return Err(ValidationError::SalaryInverted { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for SalaryRange {
    fn default() -> Self {
        Self {
            min: 50_000,
            max: 100_000,
        }
    }
}

/// Which page the session is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Search,
    Results,
}

/// Per-session UI and data state.
///
/// Per-index maps are keyed by position in `jobs` and are cleared whenever
/// `jobs` is replaced or discarded.
#[derive(Debug, Clone)]
pub struct SessionState {
    page: Page,
    pub search_query: String,
    pub salary_range: SalaryRange,
    jobs: Vec<JobPosting>,
    uploaded_resumes: BTreeMap<usize, String>,
    tailored_recommendations: BTreeMap<usize, String>,
    tailoring_failures: BTreeSet<usize>,
    cover_letter_requests: BTreeSet<usize>,
    pub title_suggestions: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            page: Page::Search,
            search_query: String::new(),
            salary_range: SalaryRange::default(),
            jobs: Vec::new(),
            uploaded_resumes: BTreeMap::new(),
            tailored_recommendations: BTreeMap::new(),
            tailoring_failures: BTreeSet::new(),
            cover_letter_requests: BTreeSet::new(),
            title_suggestions: None,
        }
    }
}

impl SessionState {
    pub fn page(&self) -> Page {
        self.page
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn job(&self, index: usize) -> Option<&JobPosting> {
        match self.page {
            Page::Results => self.jobs.get(index),
            Page::Search => None,
        }
    }

    pub fn resume(&self, index: usize) -> Option<&str> {
        self.uploaded_resumes.get(&index).map(String::as_str)
    }

    pub fn advice(&self, index: usize) -> Option<&str> {
        self.tailored_recommendations.get(&index).map(String::as_str)
    }

    pub fn tailoring_failed(&self, index: usize) -> bool {
        self.tailoring_failures.contains(&index)
    }

    pub fn cover_letter_requested(&self, index: usize) -> bool {
        self.cover_letter_requests.contains(&index)
    }

    /// Search -> Results. Replaces the job list and drops everything keyed on the old one.
    /// Callers must not pass an empty list.
    pub fn show_results(&mut self, jobs: Vec<JobPosting>) {
        debug_assert!(!jobs.is_empty());
        self.jobs = jobs;
        self.clear_per_job();
        self.title_suggestions = None;
        self.page = Page::Results;
    }

    /// Results -> Search ("New Search").
    pub fn new_search(&mut self) {
        self.jobs.clear();
        self.clear_per_job();
        self.page = Page::Search;
    }

    /// Stores the resume for `index`, discarding any advice produced for an earlier upload.
    pub fn record_resume(&mut self, index: usize, text: String) {
        self.uploaded_resumes.insert(index, text);
        self.tailored_recommendations.remove(&index);
        self.tailoring_failures.remove(&index);
    }

    pub fn record_advice(&mut self, index: usize, advice: String) {
        self.tailoring_failures.remove(&index);
        self.tailored_recommendations.insert(index, advice);
    }

    pub fn record_tailoring_failure(&mut self, index: usize) {
        self.tailored_recommendations.remove(&index);
        self.tailoring_failures.insert(index);
    }

    pub fn request_cover_letter(&mut self, index: usize) {
        self.cover_letter_requests.insert(index);
    }

    fn clear_per_job(&mut self) {
        self.uploaded_resumes.clear();
        self.tailored_recommendations.clear();
        self.tailoring_failures.clear();
        self.cover_letter_requests.clear();
    }
}
