//! Builds the outbound job-search query from form criteria.

use crate::jobs::models::SearchCriteria;

pub const PAGE: &str = "1";
pub const NUM_PAGES: &str = "1";
pub const COUNTRY: &str = "us";
pub const DATE_POSTED: &str = "all";

/// Query parameters sent to the job-search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    pub query: String,
}

impl JobQuery {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        Self {
            query: build_query(criteria),
        }
    }

    pub fn params(&self) -> [(&'static str, &str); 5] {
        [
            ("query", self.query.as_str()),
            ("page", PAGE),
            ("num_pages", NUM_PAGES),
            ("country", COUNTRY),
            ("date_posted", DATE_POSTED),
        ]
    }
}

/// Free text, then the employment type label, then "remote"/"onsite", space separated.
pub fn build_query(criteria: &SearchCriteria) -> String {
    let mut query = criteria.query.clone();
    let suffixes = [
        criteria.employment_type.query_suffix(),
        criteria.remote.query_suffix(),
    ];
    for suffix in suffixes.into_iter().flatten() {
        query.push(' ');
        query.push_str(suffix);
    }
    query
}
