use std::sync::Arc;

use crate::config::Config;
use crate::jobs::JobSearch;
use crate::session::SessionStore;
use crate::tailoring::{ResumeTailor, TitleSuggester};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Job-search backend. Default: `JSearchClient`.
    pub job_search: Arc<dyn JobSearch>,
    /// Tailoring backend. Default: `LlmAdvisor`.
    pub tailor: Arc<dyn ResumeTailor>,
    pub suggester: Arc<dyn TitleSuggester>,
}
