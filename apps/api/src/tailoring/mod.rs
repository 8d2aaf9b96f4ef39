//! Resume tailoring — language-model advice for one resume against one job.
//!
//! `AppState` carries `Arc<dyn ResumeTailor>` and `Arc<dyn TitleSuggester>`;
//! `LlmAdvisor` implements both over the shared `LlmClient`.

pub mod prompts;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use prompts::{
    suggest_prompt, tailor_prompt, SUGGEST_MODEL, SUGGEST_SYSTEM, TAILOR_MODEL, TAILOR_SYSTEM,
};

#[async_trait]
pub trait ResumeTailor: Send + Sync {
    /// Free-text advice on tailoring `resume_text` to `job_description`.
    async fn tailor(&self, resume_text: &str, job_description: &str) -> Result<String, AppError>;
}

#[async_trait]
pub trait TitleSuggester: Send + Sync {
    /// Three job titles similar to `query`, as free text.
    async fn suggest_titles(&self, query: &str) -> Result<String, AppError>;
}

pub struct LlmAdvisor(pub LlmClient);

#[async_trait]
impl ResumeTailor for LlmAdvisor {
    async fn tailor(&self, resume_text: &str, job_description: &str) -> Result<String, AppError> {
        let prompt = tailor_prompt(resume_text, job_description);
        self.0
            .complete(TAILOR_MODEL, TAILOR_SYSTEM, &prompt)
            .await
            .map_err(|e| AppError::Llm(format!("Resume tailoring failed: {e}")))
    }
}

#[async_trait]
impl TitleSuggester for LlmAdvisor {
    async fn suggest_titles(&self, query: &str) -> Result<String, AppError> {
        let prompt = suggest_prompt(query);
        self.0
            .complete(SUGGEST_MODEL, SUGGEST_SYSTEM, &prompt)
            .await
            .map_err(|e| AppError::Llm(format!("Title suggestion failed: {e}")))
    }
}
