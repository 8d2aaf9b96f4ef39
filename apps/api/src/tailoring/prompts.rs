// Tailoring and title-suggestion prompt templates.

pub const TAILOR_MODEL: &str = "gpt-4o-mini";

pub const TAILOR_SYSTEM: &str = "You are an expert career advisor and resume reviewer.";

pub const SUGGEST_MODEL: &str = "gpt-4o";

pub const SUGGEST_SYSTEM: &str = "You are an expert career assistant.";

pub const SUGGEST_PROMPT_TEMPLATE: &str =
    "Given the job search '{query}', suggest three similar job titles.";

/// Builds the tailoring request. Inputs are inserted verbatim, never re-expanded.
pub fn tailor_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "Given my resume below and the job posting details '{job_description}', \
         provide specific recommendations on how to tailor my resume for this job. \
         List actionable improvements and suggest rewordings where necessary.\n\n\
         Resume:\n{resume_text}"
    )
}

pub fn suggest_prompt(query: &str) -> String {
    SUGGEST_PROMPT_TEMPLATE.replace("{query}", query)
}
