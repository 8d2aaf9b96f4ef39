//! Resume text extraction for uploaded `.txt` and `.pdf` files.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported resume type '{0}'. Upload a PDF or TXT file")]
    UnsupportedType(String),

    #[error("The uploaded resume is empty")]
    Empty,

    #[error("Resume text is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Could not read PDF: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    Text,
    Pdf,
}

impl ResumeKind {
    /// Dispatches on the lower-cased text after the last `.` of the file name.
    pub fn from_file_name(name: &str) -> Result<Self, ExtractError> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "txt" => Ok(ResumeKind::Text),
            "pdf" => Ok(ResumeKind::Pdf),
            _ => Err(ExtractError::UnsupportedType(extension)),
        }
    }
}

/// An uploaded resume as received from the form.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub bytes: Bytes,
}

/// Returns the plain text of `file`.
///
/// Text files are decoded as strict UTF-8. PDF pages are extracted on the
/// blocking pool and concatenated with no separator; a page without
/// extractable text contributes an empty string.
pub async fn extract_text(file: ResumeFile) -> Result<String, ExtractError> {
    let kind = ResumeKind::from_file_name(&file.name)?;
    if file.bytes.is_empty() {
        return Err(ExtractError::Empty);
    }
    debug!(name = %file.name, size = file.bytes.len(), ?kind, "Extracting resume text");

    match kind {
        ResumeKind::Text => Ok(String::from_utf8(file.bytes.to_vec())?),
        ResumeKind::Pdf => {
            let bytes = file.bytes;
            tokio::task::spawn_blocking(move || extract_pdf_pages(&bytes))
                .await
                .map_err(|e| ExtractError::Pdf(format!("extraction aborted: {e}")))?
        }
    }
}

fn extract_pdf_pages(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect()
}
