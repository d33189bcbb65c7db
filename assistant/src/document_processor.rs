use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::ExtractionError;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns uploaded PDF bytes into normalized plain text.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    timeout: Duration,
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentProcessor {
    pub fn new() -> Self {
        Self {
            timeout: EXTRACTION_TIMEOUT,
        }
    }

    /// Extracts the text of every page, joins pages with newlines and normalizes whitespace.
    ///
    /// The parser runs on the blocking pool. A parser panic or a timeout is reported as
    /// [`ExtractionError::Failed`]; bytes the parser rejects as [`ExtractionError::Unparseable`];
    /// a document with no text left after normalization as [`ExtractionError::NoText`].
    pub async fn extract_text(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let bytes = data.to_vec();

        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || extract_pages(&bytes)),
        )
        .await
        .map_err(|_| ExtractionError::Failed("PDF extraction timed out".to_string()))?
        .map_err(|e| ExtractionError::Failed(format!("extraction task failed: {}", e)))??;

        log::info!("Extracted {} pages from PDF", pages.len());

        let text = clean_text(&pages.join("\n"));
        if text.is_empty() {
            return Err(ExtractionError::NoText);
        }

        Ok(text)
    }
}

fn extract_pages(data: &[u8]) -> Result<Vec<String>, ExtractionError> {
    pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| ExtractionError::Unparseable(e.to_string()))
}

/// Collapses every whitespace run (line breaks included) to one space and trims the ends.
pub fn clean_text(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re_whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

    re_whitespace.replace_all(text, " ").trim().to_string()
}
