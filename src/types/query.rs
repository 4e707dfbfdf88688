//! Request types for the chat and ingest endpoints

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Chat request with a natural-language question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The question to answer
    pub question: String,

    /// Number of chunks to retrieve (default: configured top_k)
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: None,
        }
    }

    /// Validate the question against the configured length limit
    pub fn validate(&self, max_len: usize) -> Result<()> {
        let trimmed = self.question.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation("Question must not be empty".to_string()));
        }
        if trimmed.chars().count() > max_len {
            return Err(Error::Validation(format!(
                "Question exceeds maximum length of {} characters",
                max_len
            )));
        }
        Ok(())
    }
}

/// Ingest request options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Directory to scan for PDFs (overrides the configured directory)
    #[serde(default)]
    pub directory: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_question_is_rejected() {
        assert!(ChatRequest::new("  ").validate(1000).is_err());
    }

    #[test]
    fn oversized_question_is_rejected() {
        let question = "a".repeat(1001);
        assert!(ChatRequest::new(question).validate(1000).is_err());
    }

    #[test]
    fn normal_question_passes() {
        assert!(ChatRequest::new("Apa syarat kelulusan?").validate(1000).is_ok());
    }
}
