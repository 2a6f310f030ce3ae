//! Content checks applied to an incoming question before it reaches the model.
//!
//! The denylist is plain substring matching on the lowercased text. It catches
//! obvious SQL keywords and nothing more; it is not an injection defence (the
//! store only ever binds parameters).

use thiserror::Error;

pub const MAX_QUESTION_CHARS: usize = 200;

pub const DENYLIST: [&str; 6] = ["select ", "drop ", "insert ", "delete ", "update ", "--"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Question cannot be empty.")]
    Empty,
    #[error("Question is too long. Limit to 200 characters.")]
    TooLong { chars: usize },
    #[error("Invalid question content.")]
    InvalidContent,
}

impl ValidationError {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong { .. } => "too_long",
            Self::InvalidContent => "invalid_content",
        }
    }
}

/// Runs the checks in order and returns the trimmed question. First failure wins.
pub fn validate_question(raw: &str) -> Result<&str, ValidationError> {
    let question = raw.trim();
    if question.is_empty() {
        return Err(ValidationError::Empty);
    }

    // length is measured on the raw input, surrounding whitespace included
    let chars = raw.chars().count();
    if chars > MAX_QUESTION_CHARS {
        return Err(ValidationError::TooLong { chars });
    }

    let lowered = question.to_lowercase();
    if DENYLIST.iter().any(|word| lowered.contains(word)) {
        return Err(ValidationError::InvalidContent);
    }

    Ok(question)
}
