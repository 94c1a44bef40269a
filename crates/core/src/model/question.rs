use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in a bank file.
///
/// Field names follow the bank format (`cat`, `q`, `exp`, `ref`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: String,
    #[serde(rename = "cat", default)]
    pub category: String,
    #[serde(rename = "q")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(rename = "exp", default)]
    pub explanation: String,
    #[serde(rename = "ref", default)]
    pub reference: String,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the id or prompt is blank, fewer than two
    /// options are given, or `correct` does not point at an option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = QuestionId::new(self.id).map_err(|_| QuestionError::EmptyId)?;

        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id,
                len: self.options.len(),
            });
        }
        if self.correct >= self.options.len() {
            return Err(QuestionError::CorrectOutOfRange {
                id,
                correct: self.correct,
                len: self.options.len(),
            });
        }

        Ok(Question {
            id,
            category: self.category,
            prompt: self.prompt,
            data: self.data.filter(|d| !d.trim().is_empty()),
            table: self.table.filter(|t| !t.trim().is_empty()),
            options: self.options,
            correct: self.correct,
            explanation: self.explanation,
            reference: self.reference,
        })
    }
}

/// A single multiple-choice question. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    category: String,
    prompt: String,
    data: Option<String>,
    table: Option<String>,
    options: Vec<String>,
    correct: usize,
    explanation: String,
    reference: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Prompt text; may contain inline markup.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    #[must_use]
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Auxiliary content shown next to the prompt: free text followed by the table.
    #[must_use]
    pub fn auxiliary(&self) -> Option<String> {
        match (self.data(), self.table()) {
            (None, None) => None,
            (Some(data), None) => Some(data.to_string()),
            (None, Some(table)) => Some(table.to_string()),
            (Some(data), Some(table)) => Some(format!("{data}{table}")),
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Zero-based index of the correct option.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} needs at least two options, got {len}")]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id} marks option {correct} correct but has only {len} options")]
    CorrectOutOfRange {
        id: QuestionId,
        correct: usize,
        len: usize,
    },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
