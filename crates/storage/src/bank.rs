//! Loading question banks from JSON.
//!
//! A bank file is a JSON array of question objects:
//!
//! ```json
//! [{"id": "s1_01", "cat": "Tax", "q": "...", "options": ["a", "b"], "correct": 0,
//!   "exp": "...", "ref": "..."}]
//! ```
//!
//! `data` and `table` are optional.

use std::path::Path;

use quiz_core::model::{BankError, QuestionBank, QuestionDraft};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("cannot read question bank {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] BankError),
}

/// Parse and validate a bank from its JSON text.
///
/// # Errors
///
/// Returns `BankLoadError::Parse` for malformed JSON and
/// `BankLoadError::Invalid` when a question fails validation.
pub fn parse_bank(json: &str) -> Result<QuestionBank, BankLoadError> {
    let drafts: Vec<QuestionDraft> = serde_json::from_str(json)?;
    Ok(QuestionBank::from_drafts(drafts)?)
}

/// Read a bank file from disk.
///
/// # Errors
///
/// Returns `BankLoadError::Io` if the file cannot be read, otherwise the
/// errors of [`parse_bank`].
pub fn load_bank(path: impl AsRef<Path>) -> Result<QuestionBank, BankLoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| BankLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let bank = parse_bank(&json)?;
    tracing::debug!(path = %path.display(), questions = bank.len(), "loaded question bank");
    Ok(bank)
}
