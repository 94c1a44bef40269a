use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Strategy used to build a quiz pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    /// Any question from the bank.
    Random,
    /// Unanswered questions first, topped up from the rest of the bank.
    New,
    /// Questions whose last answer was wrong.
    Weak,
}

impl QuizMode {
    pub const ALL: [QuizMode; 3] = [QuizMode::Random, QuizMode::New, QuizMode::Weak];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizMode::Random => "random",
            QuizMode::New => "new",
            QuizMode::Weak => "weak",
        }
    }

    /// Human readable label shown above the question.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuizMode::Random => "Random practice",
            QuizMode::New => "Unanswered first",
            QuizMode::Weak => "Weak spots",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown quiz mode: {}", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for QuizMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(QuizMode::Random),
            "new" => Ok(QuizMode::New),
            "weak" => Ok(QuizMode::Weak),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}
