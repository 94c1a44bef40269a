use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::mode::QuizMode;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct answers ({correct}) exceed pool size ({total})")]
    CountMismatch { correct: usize, total: usize },
}

/// Final score of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    mode: QuizMode,
    correct: usize,
    total: usize,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// # Errors
    ///
    /// Returns `QuizResultError::InvalidTimeRange` if the quiz ends before it starts,
    /// or `QuizResultError::CountMismatch` if `correct > total`.
    pub fn new(
        mode: QuizMode,
        correct: usize,
        total: usize,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        if completed_at < started_at {
            return Err(QuizResultError::InvalidTimeRange);
        }
        if correct > total {
            return Err(QuizResultError::CountMismatch { correct, total });
        }
        Ok(Self {
            mode,
            correct,
            total,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Pool length of the finished quiz.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// `(correct, total)`
    #[must_use]
    pub fn score(&self) -> (usize, usize) {
        (self.correct, self.total)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn score_reports_correct_and_total() {
        let now = fixed_now();
        let result = QuizResult::new(QuizMode::New, 2, 3, now, now).unwrap();
        assert_eq!(result.score(), (2, 3));
        assert_eq!(result.mode(), QuizMode::New);
    }

    #[test]
    fn rejects_more_correct_than_total() {
        let now = fixed_now();
        let err = QuizResult::new(QuizMode::Random, 4, 3, now, now).unwrap_err();
        assert_eq!(err, QuizResultError::CountMismatch { correct: 4, total: 3 });
    }

    #[test]
    fn rejects_reversed_time_range() {
        let now = fixed_now();
        let err =
            QuizResult::new(QuizMode::Random, 0, 1, now, now - chrono::Duration::seconds(1))
                .unwrap_err();
        assert_eq!(err, QuizResultError::InvalidTimeRange);
    }
}
