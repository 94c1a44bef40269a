use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{Question, QuestionId, QuizMode, QuizResult};

use super::progress::QuizProgress;
use crate::error::QuizError;

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// Outcome of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub question_id: QuestionId,
    pub selected: usize,
    pub is_correct: bool,
}

/// What happened after moving past the answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next,
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one running quiz.
///
/// Steps through the pool sequentially; each question is answered at most once,
/// and moving on is a separate step so feedback can be shown in between.
pub struct QuizSession {
    mode: QuizMode,
    questions: Vec<Question>,
    current: usize,
    correct: usize,
    answered: Option<AnsweredQuestion>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPool` if no questions are provided.
    pub fn new(
        mode: QuizMode,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyPool);
        }
        Ok(Self {
            mode,
            questions,
            current: 0,
            correct: 0,
            answered: None,
            started_at,
        })
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions in the pool.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// 0-based index of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// The answer given for the current question, if any.
    #[must_use]
    pub fn current_answer(&self) -> Option<&AnsweredQuestion> {
        self.answered.as_ref()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current >= self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: (self.current + 1).min(self.total()),
            total: self.total(),
            correct: self.correct,
            answered_current: self.answered.is_some(),
        }
    }

    /// Check `selected` against the current question without changing state.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyAnswered` if the current question has an answer,
    /// `QuizError::InvalidOption` if `selected` is not an option index, or
    /// `QuizError::NotRunning` once the pool is exhausted.
    pub fn grade(&self, selected: usize) -> Result<AnsweredQuestion, QuizError> {
        if self.answered.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        let question = self.current_question().ok_or(QuizError::NotRunning)?;
        if selected >= question.option_count() {
            return Err(QuizError::InvalidOption {
                index: selected,
                len: question.option_count(),
            });
        }
        Ok(AnsweredQuestion {
            question_id: question.id().clone(),
            selected,
            is_correct: question.is_correct(selected),
        })
    }

    /// Commit an answer produced by [`grade`](Self::grade).
    pub(crate) fn apply(&mut self, answer: AnsweredQuestion) {
        if answer.is_correct {
            self.correct += 1;
        }
        self.answered = Some(answer);
    }

    /// Grade and commit in one step.
    ///
    /// # Errors
    ///
    /// Same as [`grade`](Self::grade).
    pub fn answer(&mut self, selected: usize) -> Result<&AnsweredQuestion, QuizError> {
        let answer = self.grade(selected)?;
        self.apply(answer);
        self.answered.as_ref().ok_or(QuizError::NotAnswered)
    }

    /// Move past the answered question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswered` if the current question has no answer yet.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        if self.answered.is_none() {
            return Err(QuizError::NotAnswered);
        }
        self.answered = None;
        self.current += 1;
        if self.is_exhausted() {
            Ok(Advance::Finished)
        } else {
            Ok(Advance::Next)
        }
    }

    /// Final score once every question has been answered.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` while questions remain, or
    /// `QuizError::Result` if the timestamps are inconsistent.
    pub fn finish(&self, completed_at: DateTime<Utc>) -> Result<QuizResult, QuizError> {
        if !self.is_exhausted() {
            return Err(QuizError::NotFinished);
        }
        Ok(QuizResult::new(
            self.mode,
            self.correct,
            self.total(),
            self.started_at,
            completed_at,
        )?)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("mode", &self.mode)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("correct", &self.correct)
            .field("answered", &self.answered)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
