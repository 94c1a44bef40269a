use crate::model::history::History;
use crate::model::question::Question;

/// Counts shown on the start screen before a quiz begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuStatus {
    pub unanswered: usize,
    pub weak: usize,
    pub solved: usize,
    pub total: usize,
}

impl MenuStatus {
    /// Derive counts for `questions` from `history`.
    ///
    /// History entries for ids outside the bank are ignored.
    #[must_use]
    pub fn compute(questions: &[Question], history: &History) -> Self {
        questions.iter().fold(
            Self {
                total: questions.len(),
                ..Self::default()
            },
            |mut status, question| {
                match history.outcome(question.id()) {
                    None => status.unanswered += 1,
                    Some(false) => status.weak += 1,
                    Some(true) => status.solved += 1,
                }
                status
            },
        )
    }
}
