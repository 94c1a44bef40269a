/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the question on screen.
    pub position: usize,
    pub total: usize,
    pub correct: usize,
    pub answered_current: bool,
}

impl QuizProgress {
    /// Label in the form `3 / 20`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {}", self.position, self.total)
    }
}
