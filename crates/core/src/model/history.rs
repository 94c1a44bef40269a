use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Last recorded outcome per question (`true` = answered correctly).
///
/// Questions without an entry have never been answered. Serializes as a flat
/// JSON object, e.g. `{"s1_01":true,"s1_02":false}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(BTreeMap<QuestionId, bool>);

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the outcome for a question.
    pub fn record(&mut self, id: QuestionId, correct: bool) {
        self.0.insert(id, correct);
    }

    #[must_use]
    pub fn outcome(&self, id: &QuestionId) -> Option<bool> {
        self.0.get(id).copied()
    }

    #[must_use]
    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.0.contains_key(id)
    }

    /// Last answer was wrong.
    #[must_use]
    pub fn is_weak(&self, id: &QuestionId) -> bool {
        self.outcome(id) == Some(false)
    }

    /// Last answer was right.
    #[must_use]
    pub fn is_solved(&self, id: &QuestionId) -> bool {
        self.outcome(id) == Some(true)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, bool)> {
        self.0.iter().map(|(id, correct)| (id, *correct))
    }
}

impl FromIterator<(QuestionId, bool)> for History {
    fn from_iter<T: IntoIterator<Item = (QuestionId, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> QuestionId {
        QuestionId::new(raw).unwrap()
    }

    #[test]
    fn record_overwrites_previous_outcome() {
        let mut history = History::new();
        history.record(id("a"), true);
        assert!(history.is_solved(&id("a")));
        history.record(id("a"), false);
        assert!(history.is_weak(&id("a")));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn missing_entry_is_unanswered() {
        let history = History::new();
        assert!(!history.is_answered(&id("a")));
        assert!(!history.is_weak(&id("a")));
        assert!(!history.is_solved(&id("a")));
    }

    #[test]
    fn serializes_as_flat_object() {
        let history: History = [(id("s1_01"), true), (id("s1_02"), false)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"{"s1_01":true,"s1_02":false}"#);

        let parsed: History = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, history);
    }
}
