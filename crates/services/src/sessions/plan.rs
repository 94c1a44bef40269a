use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::debug;

use quiz_core::model::{History, Question, QuestionId, QuizMode};

use crate::ports::Notice;

/// Maximum number of questions in one quiz.
pub const POOL_SIZE: usize = 20;

/// Selection result for a quiz build.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolPlan {
    pub questions: Vec<Question>,
    /// Set when the requested mode had nothing to offer and a fallback was used.
    pub notice: Option<Notice>,
}

impl PoolPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds a quiz pool from the bank according to a mode and the answer history.
pub struct PoolSelector<'a> {
    questions: &'a [Question],
    limit: usize,
}

impl<'a> PoolSelector<'a> {
    #[must_use]
    pub fn new(questions: &'a [Question]) -> Self {
        Self {
            questions,
            limit: POOL_SIZE,
        }
    }

    /// Override the pool cap; mainly for tests with small banks.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Pick an ordered, duplicate-free pool of at most `limit` questions.
    ///
    /// - `Random`: shuffled bank, truncated.
    /// - `New`: shuffled unanswered questions, topped up from the rest of the bank.
    /// - `Weak`: shuffled questions last answered wrong; falls back to `Random`
    ///   with `Notice::NoWeakQuestions` when there are none.
    pub fn select<R: Rng + ?Sized>(
        &self,
        mode: QuizMode,
        history: &History,
        rng: &mut R,
    ) -> PoolPlan {
        let plan = match mode {
            QuizMode::Random => PoolPlan {
                questions: self.random(rng),
                notice: None,
            },
            QuizMode::New => PoolPlan {
                questions: self.unanswered_first(history, rng),
                notice: None,
            },
            QuizMode::Weak => {
                let weak = self.weak(history, rng);
                if weak.is_empty() {
                    PoolPlan {
                        questions: self.random(rng),
                        notice: Some(Notice::NoWeakQuestions),
                    }
                } else {
                    PoolPlan {
                        questions: weak,
                        notice: None,
                    }
                }
            }
        };
        debug!(%mode, selected = plan.len(), fallback = plan.notice.is_some(), "built quiz pool");
        plan
    }

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        self.shuffled_take(self.questions.iter(), rng, self.limit)
    }

    fn unanswered_first<R: Rng + ?Sized>(&self, history: &History, rng: &mut R) -> Vec<Question> {
        let unplayed = self
            .questions
            .iter()
            .filter(|q| !history.is_answered(q.id()));
        let mut pool = self.shuffled_take(unplayed, rng, self.limit);

        if pool.len() < self.limit {
            let mut selected: HashSet<QuestionId> = pool.iter().map(|q| q.id().clone()).collect();
            let mut others: Vec<&Question> = self
                .questions
                .iter()
                .filter(|q| !selected.contains(q.id()))
                .collect();
            others.shuffle(rng);

            for question in others {
                if pool.len() >= self.limit {
                    break;
                }
                if selected.insert(question.id().clone()) {
                    pool.push(question.clone());
                }
            }
        }
        pool
    }

    fn weak<R: Rng + ?Sized>(&self, history: &History, rng: &mut R) -> Vec<Question> {
        let weak = self.questions.iter().filter(|q| history.is_weak(q.id()));
        self.shuffled_take(weak, rng, self.limit)
    }

    fn shuffled_take<'q, R: Rng + ?Sized>(
        &self,
        candidates: impl Iterator<Item = &'q Question>,
        rng: &mut R,
        take: usize,
    ) -> Vec<Question> {
        let mut candidates: Vec<&Question> = candidates.collect();
        candidates.shuffle(rng);

        let mut seen = HashSet::with_capacity(take.min(candidates.len()));
        let mut picked = Vec::with_capacity(take.min(candidates.len()));
        for question in candidates {
            if picked.len() >= take {
                break;
            }
            if seen.insert(question.id()) {
                picked.push(question.clone());
            }
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_question(id: usize) -> Question {
        QuestionDraft {
            id: format!("q{id:02}"),
            category: "cat".into(),
            prompt: format!("Question {id}"),
            data: None,
            table: None,
            options: vec!["a".into(), "b".into(), "c".into()],
            correct: 0,
            explanation: String::new(),
            reference: String::new(),
        }
        .validate()
        .unwrap()
    }

    fn build_bank(len: usize) -> Vec<Question> {
        (0..len).map(build_question).collect()
    }

    fn qid(id: usize) -> QuestionId {
        QuestionId::new(format!("q{id:02}")).unwrap()
    }

    fn assert_unique(pool: &[Question]) {
        let ids: HashSet<_> = pool.iter().map(Question::id).collect();
        assert_eq!(ids.len(), pool.len(), "pool has duplicates");
    }

    #[test]
    fn every_mode_respects_caps() {
        let history: History = (0..10).map(|i| (qid(i), i % 2 == 0)).collect();
        for len in [0, 1, 3, 19, 20, 21, 45] {
            let bank = build_bank(len);
            for seed in 0..5 {
                for mode in QuizMode::ALL {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let plan = PoolSelector::new(&bank).select(mode, &history, &mut rng);
                    assert!(plan.len() <= POOL_SIZE);
                    assert!(plan.len() <= bank.len());
                    assert_unique(&plan.questions);
                }
            }
        }
    }

    #[test]
    fn random_takes_twenty_from_large_bank() {
        let bank = build_bank(30);
        let mut rng = StdRng::seed_from_u64(7);
        let plan = PoolSelector::new(&bank).select(QuizMode::Random, &History::new(), &mut rng);
        assert_eq!(plan.len(), POOL_SIZE);
        assert_eq!(plan.notice, None);
    }

    #[test]
    fn new_mode_with_small_bank_returns_all() {
        let bank = build_bank(3);
        let mut rng = StdRng::seed_from_u64(1);
        let plan = PoolSelector::new(&bank).select(QuizMode::New, &History::new(), &mut rng);
        assert_eq!(plan.len(), 3);
        assert_unique(&plan.questions);
    }

    #[test]
    fn new_mode_prefers_unanswered() {
        let bank = build_bank(40);
        // 25 answered, 15 unanswered.
        let history: History = (0..25).map(|i| (qid(i), true)).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let plan = PoolSelector::new(&bank).select(QuizMode::New, &history, &mut rng);

        assert_eq!(plan.len(), POOL_SIZE);
        assert_unique(&plan.questions);
        let unanswered_in_pool = plan
            .questions
            .iter()
            .filter(|q| !history.is_answered(q.id()))
            .count();
        assert_eq!(unanswered_in_pool, 15);
        // Unanswered questions come first, top-up after.
        assert!(
            plan.questions[..15]
                .iter()
                .all(|q| !history.is_answered(q.id()))
        );
    }

    #[test]
    fn new_mode_never_returns_answered_when_enough_unanswered() {
        let bank = build_bank(45);
        let history: History = (0..20).map(|i| (qid(i), i % 3 == 0)).collect();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = PoolSelector::new(&bank).select(QuizMode::New, &history, &mut rng);
            assert_eq!(plan.len(), POOL_SIZE);
            assert!(plan.questions.iter().all(|q| !history.is_answered(q.id())));
        }
    }

    #[test]
    fn weak_mode_returns_only_wrong_answers() {
        let bank = build_bank(25);
        let mut history = History::new();
        for i in 0..5 {
            history.record(qid(i), false);
        }
        for i in 5..15 {
            history.record(qid(i), true);
        }

        let mut rng = StdRng::seed_from_u64(11);
        let plan = PoolSelector::new(&bank).select(QuizMode::Weak, &history, &mut rng);
        assert_eq!(plan.len(), 5);
        assert_eq!(plan.notice, None);
        assert!(plan.questions.iter().all(|q| history.is_weak(q.id())));
        assert_unique(&plan.questions);
    }

    #[test]
    fn weak_mode_without_weak_questions_falls_back_to_random() {
        let bank = build_bank(25);
        let history: History = (0..10).map(|i| (qid(i), true)).collect();
        let mut rng = StdRng::seed_from_u64(5);
        let plan = PoolSelector::new(&bank).select(QuizMode::Weak, &history, &mut rng);
        assert_eq!(plan.len(), POOL_SIZE);
        assert_eq!(plan.notice, Some(Notice::NoWeakQuestions));
        assert_unique(&plan.questions);
    }

    #[test]
    fn with_limit_caps_pool() {
        let bank = build_bank(10);
        let mut rng = StdRng::seed_from_u64(9);
        let plan = PoolSelector::new(&bank)
            .with_limit(4)
            .select(QuizMode::Random, &History::new(), &mut rng);
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn shuffle_reaches_every_position() {
        // Each question should be able to lead the pool.
        let bank = build_bank(3);
        let mut firsts = HashSet::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = PoolSelector::new(&bank).select(QuizMode::Random, &History::new(), &mut rng);
            firsts.insert(plan.questions[0].id().clone());
        }
        assert_eq!(firsts.len(), 3);
    }
}
