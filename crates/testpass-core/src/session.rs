//! One user's pass through a test.
//!
//! The attempt owns a seeded RNG and caches the answer state of every
//! question it has activated, so returning to a question shows the same
//! arrangement and keeps the user's progress. States are dropped only when a
//! question is left for good or the attempt ends.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::builder::build_initial_state;
use crate::error::EngineError;
use crate::extractor::build_answer_result;
use crate::interaction::{QuestionAction, QuestionSession};
use crate::model::{AnswerResult, Question};

/// The answer to one question as posted to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question_id: u64,
    pub answer: serde_json::Value,
}

/// Everything posted when an attempt is finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptSubmission {
    pub attempt_id: Uuid,
    pub answers: Vec<QuestionAnswer>,
}

/// A single attempt at a test.
#[derive(Debug)]
pub struct AttemptSession {
    attempt_id: Uuid,
    seed: u64,
    rng: StdRng,
    questions: HashMap<u64, QuestionSession>,
}

impl AttemptSession {
    /// Start an attempt with a seed drawn from entropy.
    pub fn new() -> Self {
        Self::with_seed(Uuid::new_v4(), rand::random())
    }

    /// Start an attempt whose arrangements are reproducible from `seed`.
    pub fn with_seed(attempt_id: Uuid, seed: u64) -> Self {
        tracing::debug!("attempt {attempt_id} started with seed {seed}");
        Self {
            attempt_id,
            seed,
            rng: StdRng::seed_from_u64(seed),
            questions: HashMap::new(),
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Make `question` the active one.
    ///
    /// The initial state is built on the first activation only; later calls
    /// return the cached session untouched. Returns `None` for questions of an
    /// unknown type.
    pub fn activate(&mut self, question: &Question) -> Option<&mut QuestionSession> {
        if !self.questions.contains_key(&question.id) {
            let state = build_initial_state(question, &mut self.rng)?;
            self.questions
                .insert(question.id, QuestionSession::new(question, state));
        }
        self.questions.get_mut(&question.id)
    }

    /// The cached session of a question, if it was activated.
    pub fn get(&self, question_id: u64) -> Option<&QuestionSession> {
        self.questions.get(&question_id)
    }

    /// Apply an action to an activated question.
    pub fn apply(&mut self, question_id: u64, action: QuestionAction) -> Result<bool, EngineError> {
        let session = self
            .questions
            .get_mut(&question_id)
            .ok_or_else(|| EngineError::UnknownQuestion(question_id.to_string()))?;
        Ok(session.apply(action))
    }

    /// Forget the state of a question. The next activation rebuilds it.
    pub fn leave(&mut self, question_id: u64) -> bool {
        self.questions.remove(&question_id).is_some()
    }

    /// The current answer to a question; never-activated questions get the
    /// unanswered default.
    pub fn answer(&self, question: &Question) -> AnswerResult {
        build_answer_result(question, self.get(question.id).map(QuestionSession::state))
    }

    /// Questions whose current answer is empty, in the given order.
    pub fn unanswered<'a>(&self, questions: &'a [Question]) -> Vec<&'a Question> {
        questions
            .iter()
            .filter(|q| self.answer(q).is_empty)
            .collect()
    }

    /// Collect the answers to all `questions` for posting.
    pub fn submission(&self, questions: &[Question]) -> AttemptSubmission {
        AttemptSubmission {
            attempt_id: self.attempt_id,
            answers: questions
                .iter()
                .map(|q| QuestionAnswer {
                    question_id: q.id,
                    answer: self.answer(q).answer,
                })
                .collect(),
        }
    }
}

impl Default for AttemptSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{DragSource, DropTarget};
    use crate::model::{QuestionOption, QuestionState, QuestionType};
    use serde_json::json;

    fn ordering_question(id: u64) -> Question {
        let options = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|l| QuestionOption::labelled(*l))
            .collect();
        Question::new(id, QuestionType::Ordering, options)
    }

    fn ordering_of(session: &AttemptSession, id: u64) -> Vec<String> {
        match session.get(id).map(QuestionSession::state) {
            Some(QuestionState::Ordering { ordering }) => ordering.clone(),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn activation_is_memoized() {
        let q = ordering_question(1);
        let mut session = AttemptSession::with_seed(Uuid::nil(), 3);
        session.activate(&q);
        let first = ordering_of(&session, 1);

        for _ in 0..10 {
            session.activate(&q);
            assert_eq!(ordering_of(&session, 1), first);
        }
    }

    #[test]
    fn progress_survives_reactivation() {
        let q = ordering_question(1);
        let mut session = AttemptSession::with_seed(Uuid::nil(), 3);
        session.activate(&q);
        let before = ordering_of(&session, 1);

        session
            .apply(
                1,
                QuestionAction::Pick {
                    source: DragSource { list: 0, item: 0 },
                },
            )
            .unwrap();
        assert!(session
            .apply(
                1,
                QuestionAction::Drop {
                    target: DropTarget {
                        list: 0,
                        item: Some(5)
                    },
                },
            )
            .unwrap());

        let after = ordering_of(&session, 1);
        assert_ne!(before, after);
        session.activate(&q);
        assert_eq!(ordering_of(&session, 1), after);
    }

    #[test]
    fn same_seed_same_arrangement() {
        let q = ordering_question(9);
        let mut a = AttemptSession::with_seed(Uuid::new_v4(), 77);
        let mut b = AttemptSession::with_seed(Uuid::new_v4(), 77);
        a.activate(&q);
        b.activate(&q);
        assert_eq!(ordering_of(&a, 9), ordering_of(&b, 9));
        assert_eq!(a.seed(), 77);
    }

    #[test]
    fn leave_discards_state() {
        let q = ordering_question(1);
        let mut session = AttemptSession::with_seed(Uuid::nil(), 1);
        session.activate(&q);
        assert!(session.leave(1));
        assert!(session.get(1).is_none());
        assert!(!session.leave(1));
    }

    #[test]
    fn apply_to_unknown_question_fails() {
        let mut session = AttemptSession::with_seed(Uuid::nil(), 1);
        let err = session.apply(42, QuestionAction::CancelDrag).unwrap_err();
        assert_eq!(err, EngineError::UnknownQuestion("42".into()));
    }

    #[test]
    fn unknown_question_type_is_not_activated() {
        let q = Question::new(5, QuestionType::Unknown, vec![]);
        let mut session = AttemptSession::with_seed(Uuid::nil(), 1);
        assert!(session.activate(&q).is_none());
        assert!(session.answer(&q).is_empty);
    }

    #[test]
    fn submission_and_unanswered() {
        let single = Question::new(
            1,
            QuestionType::SingleChoice,
            vec![QuestionOption::labelled("a"), QuestionOption::labelled("b")],
        );
        let text = Question::new(2, QuestionType::TextInput, vec![]);
        let questions = vec![single, text];

        let attempt_id = Uuid::new_v4();
        let mut session = AttemptSession::with_seed(attempt_id, 0);
        assert_eq!(session.unanswered(&questions).len(), 2);

        session.activate(&questions[0]);
        session
            .apply(1, QuestionAction::Select { index: 1 })
            .unwrap();

        let unanswered: Vec<u64> = session.unanswered(&questions).iter().map(|q| q.id).collect();
        assert_eq!(unanswered, vec![2]);

        let submission = session.submission(&questions);
        assert_eq!(submission.attempt_id, attempt_id);
        assert_eq!(
            submission.answers,
            vec![
                QuestionAnswer {
                    question_id: 1,
                    answer: json!(1)
                },
                QuestionAnswer {
                    question_id: 2,
                    answer: json!("")
                },
            ]
        );
    }
}
