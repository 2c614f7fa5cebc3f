//! Submission payloads.
//!
//! Converts the current answer state of a question into the JSON value the
//! submission endpoint expects, plus the emptiness flag the host uses to gate
//! its "next" / "submit" action. The field names `group_one`, `group_two`,
//! `ordering_list` and `classification_groups` are part of the wire format.

use serde_json::{json, Value};

use crate::model::{AnswerResult, ClassificationGroup, Question, QuestionState, QuestionType};

/// Build the answer for `question` from its current state.
///
/// `state` is `None` when the user never interacted with the question. A state
/// that does not belong to the question's type is treated the same way.
/// Never fails: unknown question types yield a null, empty answer.
pub fn build_answer_result(question: &Question, state: Option<&QuestionState>) -> AnswerResult {
    match question.kind {
        QuestionType::SingleChoice => {
            let selected = match state {
                Some(QuestionState::SingleChoice { selected_option }) => *selected_option,
                _ => None,
            };
            match selected {
                Some(index) => AnswerResult {
                    answer: json!(index),
                    is_empty: false,
                },
                None => AnswerResult {
                    answer: json!(-1),
                    is_empty: true,
                },
            }
        }
        QuestionType::MultipleChoice => {
            let selected: &[usize] = match state {
                Some(QuestionState::MultipleChoice { selected_options }) => selected_options.as_slice(),
                _ => &[],
            };
            AnswerResult {
                answer: json!(selected),
                is_empty: selected.is_empty(),
            }
        }
        QuestionType::TextInput | QuestionType::CodeInput => {
            let value = match state {
                Some(QuestionState::TextInput { value } | QuestionState::CodeInput { value }) => {
                    value.as_str()
                }
                _ => "",
            };
            AnswerResult {
                answer: json!(value),
                is_empty: value.is_empty(),
            }
        }
        QuestionType::Conformity => {
            let (group_one, group_two): (&[String], &[String]) = match state {
                Some(QuestionState::Conformity {
                    group_one,
                    group_two,
                }) => (group_one.as_slice(), group_two.as_slice()),
                _ => (&[], &[]),
            };
            AnswerResult {
                answer: json!({ "group_one": group_one, "group_two": group_two }),
                is_empty: group_one.is_empty() || group_two.is_empty(),
            }
        }
        QuestionType::Ordering => {
            let ordering: &[String] = match state {
                Some(QuestionState::Ordering { ordering }) => ordering.as_slice(),
                _ => &[],
            };
            AnswerResult {
                answer: json!({ "ordering_list": ordering }),
                is_empty: ordering.is_empty(),
            }
        }
        QuestionType::Classification => {
            let groups: &[ClassificationGroup] = match state {
                Some(QuestionState::Classification { groups }) => groups.as_slice(),
                _ => &[],
            };
            AnswerResult {
                answer: json!({ "classification_groups": groups }),
                is_empty: groups.is_empty(),
            }
        }
        QuestionType::Unknown => AnswerResult {
            answer: Value::Null,
            is_empty: true,
        },
    }
}
