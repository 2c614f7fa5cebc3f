//! Core data model types for testpass.
//!
//! Questions and options arrive from the question-loading side and are
//! read-only for the length of an attempt. [`QuestionState`] is the only
//! mutable piece and carries exactly what each question type needs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The interaction mode of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    TextInput,
    CodeInput,
    Conformity,
    Ordering,
    Classification,
    /// Any type string this engine does not know. Answers for it are always
    /// empty.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TextInput => "text_input",
            QuestionType::CodeInput => "code_input",
            QuestionType::Conformity => "conformity",
            QuestionType::Ordering => "ordering",
            QuestionType::Classification => "classification",
            QuestionType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "single_choice" | "single" => Ok(QuestionType::SingleChoice),
            "multiple_choice" | "multiple" => Ok(QuestionType::MultipleChoice),
            "text_input" | "text" => Ok(QuestionType::TextInput),
            "code_input" | "code" => Ok(QuestionType::CodeInput),
            "conformity" => Ok(QuestionType::Conformity),
            "ordering" => Ok(QuestionType::Ordering),
            "classification" => Ok(QuestionType::Classification),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Pre-existing selection state reported by the server.
///
/// Depending on the endpoint this is either a flag or a selection count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selected {
    Flag(bool),
    Count(u32),
}

impl Selected {
    pub fn is_selected(&self) -> bool {
        match self {
            Selected::Flag(flag) => *flag,
            Selected::Count(count) => *count > 0,
        }
    }
}

impl Default for Selected {
    fn default() -> Self {
        Selected::Flag(false)
    }
}

/// One option of a question. Which fields are populated depends on the
/// question type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Display label (choice and ordering types).
    #[serde(default)]
    pub option: Option<String>,
    /// Left-hand item for conformity, group key for classification.
    #[serde(default)]
    pub option_main: Option<String>,
    /// Right-hand item for conformity, item label for classification.
    #[serde(default)]
    pub option_secondary: Option<String>,
    #[serde(default)]
    pub selected: Selected,
    /// Pre-filled free-text answer.
    #[serde(default)]
    pub input: Option<String>,
}

impl QuestionOption {
    /// A plain labelled option, as used by choice questions.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            option: Some(label.into()),
            ..Default::default()
        }
    }

    /// A paired option, as used by conformity and classification questions.
    pub fn paired(main: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            option_main: Some(main.into()),
            option_secondary: Some(secondary.into()),
            ..Default::default()
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_selected()
    }

    pub fn main(&self) -> &str {
        self.option_main.as_deref().unwrap_or("")
    }

    pub fn secondary(&self) -> &str {
        self.option_secondary.as_deref().unwrap_or("")
    }
}

/// A single quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    /// Position of the question within the test, as shown to the user.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn new(id: u64, kind: QuestionType, options: Vec<QuestionOption>) -> Self {
        Self {
            id,
            number: 0,
            body: String::new(),
            kind,
            options,
        }
    }

    /// The pre-filled text answer: the first option carrying one.
    pub fn prefilled_input(&self) -> Option<&str> {
        self.options
            .iter()
            .find_map(|o| o.input.as_deref().filter(|s| !s.is_empty()))
    }
}

/// A named bucket of a classification question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationGroup {
    pub key: String,
    pub values: Vec<String>,
}

impl ClassificationGroup {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: Vec::new(),
        }
    }
}

/// The user's current answer to one question.
///
/// One variant per answerable [`QuestionType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionState {
    /// `None` means unanswered.
    SingleChoice { selected_option: Option<usize> },
    /// Ascending, duplicate-free option indices.
    MultipleChoice { selected_options: Vec<usize> },
    TextInput { value: String },
    CodeInput { value: String },
    /// Row `i` of `group_one` is paired with row `i` of `group_two`.
    Conformity {
        group_one: Vec<String>,
        group_two: Vec<String>,
    },
    Ordering { ordering: Vec<String> },
    Classification { groups: Vec<ClassificationGroup> },
}

impl QuestionState {
    /// The question type this state belongs to.
    pub fn kind(&self) -> QuestionType {
        match self {
            QuestionState::SingleChoice { .. } => QuestionType::SingleChoice,
            QuestionState::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionState::TextInput { .. } => QuestionType::TextInput,
            QuestionState::CodeInput { .. } => QuestionType::CodeInput,
            QuestionState::Conformity { .. } => QuestionType::Conformity,
            QuestionState::Ordering { .. } => QuestionType::Ordering,
            QuestionState::Classification { .. } => QuestionType::Classification,
        }
    }
}

/// A test: the questions one attempt walks through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Overrides the configured attempt duration.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn question(&self, id: u64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// The serialized submission unit for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: serde_json::Value,
    #[serde(rename = "isEmpty")]
    pub is_empty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_display_and_parse() {
        assert_eq!(QuestionType::SingleChoice.to_string(), "single_choice");
        assert_eq!(QuestionType::Classification.to_string(), "classification");
        assert_eq!(
            "multiple-choice".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert_eq!("Code".parse::<QuestionType>().unwrap(), QuestionType::CodeInput);
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn unknown_type_deserializes_to_unknown() {
        let q: Question = serde_json::from_str(r#"{"id": 1, "type": "essay"}"#).unwrap();
        assert_eq!(q.kind, QuestionType::Unknown);
        assert!(q.options.is_empty());
    }

    #[test]
    fn selected_accepts_flag_or_count() {
        let o: QuestionOption = serde_json::from_str(r#"{"selected": true}"#).unwrap();
        assert!(o.is_selected());
        let o: QuestionOption = serde_json::from_str(r#"{"selected": 2}"#).unwrap();
        assert!(o.is_selected());
        let o: QuestionOption = serde_json::from_str(r#"{"selected": 0}"#).unwrap();
        assert!(!o.is_selected());
        let o: QuestionOption = serde_json::from_str(r#"{"option": "A"}"#).unwrap();
        assert!(!o.is_selected());
    }

    #[test]
    fn prefilled_input_skips_empty() {
        let q = Question::new(
            1,
            QuestionType::TextInput,
            vec![
                QuestionOption {
                    input: Some(String::new()),
                    ..Default::default()
                },
                QuestionOption {
                    input: Some("42".into()),
                    ..Default::default()
                },
            ],
        );
        assert_eq!(q.prefilled_input(), Some("42"));
        assert_eq!(
            Question::new(2, QuestionType::TextInput, vec![]).prefilled_input(),
            None
        );
    }

    #[test]
    fn answer_result_wire_names() {
        let result = AnswerResult {
            answer: serde_json::json!(-1),
            is_empty: true,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"answer": -1, "isEmpty": true}));
    }

    #[test]
    fn state_reports_its_kind() {
        let state = QuestionState::Ordering { ordering: vec![] };
        assert_eq!(state.kind(), QuestionType::Ordering);
    }
}
