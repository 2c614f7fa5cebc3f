//! TOML question-set parser.
//!
//! Loads question sets from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::builder::classification_keys;
use crate::model::{Question, QuestionOption, QuestionSet, QuestionType, Selected};

/// Intermediate TOML structure for parsing question-set files.
#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    question_set: TomlQuestionSetHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    time_limit_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: u64,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    body: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    options: Vec<TomlOption>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    #[serde(default)]
    option: Option<String>,
    #[serde(default)]
    option_main: Option<String>,
    #[serde(default)]
    option_secondary: Option<String>,
    #[serde(default)]
    selected: Option<Selected>,
    #[serde(default)]
    input: Option<String>,
}

/// Parse a single TOML file into a `QuestionSet`.
pub fn parse_question_set(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question set file: {}", path.display()))?;

    parse_question_set_str(&content, path)
}

/// Parse a TOML string into a `QuestionSet` (useful for testing).
///
/// Unrecognised question types are kept as [`QuestionType::Unknown`] so the
/// rest of the set stays usable; [`validate_question_set`] reports them.
pub fn parse_question_set_str(content: &str, source_path: &Path) -> Result<QuestionSet> {
    let parsed: TomlQuestionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(position, q)| {
            let kind = q.kind.parse().unwrap_or_else(|e: String| {
                tracing::warn!("question {}: {}", q.id, e);
                QuestionType::Unknown
            });

            let options = q
                .options
                .into_iter()
                .map(|o| QuestionOption {
                    option: o.option,
                    option_main: o.option_main,
                    option_secondary: o.option_secondary,
                    selected: o.selected.unwrap_or_default(),
                    input: o.input,
                })
                .collect();

            Question {
                id: q.id,
                number: q.number.unwrap_or(position as u32 + 1),
                body: q.body,
                kind,
                options,
            }
        })
        .collect();

    Ok(QuestionSet {
        id: parsed.question_set.id,
        name: parsed.question_set.name,
        description: parsed.question_set.description,
        time_limit_secs: parsed.question_set.time_limit_secs,
        questions,
    })
}

/// Recursively load all `.toml` question-set files from a directory.
pub fn load_question_directory(dir: &Path) -> Result<Vec<QuestionSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_question_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    sets.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(sets)
}

/// Load a file, or every set under a directory.
pub fn load_question_sets(path: &Path) -> Result<Vec<QuestionSet>> {
    if path.is_dir() {
        load_question_directory(path)
    } else {
        Ok(vec![parse_question_set(path)?])
    }
}

/// A warning from question-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<u64>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: u64, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id),
            message: message.into(),
        }
    }
}

/// Validate a question set for common issues.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "question set has no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &set.questions {
        if !seen_ids.insert(question.id) {
            warnings.push(ValidationWarning::question(
                question.id,
                format!("duplicate question ID: {}", question.id),
            ));
        }
    }

    for question in &set.questions {
        warnings.extend(validate_question(question));
    }

    warnings
}

fn validate_question(question: &Question) -> Vec<ValidationWarning> {
    let id = question.id;
    let mut warnings = Vec::new();

    if question.body.trim().is_empty() {
        warnings.push(ValidationWarning::question(id, "body is empty"));
    }

    let options = &question.options;

    match question.kind {
        QuestionType::Unknown => {
            warnings.push(ValidationWarning::question(
                id,
                "unknown question type, answers will always be empty",
            ));
        }
        QuestionType::SingleChoice | QuestionType::MultipleChoice => {
            if options.is_empty() {
                warnings.push(ValidationWarning::question(id, "choice question has no options"));
            }
            let unlabelled = options.iter().filter(|o| is_blank(&o.option)).count();
            if unlabelled > 0 {
                warnings.push(ValidationWarning::question(
                    id,
                    format!("{unlabelled} option(s) without a label"),
                ));
            }
            let preselected = options.iter().filter(|o| o.is_selected()).count();
            if question.kind == QuestionType::SingleChoice && preselected > 1 {
                warnings.push(ValidationWarning::question(
                    id,
                    format!("{preselected} options pre-selected, only the first is used"),
                ));
            }
        }
        QuestionType::TextInput | QuestionType::CodeInput => {}
        QuestionType::Conformity => {
            if options.is_empty() {
                warnings.push(ValidationWarning::question(id, "conformity question has no pairs"));
            }
            let incomplete = options
                .iter()
                .filter(|o| o.main().is_empty() || o.secondary().is_empty())
                .count();
            if incomplete > 0 {
                warnings.push(ValidationWarning::question(
                    id,
                    format!("{incomplete} pair(s) missing option_main or option_secondary"),
                ));
            }
        }
        QuestionType::Ordering => {
            if options.len() < 2 {
                warnings.push(ValidationWarning::question(
                    id,
                    "ordering question needs at least two items",
                ));
            }
            let unlabelled = options
                .iter()
                .filter(|o| {
                    is_blank(&o.option) && is_blank(&o.option_secondary) && is_blank(&o.option_main)
                })
                .count();
            if unlabelled > 0 {
                warnings.push(ValidationWarning::question(
                    id,
                    format!("{unlabelled} item(s) without a label, shown as placeholders"),
                ));
            }
        }
        QuestionType::Classification => {
            if classification_keys(options).is_empty() {
                warnings.push(ValidationWarning::question(
                    id,
                    "classification question has no group keys (option_main)",
                ));
            }
            let unlabelled = options
                .iter()
                .filter(|o| is_blank(&o.option_secondary))
                .count();
            if unlabelled > 0 {
                warnings.push(ValidationWarning::question(
                    id,
                    format!("{unlabelled} item(s) missing option_secondary"),
                ));
            }
        }
    }

    warnings
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}
