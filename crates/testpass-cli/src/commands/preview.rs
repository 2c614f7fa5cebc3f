//! The `testpass preview` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use testpass_core::config::load_config_from;
use testpass_core::model::QuestionState;
use testpass_core::timer::format_remaining_time;

pub fn execute(
    question_set_path: PathBuf,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let set = super::load_single_set(&question_set_path)?;
    let session = super::start_attempt(&set, seed, &config);

    let limit_secs = set.time_limit_secs.unwrap_or(config.time_limit_secs);
    println!(
        "{} ({} questions, time limit {}, seed {})",
        set.name,
        set.questions.len(),
        format_remaining_time(limit_secs.saturating_mul(1000).min(i64::MAX as u64) as i64),
        session.seed()
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "ID", "Type", "Initial state", "Empty"]);

    for question in &set.questions {
        let state = session
            .get(question.id)
            .map(|s| describe_state(s.state()))
            .unwrap_or_else(|| "-".to_string());
        let empty = if session.answer(question).is_empty {
            "yes"
        } else {
            "no"
        };
        table.add_row(vec![
            Cell::new(question.number),
            Cell::new(question.id),
            Cell::new(question.kind),
            Cell::new(state),
            Cell::new(empty),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// One-line rendering of an answer state.
fn describe_state(state: &QuestionState) -> String {
    match state {
        QuestionState::SingleChoice { selected_option } => match selected_option {
            Some(index) => format!("selected {index}"),
            None => "nothing selected".to_string(),
        },
        QuestionState::MultipleChoice { selected_options } => {
            format!("selected {selected_options:?}")
        }
        QuestionState::TextInput { value } | QuestionState::CodeInput { value } => {
            format!("{value:?}")
        }
        QuestionState::Conformity {
            group_one,
            group_two,
        } => group_one
            .iter()
            .zip(group_two)
            .map(|(left, right)| format!("{left} = {right}"))
            .collect::<Vec<_>>()
            .join("; "),
        QuestionState::Ordering { ordering } => ordering.join(" > "),
        QuestionState::Classification { groups } => groups
            .iter()
            .map(|g| format!("{}: [{}]", g.key, g.values.join(", ")))
            .collect::<Vec<_>>()
            .join(" "),
    }
}
