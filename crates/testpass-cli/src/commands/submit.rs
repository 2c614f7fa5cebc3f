//! The `testpass submit` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use testpass_core::config::load_config_from;
use testpass_core::interaction::QuestionAction;

/// A scripted run of user actions.
#[derive(Debug, Deserialize)]
struct ActionScript {
    #[serde(default)]
    steps: Vec<ScriptStep>,
}

/// One action aimed at one question.
#[derive(Debug, Deserialize)]
struct ScriptStep {
    question: u64,
    #[serde(flatten)]
    action: QuestionAction,
}

fn load_script(path: &Path) -> Result<ActionScript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read action script: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse action script: {}", path.display()))
}

pub fn execute(
    question_set_path: PathBuf,
    actions_path: PathBuf,
    seed: Option<u64>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let set = super::load_single_set(&question_set_path)?;
    let script = load_script(&actions_path)?;

    let mut session = super::start_attempt(&set, seed, &config);

    let mut changed = 0usize;
    for (index, step) in script.steps.into_iter().enumerate() {
        let question = set
            .question(step.question)
            .with_context(|| format!("step {}: no question with id {}", index + 1, step.question))?;
        // Revisiting a question must not reshuffle it.
        if session.activate(question).is_none() {
            tracing::warn!(
                "step {}: question {} has an unknown type, action skipped",
                index + 1,
                question.id
            );
            continue;
        }
        if session
            .apply(question.id, step.action)
            .with_context(|| format!("step {}", index + 1))?
        {
            changed += 1;
        }
    }

    let unanswered = session.unanswered(&set.questions);
    eprintln!(
        "Applied {changed} change(s); {} of {} question(s) unanswered",
        unanswered.len(),
        set.questions.len()
    );
    for question in &unanswered {
        eprintln!("  unanswered: #{} (id {})", question.number, question.id);
    }

    let submission = session.submission(&set.questions);
    let json = serde_json::to_string_pretty(&submission).context("failed to serialize submission")?;

    let path = match output {
        Some(path) if path.as_os_str() == "-" => {
            println!("{json}");
            return Ok(());
        }
        Some(path) => path,
        None => config
            .output_dir
            .join(format!("{}.json", session.attempt_id())),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write submission to {}", path.display()))?;
    eprintln!("Submission saved to: {}", path.display());

    Ok(())
}
