pub mod init;
pub mod preview;
pub mod remaining;
pub mod submit;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use uuid::Uuid;

use testpass_core::config::TestpassConfig;
use testpass_core::model::QuestionSet;
use testpass_core::parser;
use testpass_core::session::AttemptSession;

/// Load exactly one question set from a file.
fn load_single_set(path: &Path) -> Result<QuestionSet> {
    anyhow::ensure!(
        !path.is_dir(),
        "expected a question set file, got a directory: {}",
        path.display()
    );
    parser::parse_question_set(path)
}

/// Start an attempt and activate every question in set order, so the same
/// seed always yields the same arrangement.
fn start_attempt(set: &QuestionSet, seed: Option<u64>, config: &TestpassConfig) -> AttemptSession {
    let mut session = match seed.or(config.seed) {
        Some(seed) => AttemptSession::with_seed(Uuid::new_v4(), seed),
        None => AttemptSession::new(),
    };
    for question in &set.questions {
        if session.activate(question).is_none() {
            tracing::warn!("question {} skipped: unknown type", question.id);
        }
    }
    tracing::info!(
        "attempt {} on '{}' (seed {})",
        session.attempt_id(),
        set.name,
        session.seed()
    );
    session
}
