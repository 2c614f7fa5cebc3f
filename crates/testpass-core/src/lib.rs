//! testpass-core: the question engine behind a test pass.
//!
//! Given quiz questions of mixed types, this crate builds the initial answer
//! state (shuffling puzzle-style questions), applies discrete user actions to
//! it, and turns the current state into a submission payload.

pub mod builder;
pub mod config;
pub mod error;
pub mod extractor;
pub mod interaction;
pub mod model;
pub mod parser;
pub mod random;
pub mod reorder;
pub mod session;
pub mod timer;

pub use builder::build_initial_state;
pub use error::EngineError;
pub use extractor::build_answer_result;
pub use interaction::{DragSource, DropTarget, QuestionAction, QuestionSession};
pub use model::{
    AnswerResult, ClassificationGroup, Question, QuestionOption, QuestionSet, QuestionState,
    QuestionType, Selected,
};
pub use reorder::{move_between_groups, reorder};
pub use session::{AttemptSession, AttemptSubmission, QuestionAnswer};
pub use timer::{format_remaining_time, RemainingTime};
