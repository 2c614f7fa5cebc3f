//! Reducers for discrete user actions on one question.
//!
//! Dragging is modelled as two messages: a [`QuestionAction::Pick`] records
//! where the drag started, and the next [`QuestionAction::Drop`] performs the
//! move and clears the pick. Nothing here tracks pointers or rendering.

use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionState};
use crate::reorder::{move_between_groups, reorder};

/// Where a drag starts.
///
/// `list` selects the list being dragged from: always `0` for ordering,
/// `0`/`1` for the left/right column of a conformity question, the group
/// index for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSource {
    pub list: usize,
    pub item: usize,
}

/// Where a drag ends. Without an `item` the element goes to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub list: usize,
    #[serde(default)]
    pub item: Option<usize>,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum QuestionAction {
    /// Choose an option of a single-choice question.
    Select { index: usize },
    /// Flip an option of a multiple-choice question.
    Toggle { index: usize },
    /// Replace the text of a text or code question.
    SetText { value: String },
    Pick { source: DragSource },
    Drop { target: DropTarget },
    CancelDrag,
}

/// The live answer to the question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSession {
    state: QuestionState,
    option_count: usize,
    picked: Option<DragSource>,
}

impl QuestionSession {
    pub fn new(question: &Question, state: QuestionState) -> Self {
        Self {
            state,
            option_count: question.options.len(),
            picked: None,
        }
    }

    pub fn state(&self) -> &QuestionState {
        &self.state
    }

    /// The pending drag source, if a pick has not been dropped yet.
    pub fn picked(&self) -> Option<DragSource> {
        self.picked
    }

    /// Apply one action. Returns `true` if the answer state changed.
    pub fn apply(&mut self, action: QuestionAction) -> bool {
        let next = match action {
            QuestionAction::Pick { source } => {
                self.picked = Some(source);
                return false;
            }
            QuestionAction::CancelDrag => {
                self.picked = None;
                return false;
            }
            QuestionAction::Drop { target } => match self.picked.take() {
                Some(source) => drop_item(&self.state, source, target),
                None => None,
            },
            QuestionAction::Select { index } => select(&self.state, index, self.option_count),
            QuestionAction::Toggle { index } => toggle(&self.state, index, self.option_count),
            QuestionAction::SetText { value } => set_text(&self.state, value),
        };

        match next {
            Some(next) if next != self.state => {
                self.state = next;
                true
            }
            Some(_) => false,
            None => {
                tracing::warn!("action ignored for {} state", self.state.kind());
                false
            }
        }
    }
}

fn select(state: &QuestionState, index: usize, option_count: usize) -> Option<QuestionState> {
    match state {
        QuestionState::SingleChoice { .. } if index < option_count => {
            Some(QuestionState::SingleChoice {
                selected_option: Some(index),
            })
        }
        _ => None,
    }
}

fn toggle(state: &QuestionState, index: usize, option_count: usize) -> Option<QuestionState> {
    match state {
        QuestionState::MultipleChoice { selected_options } if index < option_count => {
            let mut selected_options = selected_options.clone();
            match selected_options.binary_search(&index) {
                Ok(pos) => {
                    selected_options.remove(pos);
                }
                Err(pos) => selected_options.insert(pos, index),
            }
            Some(QuestionState::MultipleChoice { selected_options })
        }
        _ => None,
    }
}

fn set_text(state: &QuestionState, value: String) -> Option<QuestionState> {
    match state {
        QuestionState::TextInput { .. } => Some(QuestionState::TextInput { value }),
        QuestionState::CodeInput { .. } => Some(QuestionState::CodeInput { value }),
        _ => None,
    }
}

fn drop_item(
    state: &QuestionState,
    source: DragSource,
    target: DropTarget,
) -> Option<QuestionState> {
    match state {
        QuestionState::Ordering { ordering } if source.list == 0 && target.list == 0 => {
            let to = target.item.unwrap_or(ordering.len().saturating_sub(1));
            Some(QuestionState::Ordering {
                ordering: reorder(ordering, source.item, to),
            })
        }
        // Columns move independently; a row never crosses to the other side.
        QuestionState::Conformity {
            group_one,
            group_two,
        } if source.list == target.list => match source.list {
            0 => {
                let to = target.item.unwrap_or(group_one.len().saturating_sub(1));
                Some(QuestionState::Conformity {
                    group_one: reorder(group_one, source.item, to),
                    group_two: group_two.clone(),
                })
            }
            1 => {
                let to = target.item.unwrap_or(group_two.len().saturating_sub(1));
                Some(QuestionState::Conformity {
                    group_one: group_one.clone(),
                    group_two: reorder(group_two, source.item, to),
                })
            }
            _ => None,
        },
        QuestionState::Classification { groups } => Some(QuestionState::Classification {
            groups: move_between_groups(groups, source.list, source.item, target.list, target.item),
        }),
        _ => None,
    }
}
