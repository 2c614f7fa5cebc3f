//! Initial answer-state construction.
//!
//! Choice and text questions are restored from the server-side state carried
//! on their options. Conformity, ordering and classification questions are
//! shuffled so the correct arrangement is never shown by default.
//!
//! The result must be built once per question activation and kept; calling
//! this again draws a fresh arrangement. [`crate::session::AttemptSession`]
//! takes care of that.

use rand::Rng;

use crate::model::{ClassificationGroup, Question, QuestionOption, QuestionState, QuestionType};
use crate::random::{random_choice, random_shuffle};

/// Build the initial [`QuestionState`] for a question.
///
/// Returns `None` for [`QuestionType::Unknown`], which has no state.
pub fn build_initial_state<R: Rng + ?Sized>(
    question: &Question,
    rng: &mut R,
) -> Option<QuestionState> {
    let state = match question.kind {
        QuestionType::SingleChoice => QuestionState::SingleChoice {
            selected_option: question.options.iter().position(QuestionOption::is_selected),
        },
        QuestionType::MultipleChoice => QuestionState::MultipleChoice {
            selected_options: question
                .options
                .iter()
                .enumerate()
                .filter(|(_, o)| o.is_selected())
                .map(|(i, _)| i)
                .collect(),
        },
        QuestionType::TextInput => QuestionState::TextInput {
            value: question.prefilled_input().unwrap_or_default().to_string(),
        },
        QuestionType::CodeInput => QuestionState::CodeInput {
            value: question.prefilled_input().unwrap_or_default().to_string(),
        },
        QuestionType::Conformity => {
            let mut group_one: Vec<String> =
                question.options.iter().map(|o| o.main().to_string()).collect();
            let mut group_two: Vec<String> = question
                .options
                .iter()
                .map(|o| o.secondary().to_string())
                .collect();
            // Independent draws: the starting rows carry no pairing.
            random_shuffle(rng, &mut group_one);
            random_shuffle(rng, &mut group_two);
            QuestionState::Conformity {
                group_one,
                group_two,
            }
        }
        QuestionType::Ordering => {
            let mut ordering: Vec<String> = question
                .options
                .iter()
                .enumerate()
                .map(|(i, o)| ordering_label(o, i))
                .collect();
            random_shuffle(rng, &mut ordering);
            QuestionState::Ordering { ordering }
        }
        QuestionType::Classification => QuestionState::Classification {
            groups: scatter_into_groups(&question.options, rng),
        },
        QuestionType::Unknown => {
            tracing::warn!(
                "question {} has an unknown type, no state built",
                question.id
            );
            return None;
        }
    };

    tracing::debug!(
        "built initial state for question {} ({})",
        question.id,
        question.kind
    );
    Some(state)
}

/// Label shown for an ordering item: the first non-empty of `option`,
/// `option_secondary`, `option_main`, else `#<index>`.
pub fn ordering_label(option: &QuestionOption, index: usize) -> String {
    [&option.option, &option.option_secondary, &option.option_main]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("#{index}"))
}

/// Distinct non-empty `option_main` values in first-seen order.
pub fn classification_keys(options: &[QuestionOption]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for option in options {
        let key = option.main();
        if !key.is_empty() && !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Put every option's item into a uniformly random group.
fn scatter_into_groups<R: Rng + ?Sized>(
    options: &[QuestionOption],
    rng: &mut R,
) -> Vec<ClassificationGroup> {
    let keys = classification_keys(options);
    let mut groups: Vec<ClassificationGroup> = keys
        .iter()
        .map(|key| ClassificationGroup::new(key.as_str()))
        .collect();

    for (index, option) in options.iter().enumerate() {
        let key = match random_choice(rng, &keys) {
            Ok(key) => key.clone(),
            // No keys at all: the option becomes its own group.
            Err(_) => ordering_label(option, index),
        };
        let item = classification_item(option, index);

        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.values.push(item),
            None => groups.push(ClassificationGroup {
                key,
                values: vec![item],
            }),
        }
    }

    groups
}

fn classification_item(option: &QuestionOption, index: usize) -> String {
    [&option.option_secondary, &option.option]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("#{index}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Selected;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn choice(label: &str, selected: bool) -> QuestionOption {
        QuestionOption {
            option: Some(label.into()),
            selected: Selected::Flag(selected),
            ..Default::default()
        }
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    #[test]
    fn single_choice_picks_first_selected() {
        let mut rng = StdRng::seed_from_u64(0);
        for k in 0..4 {
            let options = (0..4).map(|i| choice(&format!("o{i}"), i == k)).collect();
            let q = Question::new(1, QuestionType::SingleChoice, options);
            assert_eq!(
                build_initial_state(&q, &mut rng),
                Some(QuestionState::SingleChoice {
                    selected_option: Some(k)
                })
            );
        }

        let q = Question::new(
            2,
            QuestionType::SingleChoice,
            vec![choice("a", false), choice("b", false)],
        );
        assert_eq!(
            build_initial_state(&q, &mut rng),
            Some(QuestionState::SingleChoice {
                selected_option: None
            })
        );
    }

    #[test]
    fn multiple_choice_collects_selected_in_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let q = Question::new(
            1,
            QuestionType::MultipleChoice,
            vec![
                choice("a", true),
                choice("b", false),
                QuestionOption {
                    selected: Selected::Count(3),
                    ..Default::default()
                },
                choice("d", true),
            ],
        );
        assert_eq!(
            build_initial_state(&q, &mut rng),
            Some(QuestionState::MultipleChoice {
                selected_options: vec![0, 2, 3]
            })
        );
    }

    #[test]
    fn text_and_code_use_prefilled_input() {
        let mut rng = StdRng::seed_from_u64(0);
        let prefilled = QuestionOption {
            input: Some("fn main() {}".into()),
            ..Default::default()
        };
        let q = Question::new(1, QuestionType::CodeInput, vec![prefilled]);
        assert_eq!(
            build_initial_state(&q, &mut rng),
            Some(QuestionState::CodeInput {
                value: "fn main() {}".into()
            })
        );

        let q = Question::new(2, QuestionType::TextInput, vec![]);
        assert_eq!(
            build_initial_state(&q, &mut rng),
            Some(QuestionState::TextInput {
                value: String::new()
            })
        );
    }

    #[test]
    fn conformity_shuffles_each_side_independently() {
        let options: Vec<QuestionOption> = (0..6)
            .map(|i| QuestionOption::paired(format!("L{i}"), format!("R{i}")))
            .collect();
        let q = Question::new(1, QuestionType::Conformity, options);

        let mut saw_misaligned = false;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let Some(QuestionState::Conformity {
                group_one,
                group_two,
            }) = build_initial_state(&q, &mut rng)
            else {
                panic!("expected conformity state");
            };
            assert_eq!(
                sorted(group_one.clone()),
                (0..6).map(|i| format!("L{i}")).collect::<Vec<_>>()
            );
            assert_eq!(
                sorted(group_two.clone()),
                (0..6).map(|i| format!("R{i}")).collect::<Vec<_>>()
            );
            let aligned = group_one
                .iter()
                .zip(&group_two)
                .all(|(l, r)| l[1..] == r[1..]);
            saw_misaligned |= !aligned;
        }
        assert!(saw_misaligned);
    }

    #[test]
    fn ordering_labels_fall_back_in_order() {
        let with_option = QuestionOption {
            option: Some("first".into()),
            option_secondary: Some("ignored".into()),
            ..Default::default()
        };
        assert_eq!(ordering_label(&with_option, 0), "first");

        let secondary_only = QuestionOption {
            option: Some(String::new()),
            option_secondary: Some("second".into()),
            option_main: Some("main".into()),
            ..Default::default()
        };
        assert_eq!(ordering_label(&secondary_only, 1), "second");

        let main_only = QuestionOption {
            option_main: Some("main".into()),
            ..Default::default()
        };
        assert_eq!(ordering_label(&main_only, 2), "main");

        assert_eq!(ordering_label(&QuestionOption::default(), 3), "#3");
    }

    #[test]
    fn ordering_is_a_permutation() {
        let options = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|l| QuestionOption::labelled(*l))
            .collect();
        let q = Question::new(1, QuestionType::Ordering, options);
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let Some(QuestionState::Ordering { ordering }) = build_initial_state(&q, &mut rng)
            else {
                panic!("expected ordering state");
            };
            assert_eq!(sorted(ordering), vec!["a", "b", "c", "d", "e"]);
        }
    }

    #[test]
    fn classification_keeps_every_item_and_every_key() {
        let q = Question::new(
            1,
            QuestionType::Classification,
            vec![
                QuestionOption::paired("fruit", "apple"),
                QuestionOption::paired("veg", "carrot"),
                QuestionOption::paired("fruit", "pear"),
                QuestionOption::paired("veg", "leek"),
                QuestionOption::paired("grain", "rye"),
            ],
        );
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let Some(QuestionState::Classification { groups }) =
                build_initial_state(&q, &mut rng)
            else {
                panic!("expected classification state");
            };
            let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
            assert_eq!(keys, vec!["fruit", "veg", "grain"]);
            let items = sorted(groups.into_iter().flat_map(|g| g.values).collect());
            assert_eq!(items, vec!["apple", "carrot", "leek", "pear", "rye"]);
        }
    }

    #[test]
    fn classification_without_keys_groups_by_option() {
        let mut rng = StdRng::seed_from_u64(1);
        let q = Question::new(
            1,
            QuestionType::Classification,
            vec![
                QuestionOption {
                    option: Some("solo".into()),
                    option_secondary: Some("item".into()),
                    ..Default::default()
                },
                QuestionOption::default(),
            ],
        );
        let Some(QuestionState::Classification { groups }) = build_initial_state(&q, &mut rng)
        else {
            panic!("expected classification state");
        };
        assert_eq!(
            groups,
            vec![
                ClassificationGroup {
                    key: "solo".into(),
                    values: vec!["item".into()],
                },
                ClassificationGroup {
                    key: "#1".into(),
                    values: vec!["#1".into()],
                },
            ]
        );
    }

    #[test]
    fn unknown_type_has_no_state() {
        let mut rng = StdRng::seed_from_u64(0);
        let q = Question::new(1, QuestionType::Unknown, vec![choice("a", true)]);
        assert_eq!(build_initial_state(&q, &mut rng), None);
    }
}
