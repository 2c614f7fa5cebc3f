//! The `testpass init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create testpass.toml
    if std::path::Path::new("testpass.toml").exists() {
        println!("testpass.toml already exists, skipping.");
    } else {
        std::fs::write("testpass.toml", SAMPLE_CONFIG)?;
        println!("Created testpass.toml");
    }

    // Create example question set and action script
    std::fs::create_dir_all("question-sets")?;
    for (path, content) in [
        ("question-sets/example.toml", EXAMPLE_QUESTION_SET),
        ("question-sets/example-actions.toml", EXAMPLE_ACTIONS),
    ] {
        if std::path::Path::new(path).exists() {
            println!("{path} already exists, skipping.");
        } else {
            std::fs::write(path, content)?;
            println!("Created {path}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Run: testpass validate --question-set question-sets/example.toml");
    println!("  2. Run: testpass preview --question-set question-sets/example.toml");
    println!(
        "  3. Run: testpass submit --question-set question-sets/example.toml \
         --actions question-sets/example-actions.toml"
    );

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# testpass configuration

# Fixed seed for reproducible shuffles; remove to draw a new one per attempt.
seed = 2024
time_limit_secs = 1800
output_dir = "./testpass-results"
"#;

const EXAMPLE_QUESTION_SET: &str = r#"[question_set]
id = "example"
name = "Example Test"
description = "One question of every kind"
time_limit_secs = 900

[[questions]]
id = 1
body = "Which planet is known as the Red Planet?"
type = "single_choice"

[[questions.options]]
option = "Venus"

[[questions.options]]
option = "Mars"

[[questions.options]]
option = "Jupiter"

[[questions]]
id = 2
body = "Which of these are prime numbers?"
type = "multiple_choice"

[[questions.options]]
option = "2"

[[questions.options]]
option = "4"

[[questions.options]]
option = "7"

[[questions]]
id = 3
body = "What is the chemical symbol for gold?"
type = "text_input"

[[questions]]
id = 4
body = "Write an expression that adds 2 and 3."
type = "code_input"

[[questions.options]]
input = "2 + "

[[questions]]
id = 5
body = "Match each country with its capital."
type = "conformity"

[[questions.options]]
option_main = "France"
option_secondary = "Paris"

[[questions.options]]
option_main = "Japan"
option_secondary = "Tokyo"

[[questions.options]]
option_main = "Kenya"
option_secondary = "Nairobi"

[[questions]]
id = 6
body = "Order these from smallest to largest."
type = "ordering"

[[questions.options]]
option = "Atom"

[[questions.options]]
option = "Cell"

[[questions.options]]
option = "Planet"

[[questions]]
id = 7
body = "Sort each animal into its class."
type = "classification"

[[questions.options]]
option_main = "Mammal"
option_secondary = "Whale"

[[questions.options]]
option_main = "Bird"
option_secondary = "Penguin"

[[questions.options]]
option_main = "Mammal"
option_secondary = "Bat"
"#;

const EXAMPLE_ACTIONS: &str = r#"# Actions replayed by `testpass submit`, in order.

[[steps]]
question = 1
action = "select"
index = 1

[[steps]]
question = 2
action = "toggle"
index = 0

[[steps]]
question = 2
action = "toggle"
index = 2

[[steps]]
question = 3
action = "set_text"
value = "Au"

[[steps]]
question = 6
action = "pick"
source = { list = 0, item = 0 }

[[steps]]
question = 6
action = "drop"
target = { list = 0, item = 2 }

[[steps]]
question = 7
action = "pick"
source = { list = 0, item = 0 }

[[steps]]
question = 7
action = "drop"
target = { list = 1 }
"#;
