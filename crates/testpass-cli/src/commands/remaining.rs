//! The `testpass remaining` command.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use testpass_core::timer::{format_remaining_time, remaining_millis};

pub fn execute(millis: Option<i64>, deadline: Option<String>) -> Result<()> {
    let millis = match (millis, deadline) {
        (Some(ms), _) => ms,
        (None, Some(deadline)) => {
            let deadline: DateTime<Utc> = DateTime::parse_from_rfc3339(&deadline)
                .with_context(|| format!("invalid RFC 3339 deadline: {deadline}"))?
                .with_timezone(&Utc);
            remaining_millis(deadline, Utc::now())
        }
        (None, None) => anyhow::bail!("either --millis or --deadline is required"),
    };

    println!("{}", format_remaining_time(millis));
    Ok(())
}
