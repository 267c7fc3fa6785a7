//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Input};

/// Ask for a dataset location. Pressing enter keeps `default`.
pub fn prompt_source(default: &str) -> Result<String> {
    let location: String = Input::new()
        .with_prompt("Dataset URL or path")
        .default(default.to_string())
        .interact_text()?;
    let trimmed = location.trim();
    Ok(if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    })
}

/// Ask whether to trigger another run
pub fn confirm_rerun(last_failed: bool) -> Result<bool> {
    let message = if last_failed {
        "The run failed. Try again?"
    } else {
        "Run the analysis again?"
    };
    Confirm::new()
        .with_prompt(message)
        .default(last_failed)
        .interact()
        .map_err(Into::into)
}
