use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};
use media_shelf_models::{MediaType, Rating};
use std::io::IsTerminal;

/// Prompts only make sense when a person is on the other end of stdin.
pub fn can_prompt() -> bool {
    std::io::stdin().is_terminal()
}

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact().map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for an optional value; blank input means "none"
pub fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let value = prompt_string(prompt, None)?;
    let trimmed = value.trim();
    Ok(if trimmed.is_empty() { None } else { Some(trimmed.to_string()) })
}

/// Prompt until a non-blank value is entered
pub fn prompt_required(prompt: &str, output: &Output) -> Result<String> {
    loop {
        let value = prompt_string(prompt, None)?;
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        output.error(format!("{} cannot be empty.", prompt));
    }
}

pub fn prompt_media_type(prompt: &str) -> Result<MediaType> {
    let labels: Vec<&str> = MediaType::ALL.iter().map(|t| t.as_str()).collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))?;
    Ok(MediaType::ALL[index])
}

/// Prompt for a 1-5 rating, re-asking on anything else
pub fn prompt_rating(prompt: &str, output: &Output) -> Result<Rating> {
    loop {
        let input_str = prompt_string(prompt, None)?;
        match input_str.parse::<Rating>() {
            Ok(rating) => return Ok(rating),
            Err(e) => {
                output.error(format!("Invalid rating: {}", e));
                continue;
            }
        }
    }
}

/// Prompt for yes/no with optional default and output handler
pub fn prompt_yes_no(prompt: &str, default: Option<bool>, output: &Output) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder.interact().map_err(|e| {
        output.error(format!("Failed to read confirmation: {}", e));
        color_eyre::eyre::eyre!("Failed to read confirmation: {}", e)
    })
}
