//! Numbered menus and the yes/no confirmation.

use tracing::debug;

use eplaunch_core::{LaunchError, PromptProvider, Result};

pub const INVALID_SELECTION: &str = "Invalid selection. Please try again.";
pub const ABORTED: &str = "Aborted by user.";

/// Render `options` as a 1-indexed menu under `label`.
pub fn render_menu(label: &str, options: &[String]) -> String {
    let mut out = format!("{label}:");
    for (i, option) in options.iter().enumerate() {
        out.push_str(&format!("\n  {}) {}", i + 1, option));
    }
    out
}

/// Map a typed line to a zero-based option index.
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

/// Show a numbered menu and keep asking until a valid number is entered.
pub fn prompt_select<'a>(
    prompt: &mut dyn PromptProvider,
    label: &str,
    options: &'a [String],
) -> Result<&'a str> {
    if options.is_empty() {
        return Err(LaunchError::Config(format!("nothing to choose from: {label}")));
    }
    prompt.show(&render_menu(label, options))?;
    loop {
        let line = prompt.read_line(&format!("{label} (1-{}): ", options.len()))?;
        match parse_choice(&line, options.len()) {
            Some(idx) => {
                debug!(label, choice = idx + 1, "menu selection");
                return Ok(&options[idx]);
            }
            None => prompt.show(INVALID_SELECTION)?,
        }
    }
}

/// Only a lone `y` or `Y` counts as yes.
pub fn is_affirmative(input: &str) -> bool {
    matches!(input, "y" | "Y")
}

/// Print `summary` and ask to proceed.
pub fn confirm(prompt: &mut dyn PromptProvider, summary: &str) -> Result<bool> {
    prompt.show(summary)?;
    let line = prompt.read_line("Proceed? (y/n): ")?;
    Ok(is_affirmative(&line))
}
