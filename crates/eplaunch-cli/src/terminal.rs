use console::Term;
use dialoguer::{Input, theme::ColorfulTheme};
use std::io::{BufRead, BufReader, Stdin};

use eplaunch_core::{LaunchError, PromptProvider, Result};

/// Prompts on the controlling terminal.
///
/// Uses dialoguer's line editor when stdout is a TTY, and plain buffered
/// stdin otherwise so answers can be piped in.
pub struct TerminalPrompt<R = BufReader<Stdin>> {
    term: Term,
    theme: ColorfulTheme,
    interactive: bool,
    input: R,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        let term = Term::stdout();
        let interactive = term.is_term();
        Self {
            term,
            theme: ColorfulTheme::default(),
            interactive,
            input: BufReader::new(std::io::stdin()),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> TerminalPrompt<R> {
    /// Non-interactive prompt answering from `input` instead of stdin.
    pub fn piped(term: Term, input: R) -> Self {
        Self {
            term,
            theme: ColorfulTheme::default(),
            interactive: false,
            input,
        }
    }
}

impl<R: BufRead> PromptProvider for TerminalPrompt<R> {
    fn show(&mut self, text: &str) -> Result<()> {
        self.term.write_line(text)?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if self.interactive {
            // The theme draws its own separator after the prompt.
            let label = prompt.trim_end().trim_end_matches(':');
            return Input::<String>::with_theme(&self.theme)
                .with_prompt(label)
                .allow_empty(true)
                .interact_text_on(&self.term)
                .map_err(|e| LaunchError::Interrupted(e.to_string()));
        }

        self.term.write_str(prompt)?;
        self.term.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(LaunchError::Interrupted("stdin closed".into()));
        }
        Ok(strip_line_ending(&line).to_string())
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}
