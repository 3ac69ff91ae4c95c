/// Line-oriented terminal interaction used by the launch workflow.
///
/// Implementations block until a full line is available. End of input is
/// reported as [`LaunchError::Interrupted`](crate::LaunchError::Interrupted)
/// so menu loops cannot spin on a closed stdin.
pub trait PromptProvider {
    /// Print a block of text (menu, summary, notice).
    fn show(&mut self, text: &str) -> crate::Result<()>;

    /// Print `prompt` and read one line, without its line terminator.
    fn read_line(&mut self, prompt: &str) -> crate::Result<String>;
}

