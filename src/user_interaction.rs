// user_interaction.rs
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
#[cfg(test)]
use std::collections::VecDeque;

pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[91m";
pub const GREEN: &str = "\x1b[92m";
pub const BOLD_ORANGE: &str = "\x1b[1;38;5;208m";
pub const ORANGE: &str = "\x1b[0;38;5;208m";
pub const RESET: &str = "\x1b[0m";

/// Where the driver gets its answers from. `None` means the input is gone for good.
pub trait InputSource {
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Terminal input with line editing and history.
pub struct ConsoleInput {
    editor: DefaultEditor,
}

impl ConsoleInput {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(ConsoleInput {
            editor: DefaultEditor::new()?,
        })
    }
}

impl InputSource for ConsoleInput {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        let custom_prompt = format!("{}@BIKEbro: {}{}", BOLD_ORANGE, prompt, RESET);

        match self.editor.readline(&custom_prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                Some(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Input interrupted or end of file reached.");
                None
            }
            Err(err) => {
                println!("Error reading line: {:?}", err);
                None
            }
        }
    }
}

/// Canned answers, handed out in order. Used to drive the prompt loop without a terminal.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    pub prompts_seen: Vec<String>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts_seen: Vec::new(),
        }
    }
}

#[cfg(test)]
impl InputSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts_seen.push(prompt.to_string());
        self.lines.pop_front()
    }
}

/// Prints a message in bold orange font.
pub fn print_insight(message: &str) {
    println!("{}@BIKEbro: {}{}", BOLD_ORANGE, message, RESET);
}

/// Indented, non-bold variant for follow-up hints.
pub fn print_insight_level_2(message: &str) {
    println!("  {}@LILbro: {}{}", ORANGE, message, RESET);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_replays_lines_then_runs_dry() {
        let mut input = ScriptedInput::new(["chicago", "no"]);
        assert_eq!(input.read_line("city? ").as_deref(), Some("chicago"));
        assert_eq!(input.read_line("again? ").as_deref(), Some("no"));
        assert_eq!(input.read_line("again? "), None);
        assert_eq!(input.prompts_seen, vec!["city? ", "again? ", "again? "]);
    }
}
