//! Terminal implementations of the interaction abstraction.

use std::io::{BufRead, Write};

use mailblast_core::Interact;

/// Prompts on stdout and reads answers from stdin. EOF cancels.
#[derive(Debug, Default)]
pub struct TermInteract;

impl TermInteract {
    fn read_line(prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_owned()),
        }
    }
}

impl Interact for TermInteract {
    fn confirm(&mut self, question: &str) -> bool {
        Self::read_line(&format!("{question} [y/N] "))
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn input(&mut self, label: &str) -> Option<String> {
        Self::read_line(&format!("{label}: "))
    }
}

/// Non-interactive responder for `--yes` runs: confirms everything and
/// supplies no input, so flows that genuinely need a value still fail
/// instead of guessing one.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Interact for AssumeYes {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }

    fn input(&mut self, _label: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assume_yes_confirms_but_supplies_nothing() {
        let mut ui = AssumeYes;
        assert!(ui.confirm("really?"));
        assert_eq!(ui.input("email"), None);
    }
}
