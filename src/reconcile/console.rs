//! Console prompting for reconciliation decisions.
//!
//! Sentinel inputs (`exit`, `done`, empty) are interpreted here and mapped
//! to the tagged actions the reconciler consumes.

use super::{FolderAction, LabelAction, Prompter, ReviewAction};
use crate::store::AliasRecord;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Completion, Input, Select};

pub struct ConsolePrompter {
    theme: ColorfulTheme,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self { theme: ColorfulTheme::default() }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Tab completion over the working set passed in for the current prompt.
/// Completes only when the prefix is unambiguous.
struct PrefixCompletion<'a> {
    candidates: &'a [String],
}

impl Completion for PrefixCompletion<'_> {
    fn get(&self, input: &str) -> Option<String> {
        let mut matches = self.candidates.iter().filter(|c| c.starts_with(input));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.clone()),
            _ => None,
        }
    }
}

impl Prompter for ConsolePrompter {
    fn review(&mut self, record: &AliasRecord) -> Result<ReviewAction> {
        println!();
        println!("Alias {} already has an assignment", style(&record.email).bold());
        println!("  folder: {}", record.folder.as_deref().unwrap_or("none"));
        let labels =
            if record.labels.is_empty() { "none".to_string() } else { record.labels.join(", ") };
        println!("  labels: {labels}");

        let choice = Select::with_theme(&self.theme)
            .with_prompt("What now?")
            .default(0)
            .items(&["Keep as is", "Edit folder and labels", "Stop reconciling"])
            .interact()?;

        Ok(match choice {
            0 => ReviewAction::Keep,
            1 => ReviewAction::Edit,
            _ => ReviewAction::Stop,
        })
    }

    fn folder(&mut self, email: &str, candidates: &[String]) -> Result<FolderAction> {
        let completion = PrefixCompletion { candidates };
        let input: String = Input::with_theme(&self.theme)
            .with_prompt(format!("Folder for {email} (Tab completes, empty for none, 'exit' to stop)"))
            .allow_empty(true)
            .completion_with(&completion)
            .interact_text()?;

        let input = input.trim();
        Ok(if input.is_empty() {
            FolderAction::Leave
        } else if input == "exit" {
            FolderAction::Exit
        } else {
            FolderAction::Assign(input.to_string())
        })
    }

    fn label(&mut self, email: &str, candidates: &[String]) -> Result<LabelAction> {
        let completion = PrefixCompletion { candidates };
        // Empty input is neither a label nor a terminator; ask again.
        loop {
            let input: String = Input::with_theme(&self.theme)
                .with_prompt(format!("Label for {email} (Tab completes, 'done' to finish)"))
                .allow_empty(true)
                .completion_with(&completion)
                .interact_text()?;

            let input = input.trim();
            if input.eq_ignore_ascii_case("done") {
                return Ok(LabelAction::Done);
            }
            if !input.is_empty() {
                return Ok(LabelAction::Add(input.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn completion_fills_unambiguous_prefix() {
        let candidates = strings(&["Work", "Personal"]);
        let completion = PrefixCompletion { candidates: &candidates };
        assert_eq!(completion.get("Wo"), Some("Work".to_string()));
    }

    #[test]
    fn completion_stays_quiet_on_ambiguity_or_no_match() {
        let candidates = strings(&["Work", "Workshops"]);
        let completion = PrefixCompletion { candidates: &candidates };
        assert_eq!(completion.get("Wo"), None);
        assert_eq!(completion.get("x"), None);
    }
}
