//! Per-alias assignment reconciliation.
//!
//! The loop itself is pure control flow over the [`Prompter`] seam; sentinel
//! strings typed at the console never reach this module.

use crate::merge::Inventory;
use crate::store::{AliasRecord, AliasStore};
use anyhow::Result;

pub mod console;

pub use console::ConsolePrompter;

/// Decision for an alias that already carries an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Leave the record unchanged and move on.
    Keep,
    /// Clear folder and labels, then re-prompt for both.
    Edit,
    /// Terminate the whole reconciliation loop.
    Stop,
}

/// Outcome of the folder prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderAction {
    Assign(String),
    /// Leave the folder unset.
    Leave,
    /// Terminate the whole reconciliation loop.
    Exit,
}

/// Outcome of one label prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelAction {
    Add(String),
    Done,
}

/// The prompting seam. Completion candidates are passed explicitly at every
/// call so implementations hold no ambient working-set state.
pub trait Prompter {
    fn review(&mut self, record: &AliasRecord) -> Result<ReviewAction>;
    fn folder(&mut self, email: &str, candidates: &[String]) -> Result<FolderAction>;
    fn label(&mut self, email: &str, candidates: &[String]) -> Result<LabelAction>;
}

#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub visited: usize,
    pub aborted: bool,
}

/// Walk the canonical alias working set and update each record from the
/// prompter's decisions.
///
/// Every alias in the working set is materialized in the store up front, so
/// a store save after any termination path includes the full set. The
/// checkpoint callback persists the working-set snapshot after each
/// completed alias, and once more when the loop is aborted: an abort always
/// keeps whatever working-set mutations happened before the abort point.
pub fn reconcile(
    store: &mut AliasStore,
    inventory: &mut Inventory,
    prompter: &mut dyn Prompter,
    mut checkpoint: impl FnMut(&Inventory) -> Result<()>,
) -> Result<ReconcileOutcome> {
    let emails = inventory.aliases().to_vec();
    for email in &emails {
        store.get_or_create(email);
    }

    let mut outcome = ReconcileOutcome::default();

    for email in &emails {
        let record = store.get_or_create(email);

        if record.has_assignment() {
            match prompter.review(record)? {
                ReviewAction::Keep => {
                    outcome.visited += 1;
                    continue;
                }
                ReviewAction::Stop => {
                    outcome.aborted = true;
                    break;
                }
                ReviewAction::Edit => {
                    record.clear_folder();
                    record.clear_labels();
                }
            }
        }

        match prompter.folder(email, inventory.folders())? {
            FolderAction::Leave => {}
            FolderAction::Exit => {
                outcome.aborted = true;
                break;
            }
            FolderAction::Assign(name) => {
                inventory.note_folder(&name);
                record.assign_folder(name);
            }
        }

        loop {
            match prompter.label(email, inventory.labels())? {
                LabelAction::Done => break,
                LabelAction::Add(name) => {
                    inventory.note_label(&name);
                    record.add_label(name);
                }
            }
        }

        outcome.visited += 1;
        checkpoint(inventory)?;
    }

    if outcome.aborted {
        checkpoint(inventory)?;
    }

    Ok(outcome)
}
