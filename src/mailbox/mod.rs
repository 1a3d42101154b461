//! Mailbox inventory, namespace classification, and provisioning.

use anyhow::Result;

pub mod imap;

pub use imap::ImapMailbox;

/// Top-level mailbox namespace reserved for delivery folders.
pub const FOLDER_NAMESPACE: &str = "Folders";
/// Top-level mailbox namespace reserved for labels.
pub const LABEL_NAMESPACE: &str = "Labels";

/// Hierarchy separator used by the mailbox itself.
const MAILBOX_SEPARATOR: &str = "/";
/// Separator used for nested folder names everywhere else (store, script,
/// working sets).
const INTERNAL_SEPARATOR: &str = ".";

/// Folder and label names currently present on the mailbox.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MailboxInventory {
    pub folders: Vec<String>,
    pub labels: Vec<String>,
}

/// The mailbox collaborator: list the current inventory, create one mailbox.
pub trait Mailbox {
    fn inventory(&mut self) -> Result<MailboxInventory>;
    fn create(&mut self, raw_name: &str) -> Result<()>;
}

/// Split raw hierarchical mailbox names into the folder and label
/// namespaces.
///
/// Entries under `Folders/` keep their full remaining path with segments
/// joined by `.`; entries under `Labels/` contribute their first sub-segment
/// only. Top-level entries and foreign namespaces are ignored.
pub fn classify_entries(raw_names: &[String]) -> MailboxInventory {
    let mut inventory = MailboxInventory::default();

    for raw in raw_names {
        let name = raw.trim_matches('"');
        let mut segments = name.split(MAILBOX_SEPARATOR);
        match segments.next() {
            Some(FOLDER_NAMESPACE) => {
                let rest: Vec<&str> = segments.collect();
                if !rest.is_empty() {
                    inventory.folders.push(rest.join(INTERNAL_SEPARATOR));
                }
            }
            Some(LABEL_NAMESPACE) => {
                if let Some(first) = segments.next() {
                    inventory.labels.push(first.to_string());
                }
            }
            _ => {}
        }
    }

    inventory
}

/// Names created (or not) during one provisioning pass.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    pub created: Vec<String>,
    pub failed: Vec<String>,
}

/// Create every newly introduced folder and label on the mailbox.
///
/// Folder names have the internal `.` separator translated back to the
/// mailbox hierarchy separator. Each creation is independent: a failure is
/// logged and the rest proceed.
pub fn provision(
    mailbox: &mut dyn Mailbox,
    new_folders: &[String],
    new_labels: &[String],
) -> ProvisionReport {
    let mut report = ProvisionReport::default();

    let targets = new_folders
        .iter()
        .map(|name| {
            format!(
                "{FOLDER_NAMESPACE}{MAILBOX_SEPARATOR}{}",
                name.replace(INTERNAL_SEPARATOR, MAILBOX_SEPARATOR)
            )
        })
        .chain(new_labels.iter().map(|name| format!("{LABEL_NAMESPACE}{MAILBOX_SEPARATOR}{name}")));

    for target in targets {
        match mailbox.create(&target) {
            Ok(()) => {
                tracing::info!(mailbox = %target, "created mailbox");
                report.created.push(target);
            }
            Err(err) => {
                tracing::warn!(mailbox = %target, "mailbox creation failed: {err:#}");
                report.failed.push(target);
            }
        }
    }

    report
}
