//! Alias assignment records and their persistent store.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default store filename, read and rewritten in place each run.
pub const STORE_FILENAME: &str = "aliases.json";

/// One alias and its delivery assignment.
///
/// `folder` is absent or a non-empty folder name; `labels` never contains
/// duplicates or the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub email: String,
    pub folder: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl AliasRecord {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into(), folder: None, labels: Vec::new() }
    }

    /// Replace the folder unconditionally. Existence in any working set is
    /// not validated here.
    pub fn assign_folder(&mut self, folder: impl Into<String>) {
        let folder = folder.into();
        self.folder = if folder.is_empty() { None } else { Some(folder) };
    }

    /// Append a label unless it is empty or already present.
    pub fn add_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !label.is_empty() && !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    pub fn clear_folder(&mut self) {
        self.folder = None;
    }

    pub fn clear_labels(&mut self) {
        self.labels.clear();
    }

    pub fn has_assignment(&self) -> bool {
        self.folder.is_some() || !self.labels.is_empty()
    }
}

/// The durable mapping of email → [`AliasRecord`], in insertion order.
///
/// Insertion order is preserved through save/load so the store file and the
/// generated script diff stably across runs.
#[derive(Debug, Default)]
pub struct AliasStore {
    records: IndexMap<String, AliasRecord>,
}

impl AliasStore {
    /// Read the store file. A missing file is an empty store; malformed
    /// content is reported and treated as empty so the run can continue
    /// without prior assignments.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str::<Vec<AliasRecord>>(&content) {
            Ok(records) => {
                let mut store = Self::default();
                for record in records {
                    store.records.insert(record.email.clone(), record);
                }
                store
            }
            Err(err) => {
                tracing::warn!(
                    "Malformed alias store {}: {err}; starting with no prior assignments",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Rewrite the store file with every record, in mapping insertion order.
    /// Writes a sibling temp file first and renames it into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        let records: Vec<&AliasRecord> = self.records.values().collect();
        let json = serde_json::to_string_pretty(&records)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Failed writing alias store: {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed replacing alias store: {}", path.display()))?;
        Ok(())
    }

    /// Fetch the record for `email`, inserting a default record (empty
    /// assignment) on first sight.
    pub fn get_or_create(&mut self, email: &str) -> &mut AliasRecord {
        self.records.entry(email.to_string()).or_insert_with(|| AliasRecord::new(email))
    }

    pub fn get(&self, email: &str) -> Option<&AliasRecord> {
        self.records.get(email)
    }

    pub fn records(&self) -> impl Iterator<Item = &AliasRecord> {
        self.records.values()
    }

    pub fn emails(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
