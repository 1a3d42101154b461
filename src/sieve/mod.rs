//! Sieve script generation from the alias store.

use crate::store::AliasStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Default output filename, overwritten each run.
pub const SCRIPT_FILENAME: &str = "sieve_script.sieve";

/// Static preamble: required extensions plus the Proton spam-threshold
/// guard, so delivery rules never run on messages classified as spam.
const PREAMBLE: &str = r#"require ["include", "environment", "variables", "relational", "comparator-i;ascii-numeric", "spamtest", "fileinto", "imap4flags"];

# Generated: Do not run this script on spam messages
if allof (environment :matches "vnd.proton.spam-threshold" "*",
spamtest :value "ge" :comparator "i;ascii-numeric" "${1}")
{
    return;
}

"#;

/// Render the full store into a Sieve script body.
///
/// Pure and deterministic: records are visited in store insertion order,
/// labels in their stored order, and no timestamps are emitted, so identical
/// stores compile to byte-identical scripts. Records without a folder or
/// labels contribute nothing.
pub fn compile(store: &AliasStore) -> String {
    let mut script = String::from(PREAMBLE);

    for record in store.records() {
        if !record.has_assignment() {
            continue;
        }

        script.push_str(&format!(
            "if header :is \"X-Simplelogin-Envelope-To\" \"{}\" {{\n",
            record.email
        ));
        if let Some(folder) = &record.folder {
            script.push_str(&format!("    fileinto \"{folder}\";\n"));
        }
        for label in &record.labels {
            script.push_str(&format!("    fileinto \"{label}\";\n"));
        }
        script.push_str("    stop;\n}\n\n");
    }

    script
}

/// Write the script to `path`, replacing any previous run's output.
pub fn write_script(script: &str, path: &Path) -> Result<()> {
    fs::write(path, script)
        .with_context(|| format!("Failed writing Sieve script: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AliasStore;
    use similar_asserts::assert_eq;

    fn sample_store() -> AliasStore {
        let mut store = AliasStore::default();

        let full = store.get_or_create("shop@alias.example");
        full.assign_folder("Receipts");
        full.add_label("Shopping");
        full.add_label("Urgent");

        store.get_or_create("bare@alias.example");

        let labels_only = store.get_or_create("news@alias.example");
        labels_only.add_label("Newsletters");

        store
    }

    #[test]
    fn compile_is_idempotent() {
        let store = sample_store();
        assert_eq!(compile(&store), compile(&store));
    }

    #[test]
    fn assigned_records_emit_folder_then_labels_then_stop() {
        let script = compile(&sample_store());

        let block = concat!(
            "if header :is \"X-Simplelogin-Envelope-To\" \"shop@alias.example\" {\n",
            "    fileinto \"Receipts\";\n",
            "    fileinto \"Shopping\";\n",
            "    fileinto \"Urgent\";\n",
            "    stop;\n}\n\n",
        );
        assert!(script.contains(block), "missing expected block in:\n{script}");
    }

    #[test]
    fn unassigned_records_emit_nothing() {
        let script = compile(&sample_store());
        assert!(!script.contains("bare@alias.example"));
    }

    #[test]
    fn empty_store_compiles_to_preamble_only() {
        let script = compile(&AliasStore::default());
        assert_eq!(script, PREAMBLE);
    }

    #[test]
    fn full_script_snapshot() {
        insta::assert_snapshot!(compile(&sample_store()), @r#"
require ["include", "environment", "variables", "relational", "comparator-i;ascii-numeric", "spamtest", "fileinto", "imap4flags"];

# Generated: Do not run this script on spam messages
if allof (environment :matches "vnd.proton.spam-threshold" "*",
spamtest :value "ge" :comparator "i;ascii-numeric" "${1}")
{
    return;
}

if header :is "X-Simplelogin-Envelope-To" "shop@alias.example" {
    fileinto "Receipts";
    fileinto "Shopping";
    fileinto "Urgent";
    stop;
}

if header :is "X-Simplelogin-Envelope-To" "news@alias.example" {
    fileinto "Newsletters";
    stop;
}
"#);
    }
}
