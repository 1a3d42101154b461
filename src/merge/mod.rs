//! Merging cached, live, and remote inventories into canonical working sets.

/// An ordered, duplicate-free list of names known this run, with the subset
/// introduced since the cached snapshot tracked separately for provisioning.
#[derive(Debug, Default, Clone)]
pub struct WorkingSet {
    names: Vec<String>,
    introduced: Vec<String>,
}

impl WorkingSet {
    /// Seed from the cached list. Cached entries are never counted as
    /// newly introduced.
    pub fn with_cached<I, S>(cached: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for name in cached {
            let name = name.into();
            if !name.is_empty() && !set.names.contains(&name) {
                set.names.push(name);
            }
        }
        set
    }

    /// Append `name` unless empty or already present, recording it as newly
    /// introduced. Returns whether the set grew.
    pub fn absorb(&mut self, name: &str) -> bool {
        if name.is_empty() || self.names.iter().any(|n| n == name) {
            return false;
        }
        self.names.push(name.to_string());
        self.introduced.push(name.to_string());
        true
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn introduced(&self) -> &[String] {
        &self.introduced
    }
}

/// Canonical working sets for one run: folders, labels, and the alias list
/// the reconciler walks.
///
/// Merging is purely additive. A live inventory that is missing a cached
/// name (or is absent entirely after a failed mailbox query) never removes
/// anything from the cached sets.
#[derive(Debug, Default)]
pub struct Inventory {
    folders: WorkingSet,
    labels: WorkingSet,
    aliases: WorkingSet,
}

impl Inventory {
    pub fn build(
        cached_folders: &[String],
        cached_labels: &[String],
        live_folders: &[String],
        live_labels: &[String],
        store_emails: &[String],
        fetched_aliases: Option<&[String]>,
    ) -> Self {
        let mut folders = WorkingSet::with_cached(cached_folders.iter().cloned());
        for name in live_folders {
            folders.absorb(name);
        }

        let mut labels = WorkingSet::with_cached(cached_labels.iter().cloned());
        for name in live_labels {
            labels.absorb(name);
        }

        let mut aliases = WorkingSet::with_cached(store_emails.iter().cloned());
        for email in fetched_aliases.unwrap_or_default() {
            aliases.absorb(email);
        }

        Self { folders, labels, aliases }
    }

    pub fn folders(&self) -> &[String] {
        self.folders.names()
    }

    pub fn labels(&self) -> &[String] {
        self.labels.names()
    }

    pub fn aliases(&self) -> &[String] {
        self.aliases.names()
    }

    /// Record a folder name typed during reconciliation.
    pub fn note_folder(&mut self, name: &str) {
        self.folders.absorb(name);
    }

    /// Record a label name typed during reconciliation.
    pub fn note_label(&mut self, name: &str) {
        self.labels.absorb(name);
    }

    pub fn new_folders(&self) -> &[String] {
        self.folders.introduced()
    }

    pub fn new_labels(&self) -> &[String] {
        self.labels.introduced()
    }
}
