//! Sync command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::{self, SETTINGS_FILENAME};
use crate::mailbox::{self, ImapMailbox, Mailbox, MailboxInventory};
use crate::merge::Inventory;
use crate::reconcile::{reconcile, ConsolePrompter};
use crate::remote::{AliasApi, AliasFilter};
use crate::sieve::{self, SCRIPT_FILENAME};
use crate::store::{AliasStore, STORE_FILENAME};

#[derive(Args)]
pub struct SyncArgs {
    /// Path to the settings file
    #[arg(short = 'c', long, value_name = "FILE", default_value = SETTINGS_FILENAME)]
    pub config: PathBuf,

    /// Path to the alias assignment store
    #[arg(short = 's', long, value_name = "FILE", default_value = STORE_FILENAME)]
    pub store: PathBuf,

    /// Path for the generated Sieve script
    #[arg(short = 'o', long, value_name = "FILE", default_value = SCRIPT_FILENAME)]
    pub output: PathBuf,

    /// Skip the remote alias fetch and work from the persisted store
    #[arg(long)]
    pub no_fetch: bool,

    /// Skip interactive assignment and compile from the store as-is
    #[arg(long)]
    pub no_assign: bool,

    /// Skip creating newly introduced folders and labels on the mailbox
    #[arg(long)]
    pub no_provision: bool,

    /// Fetch only aliases with this pinned state
    #[arg(long, value_name = "BOOL")]
    pub pinned: Option<bool>,

    /// Fetch only aliases with this disabled state
    #[arg(long, value_name = "BOOL")]
    pub disabled: Option<bool>,

    /// Fetch only aliases with this enabled state
    #[arg(long, value_name = "BOOL")]
    pub enabled: Option<bool>,
}

pub fn run(args: SyncArgs) -> Result<()> {
    let mut settings = config::load_settings(&args.config);
    if config::ensure_complete(&mut settings)? {
        config::save_settings(&settings, &args.config)?;
        println!("Settings updated at {}", args.config.display());
    }

    let fetched = if args.no_fetch {
        None
    } else {
        let filter =
            AliasFilter { pinned: args.pinned, disabled: args.disabled, enabled: args.enabled };
        let api = AliasApi::new(&settings.simplelogin.api_key);
        let emails =
            api.fetch_all(&filter).context("Fetching aliases from SimpleLogin failed")?;
        println!("Fetched {} aliases", emails.len());
        Some(emails)
    };

    let mut store = AliasStore::load(&args.store);

    if args.no_assign {
        // Nothing new was reconciled, so there is nothing to provision
        // either; just re-render the script from the persisted store.
        let script = sieve::compile(&store);
        sieve::write_script(&script, &args.output)?;
        println!("Sieve script written to {}", args.output.display());
        return Ok(());
    }

    if store.is_empty() && fetched.as_deref().map_or(true, |emails| emails.is_empty()) {
        bail!(
            "No aliases in {} and none fetched from SimpleLogin; nothing to assign",
            args.store.display()
        );
    }

    let mut imap = ImapMailbox::new(
        &settings.mail.host,
        settings.mail.port,
        &settings.mail.username,
        &settings.mail.password,
    );
    let live = match imap.inventory() {
        Ok(inventory) => inventory,
        Err(err) => {
            tracing::warn!(
                "Mailbox inventory unavailable: {err:#}; continuing with cached names only"
            );
            MailboxInventory::default()
        }
    };

    let store_emails = store.emails();
    let mut inventory = Inventory::build(
        &settings.mail.folders,
        &settings.mail.labels,
        &live.folders,
        &live.labels,
        &store_emails,
        fetched.as_deref(),
    );

    let mut prompter = ConsolePrompter::new();
    let config_path = args.config.clone();
    let outcome = reconcile(&mut store, &mut inventory, &mut prompter, |snapshot| {
        settings.mail.folders = snapshot.folders().to_vec();
        settings.mail.labels = snapshot.labels().to_vec();
        config::save_settings(&settings, &config_path)
    })?;

    store.save(&args.store)?;
    if outcome.aborted {
        println!(
            "Stopped early after {} of {} aliases; progress saved to {}",
            outcome.visited,
            store.len(),
            args.store.display()
        );
    } else {
        println!("Reconciled {} aliases into {}", outcome.visited, args.store.display());
    }

    let script = sieve::compile(&store);
    sieve::write_script(&script, &args.output)?;
    println!("Sieve script written to {}", args.output.display());

    let new_folders = inventory.new_folders();
    let new_labels = inventory.new_labels();
    if new_folders.is_empty() && new_labels.is_empty() {
        return Ok(());
    }

    if args.no_provision {
        println!("New names this run (mailbox creation skipped):");
        for name in new_folders.iter().chain(new_labels.iter()) {
            println!("  {name}");
        }
        return Ok(());
    }

    let report = mailbox::provision(&mut imap, new_folders, new_labels);
    if !report.created.is_empty() {
        println!("Created on the mailbox:");
        for name in &report.created {
            println!("  {name}");
        }
    }
    if !report.failed.is_empty() {
        println!("Could not create (see log):");
        for name in &report.failed {
            println!("  {name}");
        }
    }

    Ok(())
}
