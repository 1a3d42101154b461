//! alias-sieve: Sync SimpleLogin aliases with IMAP folders and labels
//!
//! This tool reconciles remotely managed email aliases with locally chosen
//! folder/label assignments and compiles them into a Sieve filtering script
//! for the mail server.

use anyhow::Result;

mod cli;
mod config;
mod mailbox;
mod merge;
mod reconcile;
mod remote;
mod sieve;
mod store;

fn main() -> Result<()> {
    cli::run()
}
