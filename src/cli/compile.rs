//! Compile command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::sieve::{self, SCRIPT_FILENAME};
use crate::store::{AliasStore, STORE_FILENAME};

#[derive(Args)]
pub struct CompileArgs {
    /// Path to the alias assignment store
    #[arg(short = 's', long, value_name = "FILE", default_value = STORE_FILENAME)]
    pub store: PathBuf,

    /// Path for the generated Sieve script
    #[arg(short = 'o', long, value_name = "FILE", default_value = SCRIPT_FILENAME)]
    pub output: PathBuf,
}

pub fn run(args: CompileArgs) -> Result<()> {
    let store = AliasStore::load(&args.store);
    let script = sieve::compile(&store);
    sieve::write_script(&script, &args.output)?;

    println!(
        "Sieve script for {} aliases written to {}",
        store.len(),
        args.output.display()
    );
    Ok(())
}
