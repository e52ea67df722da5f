use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct WriteTreeArgs {}

pub fn run(_args: &WriteTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    // The ignore policy is caller-supplied; the CLI ignores nothing beyond
    // the core's hard-skip of dot-prefixed names.
    let oid = repo.snapshot_tree(repo.work_tree(), &|_| false)?;
    println!("{}", oid.to_hex());
    Ok(0)
}
