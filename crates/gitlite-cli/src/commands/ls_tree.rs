use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use gitlite_object::{ObjectType, Tree};

use super::open_repo;

#[derive(Args)]
pub struct LsTreeArgs {
    /// Tree name: a ref, HEAD, or a full hex id
    #[arg(value_name = "name")]
    name: String,
}

pub fn run(args: &LsTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.resolve(&args.name)?;
    let payload = repo.read_kind(&oid, ObjectType::Tree)?;
    let tree = Tree::parse(&payload)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in &tree.entries {
        writeln!(out, "{:o} {}\t{}", entry.mode.raw(), entry.name, entry.oid)?;
    }
    Ok(0)
}
