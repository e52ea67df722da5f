use anyhow::Result;
use clap::Args;
use gitlite_object::{Commit, ObjectType};

use super::open_repo;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Commit to restore: a ref, HEAD, or a full hex id
    #[arg(value_name = "name")]
    name: String,
}

pub fn run(args: &CheckoutArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.resolve(&args.name)?;

    let payload = repo.read_kind(&oid, ObjectType::Commit)?;
    let commit = Commit::parse(&payload)?;
    let tree = commit.tree()?;

    repo.restore_tree(&tree, repo.work_tree())?;

    // Leave HEAD pointing directly at the restored commit.
    repo.refs().set_head_detached(&oid)?;
    Ok(0)
}
