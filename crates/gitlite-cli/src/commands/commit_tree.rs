use anyhow::Result;
use bstr::{BString, ByteVec};
use clap::Args;
use gitlite_hash::ObjectId;
use gitlite_object::{Commit, Object};
use gitlite_utils::date::{GitDate, Signature};

use super::open_repo;

#[derive(Args)]
pub struct CommitTreeArgs {
    /// Tree object id
    #[arg(value_name = "tree")]
    tree: String,

    /// Parent commit id
    #[arg(short = 'p', value_name = "parent")]
    parent: Vec<String>,

    /// Commit message
    #[arg(short = 'm', value_name = "msg")]
    message: String,
}

pub fn run(args: &CommitTreeArgs) -> Result<i32> {
    let repo = open_repo()?;

    let tree = ObjectId::from_hex(&args.tree)?;
    if !repo.store().contains(&tree) {
        anyhow::bail!("not a valid object name: {}", args.tree);
    }

    let parents = args
        .parent
        .iter()
        .map(|p| ObjectId::from_hex(p))
        .collect::<Result<Vec<_>, _>>()?;

    // Fixed identity, wall-clock seconds, UTC; real identity configuration
    // is out of scope.
    let ident = Signature::new("User", "user@example.com", GitDate::now_utc()).to_bytes();

    let mut message = BString::from(args.message.as_str());
    message.push_str(b"\n");

    let commit = Commit::new(&tree, &parents, ident.clone(), ident, message);
    let oid = repo.store().write(&Object::Commit(commit))?;

    println!("{}", oid.to_hex());
    Ok(0)
}
