use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use gitlite_object::ObjectType;

use super::open_repo;

#[derive(Args)]
pub struct CatFileArgs {
    /// Expected object kind (blob, tree, commit)
    #[arg(value_name = "kind")]
    kind: String,

    /// Object name: HEAD, a ref path, or a full hex id
    #[arg(value_name = "object")]
    name: String,
}

pub fn run(args: &CatFileArgs) -> Result<i32> {
    let expected: ObjectType = args
        .kind
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid object kind: {}", args.kind))?;

    let repo = open_repo()?;
    let oid = repo.resolve(&args.name)?;
    let payload = repo.read_kind(&oid, expected)?;

    io::stdout().lock().write_all(&payload)?;
    Ok(0)
}
