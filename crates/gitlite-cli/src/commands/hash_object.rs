use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use gitlite_object::ObjectType;

use super::open_repo;

#[derive(Args)]
pub struct HashObjectArgs {
    /// File to store as a blob
    #[arg(value_name = "file")]
    file: PathBuf,
}

pub fn run(args: &HashObjectArgs) -> Result<i32> {
    let repo = open_repo()?;
    let data = std::fs::read(&args.file)?;
    let oid = repo.store().write_raw(ObjectType::Blob, &data)?;
    println!("{}", oid.to_hex());
    Ok(0)
}
