use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use gitlite_repository::Repository;

#[derive(Args)]
pub struct InitArgs {
    /// Directory to create the repository in
    #[arg(value_name = "path", default_value = ".")]
    path: PathBuf,
}

pub fn run(args: &InitArgs) -> Result<i32> {
    Repository::init(&args.path)?;
    println!("Initialized git directory");
    Ok(0)
}
