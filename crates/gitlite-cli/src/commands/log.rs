use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use gitlite_revwalk::HistoryWalk;

use super::open_repo;

#[derive(Args)]
pub struct LogArgs {
    /// Starting commit: a ref, HEAD, or a full hex id
    #[arg(value_name = "name", default_value = "HEAD")]
    name: String,
}

pub fn run(args: &LogArgs) -> Result<i32> {
    let repo = open_repo()?;
    let start = repo.resolve(&args.name)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for item in HistoryWalk::new(&repo, start) {
        let (oid, commit) = item?;
        writeln!(out, "commit {}", oid)?;
        if let Some(author) = commit.author() {
            writeln!(out, "Author: {}", author)?;
        }
        writeln!(out)?;
        out.write_all(&commit.message)?;
        writeln!(out)?;
    }
    Ok(0)
}
