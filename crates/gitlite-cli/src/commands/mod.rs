pub mod cat_file;
pub mod checkout;
pub mod commit_tree;
pub mod hash_object;
pub mod init;
pub mod log;
pub mod ls_tree;
pub mod write_tree;

use anyhow::Result;
use clap::Subcommand;
use gitlite_repository::Repository;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty repository or reinitialize an existing one
    Init(init::InitArgs),
    /// Compute object ID and create a blob from a file
    HashObject(hash_object::HashObjectArgs),
    /// Provide content of a repository object
    CatFile(cat_file::CatFileArgs),
    /// Snapshot the working tree into a tree object
    WriteTree(write_tree::WriteTreeArgs),
    /// Create a new commit object
    CommitTree(commit_tree::CommitTreeArgs),
    /// List the contents of a tree object
    LsTree(ls_tree::LsTreeArgs),
    /// Show commit history following first parents
    Log(log::LogArgs),
    /// Restore a commit's tree into the working tree
    Checkout(checkout::CheckoutArgs),
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args),
        Commands::HashObject(args) => hash_object::run(args),
        Commands::CatFile(args) => cat_file::run(args),
        Commands::WriteTree(args) => write_tree::run(args),
        Commands::CommitTree(args) => commit_tree::run(args),
        Commands::LsTree(args) => ls_tree::run(args),
        Commands::Log(args) => log::run(args),
        Commands::Checkout(args) => checkout::run(args),
    }
}

/// Discover the enclosing repository from the current directory.
pub(crate) fn open_repo() -> Result<Repository> {
    Ok(Repository::discover(".")?)
}
