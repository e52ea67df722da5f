//! End-to-end tests for the gitlite command surface: a full commit cycle
//! plus failure behavior, driven through the compiled binary.

mod common;

use std::fs;
use std::path::Path;

use common::gitlite;
use tempfile::TempDir;

const HELLO_BLOB: &str = "ce013625030ba8dba906f756967f9e9ca394464a";

fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    gitlite(dir.path(), &["init"]).assert_ok();
    dir
}

fn write_hello(dir: &Path) {
    fs::write(dir.join("a.txt"), "hello\n").unwrap();
}

#[test]
fn init_creates_skeleton() {
    let dir = TempDir::new().unwrap();
    let result = gitlite(dir.path(), &["init"]);
    result.assert_ok();

    let git = dir.path().join(".git");
    assert!(git.join("objects").is_dir());
    assert!(git.join("refs/heads").is_dir());
    assert!(git.join("refs/tags").is_dir());
    assert!(git.join("branches").is_dir());
    assert_eq!(
        fs::read_to_string(git.join("HEAD")).unwrap(),
        "ref: refs/heads/master\n"
    );
}

#[test]
fn hash_object_prints_key_and_stores_blob() {
    let dir = init_repo();
    write_hello(dir.path());

    let result = gitlite(dir.path(), &["hash-object", "a.txt"]);
    result.assert_ok();
    assert_eq!(result.line(), HELLO_BLOB);

    let stored = dir
        .path()
        .join(".git/objects/ce/013625030ba8dba906f756967f9e9ca394464a");
    assert!(stored.is_file());
}

#[test]
fn cat_file_roundtrips_blob_content() {
    let dir = init_repo();
    write_hello(dir.path());
    gitlite(dir.path(), &["hash-object", "a.txt"]).assert_ok();

    let result = gitlite(dir.path(), &["cat-file", "blob", HELLO_BLOB]);
    result.assert_ok();
    assert_eq!(result.stdout, "hello\n");
}

#[test]
fn cat_file_wrong_kind_fails() {
    let dir = init_repo();
    write_hello(dir.path());
    gitlite(dir.path(), &["hash-object", "a.txt"]).assert_ok();

    let result = gitlite(dir.path(), &["cat-file", "tree", HELLO_BLOB]);
    result.assert_err();
    assert!(result.stderr.starts_with("Error:"), "{}", result.stderr);
}

#[test]
fn write_tree_is_deterministic_and_listable() {
    let dir = init_repo();
    write_hello(dir.path());

    let first = gitlite(dir.path(), &["write-tree"]);
    first.assert_ok();
    let second = gitlite(dir.path(), &["write-tree"]);
    second.assert_ok();
    assert_eq!(first.line(), second.line());

    let listing = gitlite(dir.path(), &["ls-tree", &first.line()]);
    listing.assert_ok();
    assert_eq!(
        listing.stdout,
        format!("100644 a.txt\t{HELLO_BLOB}\n")
    );
}

#[test]
fn commit_chain_logs_in_first_parent_order() {
    let dir = init_repo();
    write_hello(dir.path());

    let tree = gitlite(dir.path(), &["write-tree"]).assert_ok().line();

    let c0 = gitlite(dir.path(), &["commit-tree", &tree, "-m", "init"])
        .assert_ok()
        .line();
    let c1 = gitlite(
        dir.path(),
        &["commit-tree", &tree, "-p", &c0, "-m", "second"],
    )
    .assert_ok()
    .line();

    let log = gitlite(dir.path(), &["log", &c1]);
    log.assert_ok();

    let pos_c1 = log.stdout.find(&format!("commit {c1}")).unwrap();
    let pos_c0 = log.stdout.find(&format!("commit {c0}")).unwrap();
    assert!(pos_c1 < pos_c0, "tip must be listed first:\n{}", log.stdout);
    assert!(log.stdout.contains("second\n"));
    assert!(log.stdout.contains("init\n"));
    assert!(log.stdout.contains("Author: User <user@example.com>"));
}

#[test]
fn checkout_restores_files_and_detaches_head() {
    let dir = init_repo();
    write_hello(dir.path());

    let tree = gitlite(dir.path(), &["write-tree"]).assert_ok().line();
    let c0 = gitlite(dir.path(), &["commit-tree", &tree, "-m", "init"])
        .assert_ok()
        .line();

    fs::remove_file(dir.path().join("a.txt")).unwrap();
    gitlite(dir.path(), &["checkout", &c0]).assert_ok();

    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "hello\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join(".git/HEAD")).unwrap(),
        format!("{c0}\n")
    );

    // log with the default HEAD start now works from the detached state.
    let log = gitlite(dir.path(), &["log"]);
    log.assert_ok();
    assert!(log.stdout.contains(&format!("commit {c0}")));
}

#[test]
fn corrupted_object_fails_cat_file() {
    let dir = init_repo();
    write_hello(dir.path());
    gitlite(dir.path(), &["hash-object", "a.txt"]).assert_ok();

    let path = dir
        .path()
        .join(".git/objects/ce/013625030ba8dba906f756967f9e9ca394464a");
    let mut bytes = fs::read(&path).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x01;
    fs::write(&path, &bytes).unwrap();

    let result = gitlite(dir.path(), &["cat-file", "blob", HELLO_BLOB]);
    result.assert_err();
    assert!(result.stderr.starts_with("Error:"), "{}", result.stderr);
}

#[test]
fn commands_outside_a_repository_fail() {
    let dir = TempDir::new().unwrap();
    let result = gitlite(dir.path(), &["write-tree"]);
    result.assert_err();
    assert!(
        result.stderr.contains("not a gitlite repository"),
        "{}",
        result.stderr
    );
}

#[test]
fn commit_tree_rejects_unknown_tree() {
    let dir = init_repo();
    let result = gitlite(
        dir.path(),
        &[
            "commit-tree",
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904",
            "-m",
            "msg",
        ],
    );
    result.assert_err();
    assert!(result.stderr.starts_with("Error:"), "{}", result.stderr);
}

#[test]
fn nested_worktree_snapshot_roundtrip() {
    let dir = init_repo();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("README"), "docs\n").unwrap();
    fs::write(dir.path().join("src/lib.rs"), "fn main() {}\n").unwrap();

    let tree = gitlite(dir.path(), &["write-tree"]).assert_ok().line();
    let c0 = gitlite(dir.path(), &["commit-tree", &tree, "-m", "snapshot"])
        .assert_ok()
        .line();

    fs::remove_file(dir.path().join("README")).unwrap();
    fs::remove_file(dir.path().join("src/lib.rs")).unwrap();

    gitlite(dir.path(), &["checkout", &c0]).assert_ok();
    assert_eq!(
        fs::read_to_string(dir.path().join("README")).unwrap(),
        "docs\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("src/lib.rs")).unwrap(),
        "fn main() {}\n"
    );
}
