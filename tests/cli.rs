use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const STALE_DIFF: &str = "diff --git a/api.py b/api.py\n--- a/api.py\n+++ b/api.py\n@@ -10,3 +10,3 @@\n-def get_users(limit):\n+def get_users(limit, offset, fields):\n";

const LOCKSTEP_DIFF: &str = "diff --git a/api.py b/api.py\n--- a/api.py\n+++ b/api.py\n@@ -10,1 +10,1 @@\n-def get_users(limit):\n+def get_users(limit, offset):\ndiff --git a/README.md b/README.md\n--- a/README.md\n+++ b/README.md\n@@ -5,1 +5,1 @@\n-get_users(limit)\n+get_users(limit, offset)\n";

fn docdrift() -> Command {
    Command::cargo_bin("docdrift").unwrap()
}

/// Temp project with a README mentioning get_users and a diff file
fn project(diff: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("README.md"),
        "## API\nCall `get_users` to retrieve user records.",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("CHANGELOG.md"),
        "## v1.0\nInitial release with billing module.",
    )
    .unwrap();
    std::fs::write(dir.path().join("change.diff"), diff).unwrap();
    dir
}

fn diff_arg(dir: &TempDir) -> String {
    dir.path().join("change.diff").to_string_lossy().to_string()
}

#[test]
fn test_stale_doc_fails() {
    let dir = project(STALE_DIFF);

    docdrift()
        .args(["-p", dir.path().to_str().unwrap(), "check", "--diff", &diff_arg(&dir)])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Freshness: 0%"))
        .stdout(predicate::str::contains("Symbol 'get_users' changed in api.py"))
        .stdout(predicate::str::contains("Stale: README.md"))
        .stdout(predicate::str::contains("FAIL"));
}

#[test]
fn test_json_report() {
    let dir = project(STALE_DIFF);

    let output = docdrift()
        .args([
            "-p",
            dir.path().to_str().unwrap(),
            "-o",
            "json",
            "check",
            "--diff",
            &diff_arg(&dir),
            "--threshold",
            "80",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report,
        serde_json::json!({
            "drifts": [
                {"symbol": "get_users", "code_file": "api.py", "stale_docs": ["README.md"]}
            ],
            "freshness_score": 0.0,
            "pass": false,
            "threshold": 80.0
        })
    );
}

#[test]
fn test_lockstep_update_passes() {
    let dir = project(LOCKSTEP_DIFF);

    docdrift()
        .args(["-p", dir.path().to_str().unwrap(), "check", "--diff", &diff_arg(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Freshness: 100%"))
        .stdout(predicate::str::contains("No documentation drift detected"));
}

#[test]
fn test_empty_diff_from_stdin() {
    let dir = project("");

    docdrift()
        .args(["-p", dir.path().to_str().unwrap(), "check", "--diff", "-"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes detected."));
}

#[test]
fn test_threshold_zero_passes_with_drift() {
    let dir = project(STALE_DIFF);

    docdrift()
        .args([
            "-p",
            dir.path().to_str().unwrap(),
            "check",
            "--diff",
            &diff_arg(&dir),
            "-t",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stale: README.md"))
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn test_config_file_threshold() {
    let dir = project(STALE_DIFF);
    std::fs::create_dir_all(dir.path().join(".docdrift")).unwrap();
    std::fs::write(dir.path().join(".docdrift/config.toml"), "threshold = 0.0\n").unwrap();

    docdrift()
        .args(["-p", dir.path().to_str().unwrap(), "check", "--diff", &diff_arg(&dir)])
        .assert()
        .success();
}

#[test]
fn test_invalid_threshold_is_error() {
    let dir = project(STALE_DIFF);

    docdrift()
        .args([
            "-p",
            dir.path().to_str().unwrap(),
            "check",
            "--diff",
            &diff_arg(&dir),
            "--threshold",
            "120",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("outside the range"));
}

#[test]
fn test_missing_diff_file_is_error() {
    let dir = tempfile::tempdir().unwrap();

    docdrift()
        .args(["-p", dir.path().to_str().unwrap(), "check", "--diff", "does-not-exist.diff"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read diff"));
}

#[test]
fn test_not_a_repository_is_error() {
    let dir = tempfile::tempdir().unwrap();

    docdrift()
        .args(["-p", dir.path().to_str().unwrap(), "check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn test_symbols_command() {
    let dir = project(STALE_DIFF);

    docdrift()
        .args(["-p", dir.path().to_str().unwrap(), "symbols", "--diff", &diff_arg(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("get_users\tapi.py"));
}

#[test]
fn test_init_then_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_str().unwrap();

    docdrift().args(["-p", path, "init"]).assert().success();
    assert!(dir.path().join(".docdrift/config.toml").exists());

    docdrift()
        .args(["-p", path, "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold = 80.0"))
        .stdout(predicate::str::contains("base = \"HEAD~1\""));

    docdrift().args(["-p", path, "init"]).assert().code(2);
}

#[test]
fn test_init_from_subdirectory_uses_repo_root() {
    let dir = tempfile::tempdir().unwrap();
    git2::Repository::init(dir.path()).unwrap();
    let sub = dir.path().join("services/api");
    std::fs::create_dir_all(&sub).unwrap();

    docdrift()
        .args(["-p", sub.to_str().unwrap(), "init"])
        .assert()
        .success();
    assert!(dir.path().join(".docdrift/config.toml").exists());
    assert!(!sub.join(".docdrift").exists());

    std::fs::write(dir.path().join(".docdrift/config.toml"), "threshold = 55.0\n").unwrap();
    docdrift()
        .args(["-p", sub.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold = 55.0"));
}

fn commit_all(repo: &git2::Repository, message: &str) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = git2::Signature::now("Test", "test@example.com").unwrap();
    let parents: Vec<git2::Commit> = repo
        .head()
        .ok()
        .and_then(|h| h.peel_to_commit().ok())
        .into_iter()
        .collect();
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap();
}

fn write(root: &Path, name: &str, content: &str) {
    std::fs::write(root.join(name), content).unwrap();
}

#[test]
fn test_git_working_tree_against_base() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let repo = git2::Repository::init(root).unwrap();

    write(root, "api.py", "def get_users(limit):\n    return []\n");
    write(root, "README.md", "Call get_users(limit) to fetch users.\n");
    commit_all(&repo, "initial");

    write(root, "api.py", "def get_users(limit, offset):\n    return []\n");

    docdrift()
        .args(["-p", root.to_str().unwrap(), "check", "--base", "HEAD"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Symbol 'get_users' changed in api.py"))
        .stdout(predicate::str::contains("Stale: README.md"));

    write(root, "README.md", "Call get_users(limit, offset) to fetch users.\n");

    docdrift()
        .args(["-p", root.to_str().unwrap(), "check", "--base", "HEAD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Freshness: 100%"));
}

#[test]
fn test_hooks_install_and_uninstall() {
    let dir = tempfile::tempdir().unwrap();
    git2::Repository::init(dir.path()).unwrap();
    let path = dir.path().to_str().unwrap();

    docdrift()
        .args(["-p", path, "hooks", "--install"])
        .assert()
        .success();
    let hook = dir.path().join(".git/hooks/pre-push");
    assert!(std::fs::read_to_string(&hook).unwrap().contains("docdrift check"));

    docdrift()
        .args(["-p", path, "hooks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("installed"));

    docdrift()
        .args(["-p", path, "hooks", "--uninstall"])
        .assert()
        .success();
    assert!(!hook.exists());
}
