#![allow(dead_code)]

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn git(args: &[&str], dir: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Helper to create a test git repository with one commit
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().join("work");
    fs::create_dir(&repo_path).unwrap();

    // Initialize git repo
    git(&["init"], &repo_path);

    // Configure git
    git(&["config", "user.name", "Test User"], &repo_path);
    git(&["config", "user.email", "test@example.com"], &repo_path);
    git(&["config", "commit.gpgsign", "false"], &repo_path);

    create_commit(&repo_path, "README.md", "# test\n", "Initial commit");

    (temp_dir, repo_path)
}

/// Helper to create a commit
pub fn create_commit(repo_path: &Path, file: &str, content: &str, message: &str) {
    fs::write(repo_path.join(file), content).expect("Failed to write file");
    git(&["add", file], repo_path);
    git(&["commit", "-m", message], repo_path);
}

/// Helper to create a bare repository next to the work tree
pub fn create_bare_remote(temp_dir: &TempDir, name: &str) -> PathBuf {
    let remote_path = temp_dir.path().join(name);
    fs::create_dir(&remote_path).unwrap();
    git(&["init", "--bare"], &remote_path);
    remote_path
}

/// Number of refs under refs/heads in a repository
pub fn branch_count(repo_path: &Path) -> usize {
    let output = Command::new("git")
        .args(["for-each-ref", "refs/heads"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to list refs");
    String::from_utf8_lossy(&output.stdout).lines().count()
}

/// `git -C <repo> push <remote> HEAD:refs/heads/<branch>` as raw arguments
pub fn push_args(repo_path: &Path, remote: &Path, branch: &str) -> Vec<OsString> {
    vec![
        OsString::from("-C"),
        repo_path.as_os_str().to_os_string(),
        OsString::from("push"),
        remote.as_os_str().to_os_string(),
        OsString::from(format!("HEAD:refs/heads/{}", branch)),
    ]
}
