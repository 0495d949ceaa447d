use crate::error::{GitError, GitResult};
use std::ffi::OsString;
use std::os::windows::process::CommandExt;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// `CREATE_NEW_PROCESS_GROUP`, keeps Ctrl+C handling with git
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Run git as a child and mirror its exit status
pub fn execute_git(git_path: &Path, _argv0: &OsString, args: &[OsString]) -> GitResult<i32> {
    debug!(git = %git_path.display(), ?args, "Executing git");

    let status = Command::new(git_path)
        .args(args)
        .creation_flags(CREATE_NEW_PROCESS_GROUP)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| GitError::ExecFailed {
            path: git_path.display().to_string(),
            source,
        })?;

    Ok(status.code().unwrap_or(1))
}
