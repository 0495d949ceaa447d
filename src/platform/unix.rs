use crate::error::{GitError, GitResult};
use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Replace this process with git
///
/// Only returns on failure. `argv0` is passed through so git sees the name
/// it was invoked under.
pub fn execute_git(git_path: &Path, argv0: &OsString, args: &[OsString]) -> GitResult<i32> {
    debug!(git = %git_path.display(), ?args, "Executing git");

    let source = Command::new(git_path).arg0(argv0).args(args).exec();
    Err(GitError::ExecFailed {
        path: git_path.display().to_string(),
        source,
    })
}
