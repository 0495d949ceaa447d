use crate::error::{GitError, GitResult};
use crate::security::TrialOutcome;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Flag that turns a push into a report of what it would do
pub const DRY_RUN_FLAG: &str = "--dry-run";

/// Runs the non-destructive trial of a push
#[derive(Debug)]
pub struct TrialRunner {
    git_path: PathBuf,
}

impl TrialRunner {
    pub fn new<P: AsRef<Path>>(git_path: P) -> Self {
        Self {
            git_path: git_path.as_ref().to_path_buf(),
        }
    }

    /// Run `git <args> --dry-run` and capture its standard error
    ///
    /// A non-zero exit status is part of the outcome, not an error. Only a
    /// git that cannot be started at all is reported as `Err`.
    pub fn run<S: AsRef<OsStr>>(&self, args: &[S]) -> GitResult<TrialOutcome> {
        debug!(git = %self.git_path.display(), "Running dry-run push");

        let output = Command::new(&self.git_path)
            .args(args)
            .arg(DRY_RUN_FLAG)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                GitError::CommandFailed(format!(
                    "Failed to execute {}: {}",
                    self.git_path.display(),
                    e
                ))
            })?;

        Ok(self.process_output(output))
    }

    fn process_output(&self, output: Output) -> TrialOutcome {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Killed by a signal: no code, treat as an ordinary failure
        let exit_code = output.status.code().unwrap_or(1);
        debug!(exit_code, stderr = %stderr, "Dry-run output");

        TrialOutcome::from_stderr(&stderr, exit_code)
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }
}
