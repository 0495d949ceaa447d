use crate::security::matcher::RemoteMatcher;
use crate::security::policy::Policy;
use tracing::debug;

/// Announcement git prints before the ref updates of a push
const DESTINATION_MARKER: &str = "To ";

/// Nothing would be pushed, so there is nothing to guard
const NOTHING_TO_PUSH_MARKER: &str = "error: src refspec push does not match any";

/// Rejected push, followed by the single-quoted remote
const FAILED_PUSH_MARKER: &str = "error: failed to push some refs to '";

/// Captured result of `git push --dry-run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    pub lines: Vec<String>,
    pub exit_code: i32,
}

impl TrialOutcome {
    pub fn new(lines: Vec<String>, exit_code: i32) -> Self {
        Self { lines, exit_code }
    }

    /// Split raw standard error on `\n` and `\r`, dropping empty lines
    pub fn from_stderr(stderr: &str, exit_code: i32) -> Self {
        let lines = stderr
            .split(['\n', '\r'])
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self { lines, exit_code }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// What the real push would do, as far as the policy is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Safe,
    UnsafeRemote(String),
    ProtectedBranch(String),
}

impl Verdict {
    pub fn is_unsafe(&self) -> bool {
        !matches!(self, Verdict::Safe)
    }

    /// The offending remote or branch, empty for a safe push
    pub fn subject(&self) -> &str {
        match self {
            Verdict::Safe => "",
            Verdict::UnsafeRemote(remote) => remote,
            Verdict::ProtectedBranch(branch) => branch,
        }
    }
}

/// Reads a dry-run push and decides whether the real push needs confirmation
#[derive(Debug, Clone, Copy)]
pub struct DryRunAnalyzer<'a> {
    policy: &'a Policy,
    matcher: RemoteMatcher<'a>,
}

impl<'a> DryRunAnalyzer<'a> {
    pub fn new(policy: &'a Policy) -> Self {
        Self {
            policy,
            matcher: RemoteMatcher::new(policy),
        }
    }

    pub fn analyze(&self, outcome: &TrialOutcome) -> Verdict {
        if outcome.success() {
            self.analyze_accepted(&outcome.lines)
        } else {
            self.analyze_rejected(&outcome.lines)
        }
    }

    /// Remote check on the first line, then the protected branch scan
    fn analyze_accepted(&self, lines: &[String]) -> Verdict {
        if let Some(remote) = lines.first().and_then(|line| announced_remote(line)) {
            if !self.matcher.is_safe(remote) {
                debug!(remote, "Unsafe remote found");
                return Verdict::UnsafeRemote(remote.to_string());
            }
        }

        for line in lines {
            for branch in self.policy.protected_branches() {
                if line.ends_with(&format!(" -> {}", branch)) {
                    debug!(branch = %branch, line = %line, "Protected branch found");
                    return Verdict::ProtectedBranch(branch.clone());
                }
            }
        }

        Verdict::Safe
    }

    fn analyze_rejected(&self, lines: &[String]) -> Verdict {
        for line in lines {
            if line.starts_with(NOTHING_TO_PUSH_MARKER) {
                return Verdict::Safe;
            }

            if let Some(remote) = rejected_remote(line) {
                if !self.matcher.is_safe(remote) {
                    debug!(remote, "Unsafe remote found");
                    return Verdict::UnsafeRemote(remote.to_string());
                }
            }
        }

        Verdict::Safe
    }
}

/// Second whitespace token of a `To <remote>` line
fn announced_remote(line: &str) -> Option<&str> {
    if !line.starts_with(DESTINATION_MARKER) {
        return None;
    }
    line.split_whitespace().nth(1)
}

/// Quoted remote of an `error: failed to push some refs to '<remote>'` line
fn rejected_remote(line: &str) -> Option<&str> {
    line.strip_prefix(FAILED_PUSH_MARKER)?.split('\'').next()
}
