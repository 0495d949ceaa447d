use crate::config::Settings;
use crate::error::AppResult;
use crate::git::TrialRunner;
use crate::platform;
use crate::security::{self, DryRunAnalyzer, Policy, Verdict};
use crate::telemetry::TelemetryClient;
use crate::ui::{self, CONTINUE_QUESTION};
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prints the push-guard version instead of running git
pub const VERSION_FLAG: &str = "--push-guard-version";

/// What to do with an invocation once the policy has been consulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    PrintVersion,
    RunGit,
    Abort,
}

/// Glue between the decision engine, the user and the real git
pub struct App {
    settings: Settings,
    policy: Policy,
    git_path: PathBuf,
    telemetry: TelemetryClient,
}

impl App {
    pub fn new(settings: Settings, git_path: PathBuf) -> Self {
        let policy = settings.policy();
        let telemetry = TelemetryClient::new(settings.log_collector_url.clone());

        Self {
            settings,
            policy,
            git_path,
            telemetry,
        }
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Handle one invocation end to end and return the exit status
    pub fn run(&self, argv0: &OsString, args: &[OsString]) -> AppResult<i32> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        match self.decide(args, &mut input, &mut output) {
            Decision::PrintVersion => {
                writeln!(output, "{}", self.settings.version)?;
                Ok(0)
            }
            Decision::Abort => Ok(0),
            Decision::RunGit => {
                debug!("Calling execute_git");
                Ok(platform::execute_git(&self.git_path, argv0, args)?)
            }
        }
    }

    pub fn decide<R: BufRead, W: Write>(
        &self,
        args: &[OsString],
        input: &mut R,
        output: &mut W,
    ) -> Decision {
        if args.first().is_some_and(|arg| arg == VERSION_FLAG) {
            return Decision::PrintVersion;
        }

        let verdict = self.inspect_push(args);
        match self.confirm_verdict(&verdict, input, output) {
            Ok(true) => Decision::RunGit,
            Ok(false) => Decision::Abort,
            Err(e) => {
                warn!(error = %e, "Confirmation failed, not pushing");
                Decision::Abort
            }
        }
    }

    /// Dry-run a push and analyze it; anything else is safe
    ///
    /// A trial that cannot be started leaves git usable rather than blocking it.
    pub fn inspect_push(&self, args: &[OsString]) -> Verdict {
        if !security::is_push(args) {
            return Verdict::Safe;
        }

        let outcome = match TrialRunner::new(&self.git_path).run(args) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Dry-run push failed to start");
                return Verdict::Safe;
            }
        };

        let verdict = DryRunAnalyzer::new(&self.policy).analyze(&outcome);
        debug!(?verdict, "Push analyzed");
        verdict
    }

    /// Show the matching warning and ask; `Ok(true)` means go ahead
    pub fn confirm_verdict<R: BufRead, W: Write>(
        &self,
        verdict: &Verdict,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<bool> {
        match verdict {
            Verdict::Safe => Ok(true),
            Verdict::ProtectedBranch(branch) => {
                ui::write_protected_branch_warning(output, branch)?;
                let confirmed = ui::confirm(input, output, CONTINUE_QUESTION)?;
                if !confirmed {
                    writeln!(output, "Exiting...")?;
                }
                Ok(confirmed)
            }
            Verdict::UnsafeRemote(remote) => {
                ui::write_disclaimer(output, &self.settings.disclaimer, remote)?;
                let confirmed = ui::confirm(input, output, CONTINUE_QUESTION)?;
                if !confirmed {
                    writeln!(output, "Exiting...")?;
                }
                self.telemetry.report(remote, confirmed);
                Ok(confirmed)
            }
        }
    }
}
