use std::ffi::OsStr;

pub mod analyzer;
pub mod matcher;
pub mod policy;

pub use analyzer::{DryRunAnalyzer, TrialOutcome, Verdict};
pub use matcher::RemoteMatcher;
pub use policy::{DirectoryPattern, Policy};

/// The subcommand that triggers a dry-run inspection
///
/// Only an exact argument match counts; git's option grammar is not parsed.
pub const PUSH_SUBCOMMAND: &str = "push";

/// Whether any raw argument is the push subcommand
pub fn is_push<S: AsRef<OsStr>>(args: &[S]) -> bool {
    args.iter()
        .any(|arg| <S as AsRef<OsStr>>::as_ref(arg) == PUSH_SUBCOMMAND)
}
