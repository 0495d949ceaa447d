pub mod app;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod platform;
pub mod security;
pub mod telemetry;
pub mod ui;

// Re-export commonly used types for convenience
pub use app::{App, Decision};
pub use error::{AppError, AppResult, GitError, GitResult};
pub use security::{DryRunAnalyzer, Policy, RemoteMatcher, TrialOutcome, Verdict};
