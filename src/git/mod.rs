pub mod resolver;
pub mod trial;

// Re-export commonly used types
pub use resolver::{Executor, GitResolver, ScopedEnvVar, SystemExecutor, remove_path};
pub use trial::{DRY_RUN_FLAG, TrialRunner};
