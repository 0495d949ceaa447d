pub mod prompt;

pub use prompt::{CONTINUE_QUESTION, confirm, write_disclaimer, write_protected_branch_warning};
