//! Hand-off to the real git binary.
//!
//! Unix replaces the current process image, so the wrapper disappears and
//! git inherits everything directly. Windows has no `exec`, so git runs as a
//! child sharing our standard streams and its exit code becomes ours.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::execute_git;
#[cfg(windows)]
pub use windows::execute_git;
