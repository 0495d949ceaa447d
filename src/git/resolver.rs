use crate::error::{GitError, GitResult};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the binary this program stands in for
pub const GIT_BINARY: &str = "git";

/// Process queries the resolver depends on
pub trait Executor {
    /// Path of the running executable
    fn executable(&self) -> GitResult<PathBuf>;

    /// Find `file` on the current `PATH`
    fn look_path(&self, file: &str) -> GitResult<PathBuf>;
}

/// Executor backed by the real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn executable(&self) -> GitResult<PathBuf> {
        Ok(std::env::current_exe()?)
    }

    fn look_path(&self, file: &str) -> GitResult<PathBuf> {
        let path = std::env::var_os("PATH").unwrap_or_default();
        look_path_in(file, &path).ok_or_else(|| GitError::NotFound(file.to_string()))
    }
}

/// Search each directory of `path` for an executable named `file`
pub fn look_path_in(file: &str, path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, file))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(dir: &Path, file: &str) -> Vec<PathBuf> {
    let extensions =
        std::env::var("PATHEXT").unwrap_or_else(|_| ".EXE;.CMD;.BAT;.COM".to_string());
    let mut candidates = vec![dir.join(file)];
    candidates.extend(
        extensions
            .split(';')
            .filter(|ext| !ext.is_empty())
            .map(|ext| dir.join(format!("{}{}", file, ext.to_lowercase()))),
    );
    candidates
}

#[cfg(not(windows))]
fn candidates(dir: &Path, file: &str) -> Vec<PathBuf> {
    vec![dir.join(file)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Best-guess install location, used when the lookup cannot be trusted
pub fn default_git_command(os: &str) -> &'static str {
    match os {
        "macos" | "linux" => "/usr/bin/git",
        "windows" => "c:\\Program Files\\Git\\cmd\\git.exe",
        _ => "git",
    }
}

fn default_git_path() -> PathBuf {
    PathBuf::from(default_git_command(std::env::consts::OS))
}

/// Remove every entry equal to `target` from a search path, keeping order
///
/// Entries are compared as raw OS strings, so a `PATH` that is not valid
/// UTF-8 is handled like any other.
pub fn remove_path(env_path: &OsStr, target: &Path) -> OsString {
    if env_path.is_empty() {
        return OsString::new();
    }

    let kept: Vec<PathBuf> = std::env::split_paths(env_path)
        .filter(|entry| entry.as_os_str() != target.as_os_str())
        .collect();

    match std::env::join_paths(kept) {
        Ok(path) => path,
        Err(e) => {
            debug!(error = %e, "Cannot rebuild search path, leaving it unchanged");
            env_path.to_os_string()
        }
    }
}

/// Overrides an environment variable until dropped
///
/// The previous value (or its absence) is put back on every exit path,
/// including early returns and unwinding.
#[derive(Debug)]
pub struct ScopedEnvVar {
    key: OsString,
    original: Option<OsString>,
}

impl ScopedEnvVar {
    pub fn set<K: AsRef<OsStr>, V: AsRef<OsStr>>(key: K, value: V) -> Self {
        let key = key.as_ref().to_os_string();
        let original = std::env::var_os(&key);
        // SAFETY: push-guard is single-threaded; nothing else reads the
        // environment while the override is active.
        unsafe { std::env::set_var(&key, value) };
        Self { key, original }
    }
}

impl Drop for ScopedEnvVar {
    fn drop(&mut self) {
        // SAFETY: see `ScopedEnvVar::set`.
        unsafe {
            match &self.original {
                Some(value) => std::env::set_var(&self.key, value),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}

/// Locates the genuine git binary behind this wrapper
pub struct GitResolver<E: Executor> {
    executor: E,
}

impl GitResolver<SystemExecutor> {
    pub fn system() -> Self {
        Self::new(SystemExecutor)
    }
}

impl<E: Executor> GitResolver<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Find the real git, never failing
    ///
    /// The wrapper's own directory is taken off `PATH` for the lookup so it
    /// cannot resolve to itself.
    pub fn resolve(&self) -> PathBuf {
        let exe_path = match self.executor.executable() {
            Ok(path) => path,
            Err(e) => {
                debug!(error = %e, "Cannot determine own executable, using default git");
                return default_git_path();
            }
        };
        debug!(exe_path = %exe_path.display(), "Resolving git");

        let own_dir = exe_path.parent().unwrap_or(Path::new(""));
        let original_path = std::env::var_os("PATH").unwrap_or_default();
        let new_path = remove_path(&original_path, own_dir);
        debug!(new_path = ?new_path, "Search path without wrapper directory");

        let lookup = {
            let _path = ScopedEnvVar::set("PATH", &new_path);
            self.executor.look_path(GIT_BINARY)
        };

        match lookup {
            Ok(git_path) => {
                debug!(git_path = %git_path.display(), "Found git");
                git_path
            }
            Err(e) => {
                debug!(error = %e, "Git lookup failed, using default git");
                default_git_path()
            }
        }
    }
}
