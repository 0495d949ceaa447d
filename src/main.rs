use push_guard::config::Settings;
use push_guard::git::GitResolver;
use push_guard::{App, logging};
use std::ffi::OsString;
use tracing::debug;

fn main() {
    logging::init_logging();

    let mut argv = std::env::args_os();
    let argv0 = argv.next().unwrap_or_else(|| OsString::from("git"));
    let args: Vec<OsString> = argv.collect();

    // Resolve before anything else so every path ends at the real git
    let git_path = GitResolver::system().resolve();
    debug!(git = %git_path.display(), "Resolved git");

    let app = App::new(Settings::load(), git_path);

    match app.run(&argv0, &args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("push-guard: {}", e);
            std::process::exit(1);
        }
    }
}
