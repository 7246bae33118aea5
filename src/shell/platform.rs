//! Platform helpers: CI detection, program names, browser launching.

use crate::error::Result;

use super::command::{execute, CommandSpec};

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
        || std::env::var("NETLIFY").is_ok()
}

/// Name to spawn for a program found on PATH.
///
/// npm installs global CLIs on Windows as `.cmd` shims, which
/// `std::process::Command` does not resolve on its own.
pub fn program_name(program: &str) -> String {
    if cfg!(target_os = "windows") && matches!(program, "netlify" | "npm" | "npx") {
        format!("{}.cmd", program)
    } else {
        program.to_string()
    }
}

/// Command that opens `url` in the default browser.
pub fn browser_command(url: &str) -> CommandSpec {
    if cfg!(target_os = "windows") {
        CommandSpec::new("cmd", ["/C", "start", "", url])
    } else if cfg!(target_os = "macos") {
        CommandSpec::new("open", [url])
    } else {
        CommandSpec::new("xdg-open", [url])
    }
}

/// Open `url` in the default browser.
pub fn open_browser(url: &str) -> Result<()> {
    let output = execute(&browser_command(url))?;
    if !output.success {
        tracing::warn!("Browser launcher exited with {:?}", output.exit_code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_name_plain_on_unix() {
        if !cfg!(target_os = "windows") {
            assert_eq!(program_name("netlify"), "netlify");
        }
    }

    #[test]
    fn browser_command_carries_url() {
        let spec = browser_command("http://127.0.0.1:5886");
        assert!(spec.args.iter().any(|a| a == "http://127.0.0.1:5886"));
    }
}
