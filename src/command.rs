//! Subprocess execution seam.
//!
//! Collectors that shell out (socket listing, service manager, process
//! status) go through the [`CommandRunner`] trait so their parsing logic can
//! be unit tested against canned text instead of a live system.

use std::process::Command;

/// Runs an external command and captures its textual output.
pub trait CommandRunner {
    /// Run `program` with `args`, returning stdout on success or a
    /// human-readable failure description (spawn error or stderr) otherwise.
    fn run(&self, program: &str, args: &[&str]) -> Result<String, String>;
}

/// Run a command and forward whatever text came out, error text included.
///
/// This mirrors the "capture the output, whatever it was" contract used for
/// the raw port listing: the caller gets text in every case and never has to
/// handle a failure path.
pub fn capture_text(runner: &dyn CommandRunner, program: &str, args: &[&str]) -> String {
    runner.run(program, args).unwrap_or_else(|err| err)
}

/// [`CommandRunner`] backed by real subprocess spawns.
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, String> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| format!("failed to run {}: {}", program, e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            ))
        }
    }
}
