//! Logged-in users collector.
//!
//! Enumerates current login sessions through the session-listing tool. The
//! result keeps enumeration order and duplicates: a user with three open
//! terminals appears three times.

use crate::command::CommandRunner;

/// Returns usernames of all current login sessions, one per session.
pub fn read_logged_in_users(
    runner: &dyn CommandRunner,
    who_path: &str,
) -> Result<Vec<String>, String> {
    let output = runner.run(who_path, &[])?;

    Ok(output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect())
}
