//! Shell history collector.
//!
//! Scans a home-directory root for per-user `.bash_history` files and keeps
//! only the tail of each. Users with no readable history file are omitted
//! from the result rather than reported as errors; on a typical host most
//! service accounts have none.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const HISTORY_FILE: &str = ".bash_history";

/// Reads the last `keep_lines` history lines for every user under
/// `home_root`, oldest line first within each slice.
pub fn read_shell_history(
    home_root: &Path,
    keep_lines: usize,
) -> Result<BTreeMap<String, Vec<String>>, String> {
    let entries = fs::read_dir(home_root)
        .map_err(|e| format!("Failed to read {}: {}", home_root.display(), e))?;

    let mut histories = BTreeMap::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Ok(content) = fs::read_to_string(path.join(HISTORY_FILE)) else {
            continue; // missing or unreadable: user omitted
        };

        let user = entry.file_name().to_string_lossy().into_owned();
        histories.insert(user, tail_lines(&content, keep_lines));
    }

    Ok(histories)
}

fn tail_lines(content: &str, keep_lines: usize) -> Vec<String> {
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    let start = lines.len().saturating_sub(keep_lines);
    lines[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_keeps_only_last_lines() {
        let home = tempfile::tempdir().unwrap();
        let alice = home.path().join("alice");
        fs::create_dir(&alice).unwrap();
        let content: String = (1..=15).map(|i| format!("cmd{}\n", i)).collect();
        fs::write(alice.join(".bash_history"), content).unwrap();

        let bob = home.path().join("bob");
        fs::create_dir(&bob).unwrap(); // no history file

        let histories = read_shell_history(home.path(), 10).unwrap();

        assert!(!histories.contains_key("bob"));
        let lines = &histories["alice"];
        assert_eq!(lines.len(), 10);
        assert_eq!(lines.first().unwrap(), "cmd6");
        assert_eq!(lines.last().unwrap(), "cmd15");
    }

    #[test]
    fn test_short_history_kept_whole() {
        let home = tempfile::tempdir().unwrap();
        let carol = home.path().join("carol");
        fs::create_dir(&carol).unwrap();
        fs::write(carol.join(".bash_history"), "ls\npwd\n").unwrap();

        let histories = read_shell_history(home.path(), 10).unwrap();
        assert_eq!(histories["carol"], vec!["ls", "pwd"]);
    }

    #[test]
    fn test_missing_home_root_is_an_error() {
        let result = read_shell_history(Path::new("/nonexistent/home-root"), 10);
        assert!(result.is_err());
    }
}
