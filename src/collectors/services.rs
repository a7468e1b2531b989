//! Running services collector.
//!
//! Enumerates services in the running state via the service manager, then
//! resolves each unit's main PID and asks the process-status tool for its
//! elapsed run time. Units whose PID is zero, absent, or whose lookup fails
//! are still listed, with the uptime marked unavailable.

use crate::command::CommandRunner;
use crate::report::ServiceUptime;

/// Enumerates service units currently in the running state.
pub trait ServiceEnumerator {
    fn running_services(&self) -> Result<Vec<String>, String>;
}

/// Resolves per-service process facts.
pub trait ProcessInspector {
    /// The unit's main PID, `None` when the service manager reports none.
    fn main_pid(&self, unit: &str) -> Result<Option<u32>, String>;

    /// Elapsed run time of a process, as reported by the process-status tool.
    fn elapsed_time(&self, pid: u32) -> Result<String, String>;
}

/// Lists running services with the uptime of each main process.
pub fn read_running_services(
    services: &dyn ServiceEnumerator,
    inspector: &dyn ProcessInspector,
) -> Result<Vec<ServiceUptime>, String> {
    let units = services.running_services()?;

    let mut uptimes = Vec::with_capacity(units.len());
    for unit in units {
        let uptime = match inspector.main_pid(&unit) {
            Ok(Some(pid)) if pid != 0 => match inspector.elapsed_time(pid) {
                Ok(etime) if !etime.is_empty() => Some(etime),
                _ => None,
            },
            // PID zero, no PID, or a failed lookup: list the unit anyway
            _ => None,
        };
        uptimes.push(ServiceUptime { name: unit, uptime });
    }

    Ok(uptimes)
}

/// [`ServiceEnumerator`] and [`ProcessInspector`] backed by the systemd and
/// procps CLIs.
pub struct SystemdServices<'a> {
    runner: &'a dyn CommandRunner,
    systemctl_path: String,
    ps_path: String,
}

impl<'a> SystemdServices<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        systemctl_path: impl Into<String>,
        ps_path: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            systemctl_path: systemctl_path.into(),
            ps_path: ps_path.into(),
        }
    }
}

impl ServiceEnumerator for SystemdServices<'_> {
    fn running_services(&self) -> Result<Vec<String>, String> {
        let output = self.runner.run(
            &self.systemctl_path,
            &["list-units", "--type=service", "--state=running"],
        )?;
        Ok(parse_unit_lines(&output))
    }
}

impl ProcessInspector for SystemdServices<'_> {
    fn main_pid(&self, unit: &str) -> Result<Option<u32>, String> {
        let output = self
            .runner
            .run(&self.systemctl_path, &["show", unit, "--property=MainPID"])?;
        Ok(parse_main_pid(&output))
    }

    fn elapsed_time(&self, pid: u32) -> Result<String, String> {
        let pid = pid.to_string();
        let output = self
            .runner
            .run(&self.ps_path, &["-p", &pid, "-o", "etime="])?;
        Ok(output.trim().to_string())
    }
}

/// Extracts unit names from a `systemctl list-units` listing. Header, legend
/// and summary lines carry no `.service` token and are dropped.
pub(crate) fn parse_unit_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains(".service"))
        .filter_map(|line| line.split_whitespace().find(|t| t.ends_with(".service")))
        .map(str::to_string)
        .collect()
}

/// Extracts the PID from a `MainPID=1234` property line.
pub(crate) fn parse_main_pid(output: &str) -> Option<u32> {
    output
        .trim()
        .split('=')
        .nth(1)
        .and_then(|pid| pid.trim().parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const LIST_UNITS: &str = "\
  UNIT                     LOAD   ACTIVE SUB     DESCRIPTION
  cron.service             loaded active running Regular background program processing daemon
  sshd.service             loaded active running OpenBSD Secure Shell server
  stuck.service            loaded active running Unit with no main process

LOAD   = Reflects whether the unit definition was properly loaded.
3 loaded units listed.
";

    struct FakeManager {
        pids: HashMap<&'static str, Result<Option<u32>, String>>,
    }

    impl ServiceEnumerator for FakeManager {
        fn running_services(&self) -> Result<Vec<String>, String> {
            Ok(parse_unit_lines(LIST_UNITS))
        }
    }

    impl ProcessInspector for FakeManager {
        fn main_pid(&self, unit: &str) -> Result<Option<u32>, String> {
            self.pids
                .get(unit)
                .cloned()
                .unwrap_or(Err("unknown unit".to_string()))
        }

        fn elapsed_time(&self, pid: u32) -> Result<String, String> {
            assert_eq!(pid, 1234);
            Ok("10-04:32:01".to_string())
        }
    }

    #[test]
    fn test_parse_unit_lines() {
        let units = parse_unit_lines(LIST_UNITS);
        assert_eq!(
            units,
            vec!["cron.service", "sshd.service", "stuck.service"]
        );
    }

    #[test]
    fn test_parse_main_pid() {
        assert_eq!(parse_main_pid("MainPID=1234\n"), Some(1234));
        assert_eq!(parse_main_pid("MainPID=0\n"), Some(0));
        assert_eq!(parse_main_pid("MainPID=\n"), None);
        assert_eq!(parse_main_pid("garbage"), None);
    }

    #[test]
    fn test_uptime_resolution() {
        let mut pids = HashMap::new();
        pids.insert("cron.service", Ok(Some(1234)));
        pids.insert("sshd.service", Ok(Some(0)));
        pids.insert("stuck.service", Err("lookup failed".to_string()));
        let manager = FakeManager { pids };

        let services = read_running_services(&manager, &manager).unwrap();
        assert_eq!(services.len(), 3);

        assert_eq!(services[0].name, "cron.service");
        assert_eq!(services[0].uptime.as_deref(), Some("10-04:32:01"));
        assert!(!services[0].uptime_display().is_empty());

        // PID 0 means no main process
        assert_eq!(services[1].name, "sshd.service");
        assert_eq!(services[1].uptime_display(), "N/A");

        // A failed lookup still lists the unit
        assert_eq!(services[2].name, "stuck.service");
        assert_eq!(services[2].uptime_display(), "N/A");
    }
}
