//! Report aggregation under partial failure.
//!
//! Invokes every collector exactly once, in a fixed deterministic order, and
//! assembles the [`ReportRecord`]. A failing collector yields an empty
//! container or an explicit unavailable marker for its field; only hostname
//! resolution may abort the run. Collectors run sequentially and block on
//! their own I/O; nothing here is concurrent.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::collectors::ports::PortLister;
use crate::collectors::services::{ProcessInspector, ServiceEnumerator};
use crate::collectors::{disk, history, hostname, memory, network, services, users};
use crate::command::CommandRunner;
use crate::config::{Config, DEFAULT_HISTORY_LINES, DEFAULT_HOME_ROOT};
use crate::error::AuditError;
use crate::report::{Collected, ReportRecord};

/// Capability implementations the subprocess-backed collectors run against.
/// Production wires in the system implementations; tests substitute fakes
/// returning canned text.
pub struct CollectorDeps<'a> {
    pub runner: &'a dyn CommandRunner,
    pub ports: &'a dyn PortLister,
    pub services: &'a dyn ServiceEnumerator,
    pub inspector: &'a dyn ProcessInspector,
}

/// Collects all facts and assembles the snapshot.
///
/// Collection order is fixed: network, hostname, disk, users, history,
/// ports, memory, services. Only a hostname failure propagates; a partial
/// report is always preferred over no report.
pub fn collect_report(
    cfg: &Config,
    deps: &CollectorDeps<'_>,
) -> Result<ReportRecord, AuditError> {
    let interfaces = network::read_interface_addrs().unwrap_or_else(|e| {
        warn!("Interface enumeration failed: {}", e);
        BTreeMap::new()
    });

    let hostname = hostname::read_hostname()?;
    debug!("Collecting audit snapshot for host '{}'", hostname);

    let disks = disk::read_disk_usage().unwrap_or_else(|e| {
        warn!("Disk usage collection failed: {}", e);
        BTreeMap::new()
    });

    let logged_in_users =
        users::read_logged_in_users(deps.runner, &cfg.tools.who_path).unwrap_or_else(|e| {
            warn!("Login session enumeration failed: {}", e);
            Vec::new()
        });

    let home_root = cfg
        .home_root
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_ROOT));
    let history_lines = cfg.history_lines.unwrap_or(DEFAULT_HISTORY_LINES);
    let shell_history =
        history::read_shell_history(&home_root, history_lines).unwrap_or_else(|e| {
            warn!("Shell history collection failed: {}", e);
            BTreeMap::new()
        });

    // Never fails: tool errors arrive as text and go into the report as-is
    let open_ports = deps.ports.list_ports();

    let memory = match memory::read_memory_usage() {
        Ok(mem) => Collected::Value(mem),
        Err(e) => {
            warn!("Memory usage collection failed: {}", e);
            Collected::Unavailable(e)
        }
    };

    let running_services =
        services::read_running_services(deps.services, deps.inspector).unwrap_or_else(|e| {
            warn!("Service enumeration failed: {}", e);
            Vec::new()
        });

    Ok(ReportRecord {
        hostname,
        interfaces,
        disks,
        logged_in_users,
        shell_history,
        open_ports,
        memory,
        running_services,
    })
}
