//! The audit snapshot data model.
//!
//! A [`ReportRecord`] is assembled once per run by the aggregator and then
//! handed to a renderer. It is a plain value type: every field is owned data,
//! nothing in it touches the live system after collection.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

/// Bytes per gibibyte, used for whole-GB display conversions.
pub const GIB: u64 = 1024 * 1024 * 1024;
/// Bytes per mebibyte, used for whole-MB display conversions.
pub const MIB: u64 = 1024 * 1024;

/// A field value that survived collection, or the reason it did not.
///
/// Collectors never abort the run on failure (hostname excepted); instead the
/// aggregator records the failure reason here so renderers can show an
/// explicit "unavailable" marker rather than silently dropping the section.
#[derive(Debug, Clone)]
pub enum Collected<T> {
    Value(T),
    Unavailable(String),
}

impl<T> Collected<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Collected::Value(v) => Some(v),
            Collected::Unavailable(_) => None,
        }
    }
}

/// Usage figures for one mounted partition.
#[derive(Debug, Clone)]
pub struct DiskUsage {
    pub mount_point: String,
    pub fstype: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    /// Utilization percent as reported by the OS, clamped to [0, 100].
    pub percent_used: f64,
}

impl DiskUsage {
    /// Whole gigabytes, floor division.
    pub fn total_gb(&self) -> u64 {
        self.total_bytes / GIB
    }

    pub fn used_gb(&self) -> u64 {
        self.used_bytes / GIB
    }

    pub fn free_gb(&self) -> u64 {
        self.free_bytes / GIB
    }
}

/// Virtual-memory usage figures.
#[derive(Debug, Clone, Copy)]
pub struct MemoryUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    /// Utilization percent, clamped to [0, 100].
    pub percent_used: f64,
}

impl MemoryUsage {
    /// Whole megabytes, floor division.
    pub fn total_mb(&self) -> u64 {
        self.total_bytes / MIB
    }

    pub fn used_mb(&self) -> u64 {
        self.used_bytes / MIB
    }

    pub fn available_mb(&self) -> u64 {
        self.available_bytes / MIB
    }
}

/// One running service and how long its main process has been alive.
#[derive(Debug, Clone)]
pub struct ServiceUptime {
    pub name: String,
    /// Elapsed run time of the main process, `None` when the service has no
    /// usable main PID or the process lookup failed.
    pub uptime: Option<String>,
}

impl ServiceUptime {
    pub fn uptime_display(&self) -> &str {
        self.uptime.as_deref().unwrap_or("N/A")
    }
}

/// The immutable audit snapshot, one per run.
///
/// Maps are `BTreeMap` so both renderers iterate the same content in the same
/// order for the same record.
#[derive(Debug)]
pub struct ReportRecord {
    pub hostname: String,
    /// Interface name to its first IPv4 address. Interfaces without an IPv4
    /// address are absent.
    pub interfaces: BTreeMap<String, Ipv4Addr>,
    /// Device identifier to usage figures for each stat-able partition.
    pub disks: BTreeMap<String, DiskUsage>,
    /// Usernames of current login sessions, in enumeration order. Duplicates
    /// reflect concurrent sessions.
    pub logged_in_users: Vec<String>,
    /// Local user to the tail of that user's shell history, oldest line
    /// first. Users with no readable history file are absent.
    pub shell_history: BTreeMap<String, Vec<String>>,
    /// Raw socket-state listing, passed through unparsed. On tool failure
    /// this holds the tool's error text instead.
    pub open_ports: String,
    pub memory: Collected<MemoryUsage>,
    /// Running services in listing order.
    pub running_services: Vec<ServiceUptime>,
}

impl ReportRecord {
    /// Number of concurrent login sessions.
    pub fn user_count(&self) -> usize {
        self.logged_in_users.len()
    }
}
