//! Host Audit Report Library
//!
//! Single-shot collect-then-render pipeline for a point-in-time audit
//! snapshot of one Linux host. Independent collectors gather network
//! identity, disk usage, logged-in users, recent shell history, listening
//! ports, memory usage, and running service uptimes; the aggregator
//! tolerates individual collector failures and assembles one immutable
//! [`ReportRecord`]; two renderers produce consistent plain-text and HTML
//! documents from it; delivery by SMTP submission is optional and never
//! fails the run.
//!
//! # Usage
//!
//! ```no_run
//! use host_audit::aggregator::{collect_report, CollectorDeps};
//! use host_audit::collectors::ports::SsPortLister;
//! use host_audit::collectors::services::SystemdServices;
//! use host_audit::command::SystemCommandRunner;
//! use host_audit::config::Config;
//! use host_audit::render::render_text;
//!
//! let config = Config::default();
//! let runner = SystemCommandRunner;
//! let ports = SsPortLister::new(&runner, config.tools.ss_path.clone());
//! let services = SystemdServices::new(
//!     &runner,
//!     config.tools.systemctl_path.clone(),
//!     config.tools.ps_path.clone(),
//! );
//! let deps = CollectorDeps {
//!     runner: &runner,
//!     ports: &ports,
//!     services: &services,
//!     inspector: &services,
//! };
//!
//! let record = collect_report(&config, &deps).expect("hostname must resolve");
//! println!("{}", render_text(&record));
//! ```

pub mod aggregator;
pub mod cli;
pub mod collectors;
pub mod command;
pub mod config;
pub mod error;
pub mod mailer;
pub mod render;
pub mod report;

// Re-export main types for convenience
pub use error::AuditError;
pub use report::{Collected, DiskUsage, MemoryUsage, ReportRecord, ServiceUptime};
