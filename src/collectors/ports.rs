//! Open ports collector.
//!
//! Captures the socket-state listing as an opaque text blob. This collector
//! never fails: if the tool is missing or exits non-zero, whatever error
//! text it produced is forwarded verbatim so the report still shows what
//! happened.

use crate::command::{capture_text, CommandRunner};

/// Produces the raw listening-socket listing.
pub trait PortLister {
    fn list_ports(&self) -> String;
}

/// [`PortLister`] backed by `ss -tuln`.
pub struct SsPortLister<'a> {
    runner: &'a dyn CommandRunner,
    ss_path: String,
}

impl<'a> SsPortLister<'a> {
    pub fn new(runner: &'a dyn CommandRunner, ss_path: impl Into<String>) -> Self {
        Self {
            runner,
            ss_path: ss_path.into(),
        }
    }
}

impl PortLister for SsPortLister<'_> {
    fn list_ports(&self) -> String {
        capture_text(self.runner, &self.ss_path, &["-tuln"])
    }
}
