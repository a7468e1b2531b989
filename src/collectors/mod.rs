//! Collectors for host-level audit facts.
//!
//! Each module gathers one fact category from exactly one external source
//! (OS API, filesystem, or subprocess) and returns structured data or a
//! per-collector failure. Failure isolation is the aggregator's job; no
//! collector aborts another.

pub mod disk;
pub mod history;
pub mod hostname;
pub mod memory;
pub mod network;
pub mod ports;
pub mod services;
pub mod users;
