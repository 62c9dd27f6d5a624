//! Point-in-time resource inspector for Linux hosts.
//!
//! [`system::source`] turns procfs records into typed values,
//! [`system::metrics`] and [`system::collector`] derive ratios and durations
//! from them, and [`system::snapshot::SystemSnapshot`] assembles a ranked
//! process list on demand.

pub mod config;
pub mod format;
pub mod system;
#[cfg(feature = "trace")]
pub mod trace;
