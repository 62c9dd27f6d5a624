pub mod collector;
pub mod error;
pub mod metrics;
pub mod platform;
pub mod process;
pub mod snapshot;
pub mod source;
