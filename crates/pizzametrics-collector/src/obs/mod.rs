//! In-process observation: the collector state and host sampling.
//!
//! Recording happens synchronously on request-handling tasks; the reporter
//! only ever reads through `Collector::snapshot` and `HostProbe`.

pub mod collector;
pub mod host;

pub use collector::Collector;
pub use host::{HostProbe, SystemProbe};
