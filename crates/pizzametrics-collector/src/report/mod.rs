//! Reporter loop and its outbound sink.
//!
//! Re-exports the reporter, the sink trait, and the HTTP sink so the binary
//! and tests can depend on this module directly.

pub mod reporter;
pub mod sink;

pub use reporter::{measurements, Reporter, ReporterHandle};
pub use sink::{HttpSink, MetricSink};
