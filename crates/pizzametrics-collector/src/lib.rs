//! pizzametrics collector library entry.
//!
//! Wires the collector state, host sampling, the reporter loop and its HTTP
//! sink, plus the axum hooks a host application uses to feed requests into
//! the collector. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod report;
pub mod router;
pub mod transport;
