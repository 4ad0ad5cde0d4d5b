//! pizzametrics core: line-protocol records, the metric model, and the shared
//! error surface.
//!
//! This crate carries no runtime or transport dependencies. The collector
//! crate owns the mutable state, the scheduling and the HTTP dispatch; this
//! one only defines what a measurement looks like and how it is written on
//! the wire.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed records surface as `PizzaMetricsError` so a bad tag never takes
//! the reporter down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod protocol;

/// Shared result type.
pub use error::{PizzaMetricsError, Result};
