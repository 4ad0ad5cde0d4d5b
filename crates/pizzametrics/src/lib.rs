//! Top-level facade crate for pizzametrics.
//!
//! Re-exports the core model and the collector so host applications can
//! depend on a single crate.

pub mod core {
    pub use pizzametrics_core::*;
}

pub mod collector {
    pub use pizzametrics_collector::*;
}
