//! HTTP-side hooks into the collector.

pub mod middleware;
