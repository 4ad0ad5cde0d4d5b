//! Wire formats for the ingestion endpoint.
//!
//! Only one format exists today: single-line records in the
//! `category,source=...,method=... name=value` shape. Formatting is
//! panic-free; a tag that would break the line is reported as
//! `PizzaMetricsError::BadRecord` instead of being written out.

pub mod line;
