//! Line-protocol records.
//!
//! Layout: `<category>,source=<source>,method=<method> <name>=<value>`.
//! Tags are written verbatim, no escaping. Anything containing a separator
//! (space, comma, `=`) or a line break is rejected rather than escaped, so
//! every accepted record is exactly one line with exactly one field.

use std::fmt;
use std::fmt::Write;

use bytes::Bytes;
use serde::Deserialize;

use crate::error::{PizzaMetricsError, Result};

/// Value of a single measurement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    Unsigned(u64),
    Signed(i64),
    /// Written with the shortest representation that round-trips
    /// (`12.5`, `80`, `0.30000000000000004`).
    Float(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Unsigned(v) => write!(f, "{v}"),
            MetricValue::Signed(v) => write!(f, "{v}"),
            MetricValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::Unsigned(v)
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Signed(v)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

/// One measurement, ready to be written as a line.
///
/// Ephemeral: built per tick, formatted, dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRecord<'a> {
    /// Measurement family (`request`, `order`, `cpu`, ...).
    pub category: &'a str,
    /// Dimension label written as the `method` tag (`all`, `get`, ...).
    pub method: &'a str,
    /// Field name (`total`, `revenue`, ...).
    pub name: &'a str,
    pub value: MetricValue,
}

impl<'a> MetricRecord<'a> {
    pub fn new(category: &'a str, method: &'a str, name: &'a str, value: impl Into<MetricValue>) -> Self {
        Self {
            category,
            method,
            name,
            value: value.into(),
        }
    }

    /// Format as a single line tagged with `source`.
    pub fn to_line(&self, source: &str) -> Result<String> {
        validate_tag("category", self.category)?;
        validate_tag("source", source)?;
        validate_tag("method", self.method)?;
        validate_tag("name", self.name)?;

        let mut out = String::with_capacity(
            self.category.len() + source.len() + self.method.len() + self.name.len() + 40,
        );
        let _ = write!(
            out,
            "{},source={},method={} {}={}",
            self.category, source, self.method, self.name, self.value
        );
        Ok(out)
    }

    /// Same as [`to_line`](Self::to_line), as a request body.
    pub fn encode(&self, source: &str) -> Result<Bytes> {
        self.to_line(source).map(Bytes::from)
    }
}

/// Reject values that would change the shape of a line.
pub fn validate_tag(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PizzaMetricsError::BadRecord(format!("{field} must not be empty")));
    }
    if let Some(c) = value
        .chars()
        .find(|c| matches!(c, ' ' | ',' | '=') || c.is_control())
    {
        return Err(PizzaMetricsError::BadRecord(format!(
            "{field} contains separator {c:?}: {value:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn formats_revenue_line() {
        let r = MetricRecord::new("order", "all", "revenue", 12.5);
        assert_eq!(
            r.to_line("test-src").ok().as_deref(),
            Some("order,source=test-src,method=all revenue=12.5")
        );
    }

    #[test]
    fn whole_floats_drop_the_fraction() {
        let r = MetricRecord::new("order", "all", "latency", 80.0);
        assert_eq!(
            r.to_line("s").ok().as_deref(),
            Some("order,source=s,method=all latency=80")
        );
    }

    #[test]
    fn negative_gauge_keeps_sign() {
        let r = MetricRecord::new("user", "all", "active", -1i64);
        assert_eq!(
            r.to_line("s").ok().as_deref(),
            Some("user,source=s,method=all active=-1")
        );
    }

    #[test]
    fn separator_in_source_is_rejected() {
        let r = MetricRecord::new("request", "get", "total", 3u64);
        for bad in ["a b", "a,b", "a=b", "a\nb", ""] {
            match r.to_line(bad) {
                Err(e) => assert_eq!(e.code(), ErrorCode::BadRecord, "source={bad:?}"),
                Ok(line) => unreachable!("accepted {line:?} for source={bad:?}"),
            }
        }
    }
}
