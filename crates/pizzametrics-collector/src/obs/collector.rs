//! Process-wide counters and gauges.
//!
//! Every field is its own atomic, so concurrent increments of the same field
//! are never lost. Floats (`revenue`, `creation_latency`) are stored as
//! `f64` bit patterns in an `AtomicU64`.
//!
//! A reader/writer gate sits in front of the atomics with the roles inverted:
//! recorders take the shared side (many at once, never contending with each
//! other), `snapshot()` takes the exclusive side while it copies. Multi-field
//! updates such as a login are therefore never observed half-applied.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use std::time::Instant;

use pizzametrics_core::model::{HttpVerb, MetricsSnapshot, Order};

/// `f64` cell with atomic add/store.
#[derive(Default)]
struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    fn store(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    fn add(&self, delta: f64) {
        // fetch_update retries on contention, so the closure never fails.
        let _ = self
            .bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| {
                Some((f64::from_bits(cur) + delta).to_bits())
            });
    }
}

/// Collector state. Construct once in the composition root and share via
/// `Arc`.
#[derive(Default)]
pub struct Collector {
    gate: RwLock<()>,

    total_requests: AtomicU64,
    post_requests: AtomicU64,
    get_requests: AtomicU64,
    delete_requests: AtomicU64,
    put_requests: AtomicU64,

    auth_successes: AtomicU64,
    auth_failures: AtomicU64,
    active_users: AtomicI64,

    pizzas_ordered: AtomicU64,
    revenue: AtomicF64,
    creation_failures: AtomicU64,
    creation_latency: AtomicF64,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    // The gate guards no data of its own, so a poisoned lock carries no
    // broken invariant: keep going with the inner guard.
    fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count one inbound request. Only `POST`/`GET`/`DELETE`/`PUT` (exact
    /// match) get a per-verb count; every method counts toward the total.
    pub fn record_request(&self, method: &str) {
        let _g = self.shared();
        let verb_counter = match HttpVerb::parse(method) {
            Some(HttpVerb::Post) => Some(&self.post_requests),
            Some(HttpVerb::Get) => Some(&self.get_requests),
            Some(HttpVerb::Delete) => Some(&self.delete_requests),
            Some(HttpVerb::Put) => Some(&self.put_requests),
            None => None,
        };
        if let Some(c) = verb_counter {
            c.fetch_add(1, Ordering::Relaxed);
        }
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Successful login: one auth success plus one active user.
    pub fn record_login(&self) {
        let _g = self.shared();
        self.auth_successes.fetch_add(1, Ordering::Relaxed);
        self.active_users.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_auth_success(&self) {
        let _g = self.shared();
        self.auth_successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_auth_failure(&self) {
        let _g = self.shared();
        self.auth_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// No lower bound: a logout without a login leaves the gauge negative.
    pub fn record_logout(&self) {
        let _g = self.shared();
        self.active_users.fetch_sub(1, Ordering::Relaxed);
    }

    /// Add the order's line items and their prices. An empty order changes
    /// nothing.
    pub fn record_order_placed(&self, order: &Order) {
        let _g = self.shared();
        self.pizzas_ordered
            .fetch_add(order.items.len() as u64, Ordering::Relaxed);
        self.revenue.add(order.total_price());
    }

    pub fn record_creation_failure(&self) {
        let _g = self.shared();
        self.creation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Overwrite the latency gauge. Not validated: negatives are stored as-is.
    pub fn record_creation_latency(&self, latency_millis: f64) {
        let _g = self.shared();
        self.creation_latency.store(latency_millis);
    }

    /// Store the milliseconds elapsed since `start` as the latency gauge.
    pub fn record_creation_elapsed(&self, start: Instant) {
        self.record_creation_latency(start.elapsed().as_secs_f64() * 1000.0);
    }

    /// Consistent copy of every value. Does not reset anything.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let _g = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            post_requests: self.post_requests.load(Ordering::Relaxed),
            get_requests: self.get_requests.load(Ordering::Relaxed),
            delete_requests: self.delete_requests.load(Ordering::Relaxed),
            put_requests: self.put_requests.load(Ordering::Relaxed),
            auth_successes: self.auth_successes.load(Ordering::Relaxed),
            auth_failures: self.auth_failures.load(Ordering::Relaxed),
            active_users: self.active_users.load(Ordering::Relaxed),
            pizzas_ordered: self.pizzas_ordered.load(Ordering::Relaxed),
            revenue: self.revenue.load(),
            creation_failures: self.creation_failures.load(Ordering::Relaxed),
            creation_latency: self.creation_latency.load(),
        }
    }
}
