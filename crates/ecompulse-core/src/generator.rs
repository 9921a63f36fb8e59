//! Per-tick generator.
//!
//! A tick is two steps: [`TickDraws::draw`] pulls one value per field from a
//! [`RandomSource`], and [`MetricsSnapshot::apply`] folds those draws into the
//! live record. Keeping the draws as a value lets the server mirror the exact
//! same numbers into the exporter registry.

use std::ops::{Range, RangeInclusive};

use crate::random::RandomSource;
use crate::snapshot::MetricsSnapshot;

/// Draw ranges. Integers are inclusive, reals are half-open.
pub mod ranges {
    use super::*;

    pub const REVENUE: RangeInclusive<u64> = 2_000..=10_000;
    pub const ORDERS: RangeInclusive<u64> = 50..=500;
    pub const CONVERSION_RATE: Range<f64> = 1.0..5.0;
    pub const ACTIVE_USERS: RangeInclusive<u64> = 20..=200;
    pub const SESSIONS: RangeInclusive<u64> = 100..=500;
    pub const TRAFFIC: RangeInclusive<u64> = 10..=50;
    pub const PERCENT: Range<f64> = 0.0..100.0;
    pub const NETWORK: RangeInclusive<u64> = 50..=1_000;
    pub const FAILED_REQUESTS: RangeInclusive<u64> = 0..=5;
    pub const LATENCY: RangeInclusive<u64> = 100..=1_000;
    pub const DOWNTIME: RangeInclusive<u64> = 0..=1;
}

/// One tick's worth of raw draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDraws {
    pub revenue: u64,
    pub orders: u64,
    pub conversion_rate: f64,
    pub active_users: u64,
    pub sessions: u64,
    pub traffic_direct: u64,
    pub traffic_social: u64,
    pub traffic_referral: u64,
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: u64,
    pub failed_requests: u64,
    pub latency: u64,
    pub downtime: u64,
}

fn int(rng: &mut dyn RandomSource, r: RangeInclusive<u64>) -> u64 {
    rng.int_inclusive(*r.start(), *r.end())
}

fn real(rng: &mut dyn RandomSource, r: Range<f64>) -> f64 {
    rng.real(r.start, r.end)
}

impl TickDraws {
    /// Draw every field. The order is fixed (it is what scripted sources rely on):
    /// revenue, orders, conversion rate, active users, sessions, the three
    /// traffic sources, cpu, memory, disk, network, failed requests, latency,
    /// downtime.
    pub fn draw(rng: &mut dyn RandomSource) -> Self {
        let draws = Self {
            revenue: int(rng, ranges::REVENUE),
            orders: int(rng, ranges::ORDERS),
            conversion_rate: real(rng, ranges::CONVERSION_RATE),
            active_users: int(rng, ranges::ACTIVE_USERS),
            sessions: int(rng, ranges::SESSIONS),
            traffic_direct: int(rng, ranges::TRAFFIC),
            traffic_social: int(rng, ranges::TRAFFIC),
            traffic_referral: int(rng, ranges::TRAFFIC),
            cpu: real(rng, ranges::PERCENT),
            memory: real(rng, ranges::PERCENT),
            disk: real(rng, ranges::PERCENT),
            network: int(rng, ranges::NETWORK),
            failed_requests: int(rng, ranges::FAILED_REQUESTS),
            latency: int(rng, ranges::LATENCY),
            downtime: int(rng, ranges::DOWNTIME),
        };
        tracing::trace!(?draws, "tick draws");
        draws
    }
}

impl MetricsSnapshot {
    /// Fold one tick into the record.
    ///
    /// Revenue and orders are added every tick. Failed requests and downtime
    /// are added only when the draw is positive. Everything else is replaced.
    pub fn apply(&mut self, d: &TickDraws) {
        self.revenue = self.revenue.saturating_add(d.revenue);
        self.orders = self.orders.saturating_add(d.orders);
        self.conversion_rate = d.conversion_rate;

        self.active_users = d.active_users as f64;
        self.sessions = d.sessions as f64;

        self.traffic_direct = d.traffic_direct as f64;
        self.traffic_social = d.traffic_social as f64;
        self.traffic_referral = d.traffic_referral as f64;

        self.cpu = d.cpu;
        self.memory = d.memory;
        self.disk = d.disk;
        self.network = d.network as f64;

        if d.failed_requests > 0 {
            self.failed_requests = self.failed_requests.saturating_add(d.failed_requests);
        }
        self.latency = d.latency as f64;
        if d.downtime > 0 {
            self.downtime = self.downtime.saturating_add(d.downtime);
        }
    }
}
