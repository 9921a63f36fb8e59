//! The live metrics record and its public JSON projection.

use serde::{Deserialize, Serialize};

use crate::error::{EcomPulseError, Result};

/// Current metric values.
///
/// Counters (`revenue`, `orders`, `failed_requests`, `downtime`) only grow.
/// Every other field is a gauge and holds the last tick's value. Gauges are
/// kept as `f64`; the projection floors the integer-valued ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub revenue: u64,
    pub orders: u64,
    pub conversion_rate: f64,
    pub active_users: f64,
    pub sessions: f64,
    pub traffic_direct: f64,
    pub traffic_social: f64,
    pub traffic_referral: f64,
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
    pub failed_requests: u64,
    pub latency: f64,
    pub downtime: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSources {
    pub direct: u64,
    pub social: u64,
    pub referral: u64,
}

/// Body of `GET /api/metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetrics {
    pub revenue: u64,
    pub orders: u64,
    pub conversion_rate: f64,
    pub active_users: u64,
    pub sessions: u64,
    pub traffic_sources: TrafficSources,
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: u64,
    pub failed_requests: u64,
    pub latency: u64,
    pub downtime: u64,
}

/// Round to two decimal places, half away from zero.
///
/// Rounds the binary product `v * 100.0`, so a value sitting on a `.xx5`
/// boundary can land 0.01 away from a rounding of its exact decimal
/// expansion.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Floor to a non-negative integer. NaN maps to 0.
pub fn floor_count(v: f64) -> u64 {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        v.floor() as u64
    }
}

impl From<&MetricsSnapshot> for ApiMetrics {
    fn from(s: &MetricsSnapshot) -> Self {
        Self {
            revenue: s.revenue,
            orders: s.orders,
            conversion_rate: round2(s.conversion_rate),
            active_users: floor_count(s.active_users),
            sessions: floor_count(s.sessions),
            traffic_sources: TrafficSources {
                direct: floor_count(s.traffic_direct),
                social: floor_count(s.traffic_social),
                referral: floor_count(s.traffic_referral),
            },
            cpu: round2(s.cpu),
            memory: round2(s.memory),
            disk: round2(s.disk),
            network: floor_count(s.network),
            failed_requests: s.failed_requests,
            latency: floor_count(s.latency),
            downtime: s.downtime,
        }
    }
}

impl ApiMetrics {
    /// Serialize to a JSON value. Non-finite reals are the only way this fails.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        for (name, v) in [
            ("conversionRate", self.conversion_rate),
            ("cpu", self.cpu),
            ("memory", self.memory),
            ("disk", self.disk),
        ] {
            if !v.is_finite() {
                return Err(EcomPulseError::Internal(format!("{name} is not finite")));
            }
        }
        serde_json::to_value(self)
            .map_err(|e| EcomPulseError::Internal(format!("serialize metrics failed: {e}")))
    }
}
