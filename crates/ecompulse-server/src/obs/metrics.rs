//! Exporter registry for the dashboard metrics.
//!
//! Counters are `IntCounter` and only ever move forward by a tick's draw.
//! Gauges are `Gauge` and are overwritten each tick. On Linux the process
//! collector adds the usual `process_*` series (cpu seconds, resident memory,
//! open fds) next to the `ecom_*` ones.

use prometheus::{Encoder, Gauge, IntCounter, Registry, TextEncoder};

use ecompulse_core::error::{EcomPulseError, Result};
use ecompulse_core::TickDraws;

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

fn registration(e: prometheus::Error) -> EcomPulseError {
    EcomPulseError::Internal(format!("metric registration failed: {e}"))
}

fn counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter> {
    let c = IntCounter::new(name, help).map_err(registration)?;
    registry.register(Box::new(c.clone())).map_err(registration)?;
    Ok(c)
}

fn gauge(registry: &Registry, name: &str, help: &str) -> Result<Gauge> {
    let g = Gauge::new(name, help).map_err(registration)?;
    registry.register(Box::new(g.clone())).map_err(registration)?;
    Ok(g)
}

pub struct DashboardMetrics {
    registry: Registry,
    pub revenue: IntCounter,
    pub orders: IntCounter,
    pub conversion_rate: Gauge,
    pub active_users: Gauge,
    pub sessions: Gauge,
    pub traffic_direct: Gauge,
    pub traffic_social: Gauge,
    pub traffic_referral: Gauge,
    pub cpu: Gauge,
    pub memory: Gauge,
    pub disk: Gauge,
    pub network: Gauge,
    pub failed_requests: IntCounter,
    pub latency: Gauge,
    pub downtime: IntCounter,
}

impl DashboardMetrics {
    pub fn new() -> Result<Self> {
        let r = Registry::new();

        #[cfg(target_os = "linux")]
        r.register(Box::new(prometheus::process_collector::ProcessCollector::for_self()))
            .map_err(registration)?;

        Ok(Self {
            revenue: counter(&r, "ecom_revenue_total", "Total revenue generated")?,
            orders: counter(&r, "ecom_orders_total", "Total number of orders")?,
            conversion_rate: gauge(&r, "ecom_conversion_rate", "Current conversion rate percentage")?,
            active_users: gauge(&r, "ecom_active_users", "Number of currently active users")?,
            sessions: gauge(&r, "ecom_sessions", "Number of active sessions")?,
            traffic_direct: gauge(&r, "ecom_traffic_direct", "Direct traffic count")?,
            traffic_social: gauge(&r, "ecom_traffic_social", "Social media traffic count")?,
            traffic_referral: gauge(&r, "ecom_traffic_referral", "Referral traffic count")?,
            cpu: gauge(&r, "ecom_server_cpu_usage", "CPU usage percentage")?,
            memory: gauge(&r, "ecom_server_memory_usage", "Memory usage percentage")?,
            disk: gauge(&r, "ecom_server_disk_usage", "Disk usage percentage")?,
            network: gauge(&r, "ecom_server_network_mbps", "Network traffic in Mbps")?,
            failed_requests: counter(&r, "ecom_failed_requests_total", "Total number of failed requests")?,
            latency: gauge(&r, "ecom_request_latency_ms", "Average request latency in milliseconds")?,
            downtime: counter(&r, "ecom_downtime_minutes", "Total downtime in minutes")?,
            registry: r,
        })
    }

    /// Mirror one tick's draws, with the same accumulation policy as the snapshot.
    pub fn observe(&self, d: &TickDraws) {
        self.revenue.inc_by(d.revenue);
        self.orders.inc_by(d.orders);
        self.conversion_rate.set(d.conversion_rate);

        self.active_users.set(d.active_users as f64);
        self.sessions.set(d.sessions as f64);

        self.traffic_direct.set(d.traffic_direct as f64);
        self.traffic_social.set(d.traffic_social as f64);
        self.traffic_referral.set(d.traffic_referral as f64);

        self.cpu.set(d.cpu);
        self.memory.set(d.memory);
        self.disk.set(d.disk);
        self.network.set(d.network as f64);

        if d.failed_requests > 0 {
            self.failed_requests.inc_by(d.failed_requests);
        }
        self.latency.set(d.latency as f64);
        if d.downtime > 0 {
            self.downtime.inc_by(d.downtime);
        }
    }

    /// Render every registered family in the text exposition format.
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::with_capacity(4096);
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buf)
            .map_err(|e| EcomPulseError::Internal(format!("encode metrics failed: {e}")))?;
        String::from_utf8(buf)
            .map_err(|e| EcomPulseError::Internal(format!("metrics not utf-8: {e}")))
    }
}
