use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use ecompulse_core::error::{EcomPulseError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub generator: GeneratorSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            generator: GeneratorSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(EcomPulseError::UnsupportedVersion);
        }
        self.server.validate()?;
        self.generator.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            EcomPulseError::Config(format!("server.listen must be a valid SocketAddr ({}): {e}", self.listen))
        })
    }

    /// Replace the port of `listen`, keeping the host.
    pub fn override_port(&mut self, port: &str) -> Result<()> {
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|e| EcomPulseError::Config(format!("PORT must be a valid port number: {e}")))?;
        let mut addr = self.listen_addr()?;
        addr.set_port(port);
        self.listen = addr.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSection {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Fixed RNG seed; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            seed: None,
        }
    }
}

impl GeneratorSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=3_600_000).contains(&self.tick_interval_ms) {
            return Err(EcomPulseError::Config(
                "generator.tick_interval_ms must be between 100 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}
fn default_tick_interval_ms() -> u64 {
    5000
}
