//! SystemMetrics snapshot

use serde::{Deserialize, Serialize};

/// One reading of machine health at a sampling tick
///
/// Values are taken as reported. Nothing here is validated; the mapping
/// engine clamps whatever it receives.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemMetrics {
    /// CPU usage, percent (0-100)
    pub cpu_usage: f64,
    /// Memory usage, percent (0-100)
    pub memory_usage: f64,
    /// Disk reads, bytes/sec
    pub disk_read_bytes: u64,
    /// Disk writes, bytes/sec
    pub disk_write_bytes: u64,
    /// Network received, bytes/sec
    pub network_rx_bytes: u64,
    /// Network transmitted, bytes/sec
    pub network_tx_bytes: u64,
    /// Temperature, degrees Celsius
    pub temperature: f64,
}

impl SystemMetrics {
    /// Temperature reported when no sensor reading is available
    pub const FALLBACK_TEMPERATURE: f64 = 45.0;

    /// Set CPU usage
    pub fn with_cpu(mut self, percent: f64) -> Self {
        self.cpu_usage = percent;
        self
    }

    /// Set memory usage
    pub fn with_memory(mut self, percent: f64) -> Self {
        self.memory_usage = percent;
        self
    }

    /// Set disk read and write rates
    pub fn with_disk(mut self, read_bytes: u64, write_bytes: u64) -> Self {
        self.disk_read_bytes = read_bytes;
        self.disk_write_bytes = write_bytes;
        self
    }

    /// Set network receive and transmit rates
    pub fn with_network(mut self, rx_bytes: u64, tx_bytes: u64) -> Self {
        self.network_rx_bytes = rx_bytes;
        self.network_tx_bytes = tx_bytes;
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = celsius;
        self
    }

    /// Combined disk throughput; saturates rather than wrapping
    pub fn disk_total_bytes(&self) -> u64 {
        self.disk_read_bytes.saturating_add(self.disk_write_bytes)
    }

    /// Combined network throughput; saturates rather than wrapping
    pub fn network_total_bytes(&self) -> u64 {
        self.network_rx_bytes.saturating_add(self.network_tx_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let metrics = SystemMetrics::default()
            .with_cpu(42.0)
            .with_memory(61.5)
            .with_disk(1024, 512)
            .with_network(2048, 1024)
            .with_temperature(55.0);

        assert_eq!(metrics.cpu_usage, 42.0);
        assert_eq!(metrics.memory_usage, 61.5);
        assert_eq!(metrics.disk_total_bytes(), 1536);
        assert_eq!(metrics.network_total_bytes(), 3072);
        assert_eq!(metrics.temperature, 55.0);
    }

    #[test]
    fn test_totals_saturate() {
        let metrics = SystemMetrics::default()
            .with_disk(u64::MAX, 10)
            .with_network(u64::MAX, u64::MAX);

        assert_eq!(metrics.disk_total_bytes(), u64::MAX);
        assert_eq!(metrics.network_total_bytes(), u64::MAX);
    }

    #[test]
    fn test_json_round_trip_with_missing_fields() {
        let metrics: SystemMetrics =
            serde_json::from_str(r#"{"cpu_usage": 12.0, "temperature": 61.0}"#).unwrap();

        assert_eq!(metrics.cpu_usage, 12.0);
        assert_eq!(metrics.temperature, 61.0);
        assert_eq!(metrics.disk_read_bytes, 0);
    }
}
