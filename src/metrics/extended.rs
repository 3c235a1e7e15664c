//! Optional host readings beyond the core snapshot
//!
//! Not every machine has a GPU, a battery or readable fan sensors, so each
//! reading here is optional. An empty `ExtendedMetrics` means the host only
//! reported the core `SystemMetrics`.

use serde::{Deserialize, Serialize};

/// Readings a host may report in addition to `SystemMetrics`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedMetrics {
    /// Discrete GPU, if one is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<GpuReading>,
    /// 1, 5 and 15 minute load averages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_average: Option<LoadAverage>,
    /// Swap space, if configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap: Option<SwapUsage>,
    /// Battery, on portable machines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatteryReading>,
    /// Usage of each logical core, percent
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub per_core_usage: Vec<f64>,
    /// Number of running processes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_count: Option<usize>,
    /// Busiest processes, heaviest first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top_processes: Vec<ProcessReading>,
    /// Speed of every readable fan, RPM
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fan_rpm: Vec<u32>,
}

impl ExtendedMetrics {
    /// True when no optional reading is present
    pub fn is_empty(&self) -> bool {
        self.gpu.is_none()
            && self.load_average.is_none()
            && self.swap.is_none()
            && self.battery.is_none()
            && self.per_core_usage.is_empty()
            && self.process_count.is_none()
            && self.top_processes.is_empty()
            && self.fan_rpm.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuReading {
    /// Utilization, percent
    pub utilization: f64,
    /// Core temperature, degrees Celsius
    pub temperature: f64,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl SwapUsage {
    /// Percent of swap in use; zero when no swap is configured
    pub fn percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.used_bytes as f64 * 100.0 / self.total_bytes as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryReading {
    /// State of charge, percent
    pub charge_percent: f64,
    pub state: BatteryState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryState {
    Charging,
    Discharging,
    Full,
    Empty,
    #[default]
    Unknown,
}

/// One of the busiest processes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessReading {
    pub name: String,
    /// CPU usage, percent of one core
    pub cpu_usage: f64,
}

impl ProcessReading {
    pub fn new(name: impl Into<String>, cpu_usage: f64) -> Self {
        Self {
            name: name.into(),
            cpu_usage,
        }
    }
}
