//! Configuration schema definitions

use crate::metrics::{ExtendedMetrics, SystemMetrics, Workload};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main configuration for SysSonic
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SonicConfig {
    /// Reference throughputs and base tempo
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Snapshot playback settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Extra named snapshots, played after the built-in scenarios
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

impl SonicConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.mapping.validate()?;

        if self.source.interval_ms < 10 || self.source.interval_ms > 3_600_000 {
            bail!("Source interval must be between 10 ms and 1 hour");
        }

        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if scenario.name.trim().is_empty() {
                bail!("Scenario names must not be empty");
            }
            if !seen.insert(scenario.name.as_str()) {
                bail!("Duplicate scenario name '{}'", scenario.name);
            }
        }

        Ok(())
    }
}

/// Tunable constants of the mapping engine
///
/// A combined rate at or above a reference saturates its mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Combined disk read+write bytes/s that reads as fully dense rhythm
    #[serde(default = "default_disk_reference")]
    pub disk_reference_bytes: f64,

    /// Combined network rx+tx bytes/s that reads as top tempo
    #[serde(default = "default_network_reference")]
    pub network_reference_bytes: f64,

    /// Tempo with no network traffic; the top tempo is 40 BPM above it
    #[serde(default = "default_base_tempo")]
    pub base_tempo_bpm: f64,
}

impl MappingConfig {
    /// Reject references the normalization cannot divide by
    pub fn validate(&self) -> Result<()> {
        if !self.disk_reference_bytes.is_finite() || self.disk_reference_bytes <= 0.0 {
            bail!("Disk reference must be a positive number of bytes per second");
        }
        if !self.network_reference_bytes.is_finite() || self.network_reference_bytes <= 0.0 {
            bail!("Network reference must be a positive number of bytes per second");
        }
        if !(20.0..=300.0).contains(&self.base_tempo_bpm) {
            bail!("Base tempo must be between 20 and 300 BPM");
        }
        Ok(())
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            disk_reference_bytes: default_disk_reference(),
            network_reference_bytes: default_network_reference(),
            base_tempo_bpm: default_base_tempo(),
        }
    }
}

fn default_disk_reference() -> f64 { 10_000_000.0 }
fn default_network_reference() -> f64 { 5_000_000.0 }
fn default_base_tempo() -> f64 { 90.0 }

/// Snapshot playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Milliseconds between snapshots (default: 2000)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Restart the playlist when it runs out (default: true)
    #[serde(default = "default_looping")]
    pub looping: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            looping: default_looping(),
        }
    }
}

fn default_interval_ms() -> u64 { 2000 }
fn default_looping() -> bool { true }

/// Report output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format (default: text)
    #[serde(default)]
    pub format: OutputFormat,
}

/// How mapped snapshots are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable report with bar charts
    #[default]
    Text,
    /// One JSON object per snapshot
    Json,
}

/// A named snapshot supplied from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Display name
    pub name: String,

    /// Metric readings
    #[serde(flatten)]
    pub metrics: SystemMetrics,

    /// Optional readings (GPU, load average, swap, battery, cores, processes, fans)
    #[serde(default, skip_serializing_if = "ExtendedMetrics::is_empty")]
    pub extended: ExtendedMetrics,
}

impl ScenarioConfig {
    /// The playlist entry for this scenario
    pub fn workload(&self) -> Workload {
        Workload::new(self.name.clone(), self.metrics).with_extended(self.extended.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: SonicConfig = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.mapping, MappingConfig::default());
        assert_eq!(config.mapping.disk_reference_bytes, 10_000_000.0);
        assert_eq!(config.mapping.network_reference_bytes, 5_000_000.0);
        assert_eq!(config.mapping.base_tempo_bpm, 90.0);
        assert_eq!(config.source.interval_ms, 2000);
        assert!(config.source.looping);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.scenarios.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_mapping_section() {
        let yaml = "network_reference_bytes: 1000000";
        let mapping: MappingConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(mapping.network_reference_bytes, 1_000_000.0);
        assert_eq!(mapping.disk_reference_bytes, 10_000_000.0); // default
    }

    #[test]
    fn test_scenario_config() {
        let yaml = r#"
name: nightly backup
cpu_usage: 12.5
memory_usage: 48
disk_read_bytes: 52428800
disk_write_bytes: 1048576
temperature: 52
"#;
        let scenario: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(scenario.name, "nightly backup");
        assert_eq!(scenario.metrics.cpu_usage, 12.5);
        assert_eq!(scenario.metrics.disk_read_bytes, 52_428_800);
        assert_eq!(scenario.metrics.network_rx_bytes, 0); // default
        assert!(scenario.extended.is_empty());
    }

    #[test]
    fn test_scenario_with_extended_readings() {
        let yaml = r#"
name: laptop render
cpu_usage: 80
temperature: 70
extended:
  gpu:
    utilization: 64
    temperature: 58
  battery:
    charge_percent: 12
    state: discharging
  per_core_usage: [90, 85, 40, 12]
"#;
        let scenario: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(scenario.metrics.cpu_usage, 80.0);
        assert_eq!(scenario.extended.gpu.unwrap().utilization, 64.0);
        assert_eq!(scenario.extended.per_core_usage.len(), 4);

        let workload = scenario.workload();
        assert_eq!(workload.label, "laptop render");
        assert_eq!(workload.extended, scenario.extended);
    }

    #[test]
    fn test_rejects_base_tempo_out_of_range() {
        let mapping = MappingConfig {
            base_tempo_bpm: 5.0,
            ..MappingConfig::default()
        };
        assert!(mapping.validate().is_err());

        let mapping = MappingConfig {
            base_tempo_bpm: f64::NAN,
            ..MappingConfig::default()
        };
        assert!(mapping.validate().is_err());
    }

    #[test]
    fn test_output_format() {
        let output: OutputConfig = serde_yaml::from_str("format: json").unwrap();
        assert_eq!(output.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_zero_reference() {
        let config = SonicConfig {
            mapping: MappingConfig {
                disk_reference_bytes: 0.0,
                ..MappingConfig::default()
            },
            ..SonicConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_reference() {
        let mapping = MappingConfig {
            network_reference_bytes: f64::INFINITY,
            ..MappingConfig::default()
        };

        assert!(mapping.validate().is_err());
    }

    #[test]
    fn test_rejects_interval_out_of_range() {
        let config = SonicConfig {
            source: SourceConfig {
                interval_ms: 1,
                looping: true,
            },
            ..SonicConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_scenarios() {
        let scenario = ScenarioConfig {
            name: "burst".to_string(),
            metrics: SystemMetrics::default(),
            extended: ExtendedMetrics::default(),
        };
        let config = SonicConfig {
            scenarios: vec![scenario.clone(), scenario],
            ..SonicConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("burst"));
    }

    #[test]
    fn test_rejects_blank_scenario_name() {
        let config = SonicConfig {
            scenarios: vec![ScenarioConfig {
                name: "  ".to_string(),
                metrics: SystemMetrics::default(),
                extended: ExtendedMetrics::default(),
            }],
            ..SonicConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
