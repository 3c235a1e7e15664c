//! MetricsSource trait and Snapshot definition

use super::{ExtendedMetrics, SystemMetrics};
use std::time::Instant;
use tokio::sync::broadcast;

/// A metrics reading emitted by a source
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Name of the source that emitted this
    pub source: String,

    /// Human-readable label for the reading (e.g. the workload name)
    pub label: String,

    /// When this reading was taken
    pub timestamp: Instant,

    /// The reading itself
    pub metrics: SystemMetrics,

    /// Optional readings beyond the core snapshot
    pub extended: ExtendedMetrics,
}

impl Snapshot {
    /// Create a new snapshot stamped with the current time
    pub fn new(source: impl Into<String>, label: impl Into<String>, metrics: SystemMetrics) -> Self {
        Self {
            source: source.into(),
            label: label.into(),
            timestamp: Instant::now(),
            metrics,
            extended: ExtendedMetrics::default(),
        }
    }

    /// Attach optional readings
    pub fn with_extended(mut self, extended: ExtendedMetrics) -> Self {
        self.extended = extended;
        self
    }
}

/// Trait for producers of metrics snapshots
pub trait MetricsSource: Send + Sync {
    /// Get the name of this source
    fn name(&self) -> &str;

    /// Start producing snapshots
    fn start(&mut self) -> anyhow::Result<()>;

    /// Stop producing snapshots
    fn stop(&mut self);

    /// Check if the source is running
    fn is_running(&self) -> bool;

    /// Subscribe to snapshots from this source
    fn subscribe(&self) -> broadcast::Receiver<Snapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_creation() {
        let metrics = SystemMetrics::default().with_cpu(12.0);
        let snapshot = Snapshot::new("replay", "Idle System", metrics);

        assert_eq!(snapshot.source, "replay");
        assert_eq!(snapshot.label, "Idle System");
        assert_eq!(snapshot.metrics.cpu_usage, 12.0);
        assert!(snapshot.extended.is_empty());
        assert!(snapshot.timestamp <= Instant::now());
    }

    #[test]
    fn test_snapshot_with_extended() {
        let extended = ExtendedMetrics {
            process_count: Some(240),
            ..ExtendedMetrics::default()
        };
        let snapshot = Snapshot::new("replay", "busy", SystemMetrics::default())
            .with_extended(extended.clone());

        assert_eq!(snapshot.extended, extended);
    }
}
