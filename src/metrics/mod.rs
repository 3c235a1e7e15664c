//! Metrics snapshots and the sources that produce them
//!
//! Sources emit `Snapshot`s on a broadcast channel; the mapping engine
//! consumes the `SystemMetrics` inside each one, plus any optional
//! `ExtendedMetrics` the host reported.

mod extended;
mod scenario;
mod snapshot;
mod source;

pub use extended::{
    BatteryReading, BatteryState, ExtendedMetrics, GpuReading, LoadAverage, ProcessReading,
    SwapUsage,
};
pub use scenario::{Scenario, ScenarioSource, Workload};
pub use snapshot::SystemMetrics;
pub use source::{MetricsSource, Snapshot};
