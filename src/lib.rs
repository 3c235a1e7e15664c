//! SysSonic - hear your machine's health
//!
//! Maps system metrics snapshots (CPU, memory, disk, network, temperature)
//! onto musical control parameters. CPU becomes melody, memory becomes bass,
//! disk I/O becomes rhythm, network becomes tempo, heat becomes space.

pub mod config;
pub mod error;
pub mod mapping;
pub mod metrics;
pub mod render;

pub use config::SonicConfig;
pub use error::{SonicError, SonicResult};
pub use mapping::{MappingEngine, MusicalParameters};
pub use metrics::SystemMetrics;
