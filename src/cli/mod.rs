//! CLI interface for SysSonic

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use syssonic::config::OutputFormat;
use syssonic::SystemMetrics;

/// Turn your system metrics into music
#[derive(Parser)]
#[command(name = "syssonic")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults apply if it does not exist)
    #[arg(short, long, global = true, default_value = "syssonic.yaml")]
    pub config: PathBuf,

    /// Report format, overriding the config file
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log filter when RUST_LOG is unset (e.g. "info", "syssonic=debug")
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map a single snapshot given on the command line
    Map {
        /// Built-in workload (idle, browsing, rendering, gaming, compiling)
        #[arg(short, long, conflicts_with_all = ["cpu", "memory", "disk_read", "disk_write", "net_rx", "net_tx", "temp"])]
        scenario: Option<String>,

        /// CPU usage, percent
        #[arg(long, default_value_t = 0.0)]
        cpu: f64,

        /// Memory usage, percent
        #[arg(long, default_value_t = 0.0)]
        memory: f64,

        /// Disk reads, bytes/sec
        #[arg(long, default_value_t = 0)]
        disk_read: u64,

        /// Disk writes, bytes/sec
        #[arg(long, default_value_t = 0)]
        disk_write: u64,

        /// Network received, bytes/sec
        #[arg(long, default_value_t = 0)]
        net_rx: u64,

        /// Network transmitted, bytes/sec
        #[arg(long, default_value_t = 0)]
        net_tx: u64,

        /// Temperature, degrees Celsius (defaults to the no-sensor reading)
        #[arg(long, default_value_t = SystemMetrics::FALLBACK_TEMPERATURE, allow_negative_numbers = true)]
        temp: f64,
    },

    /// Show how every built-in and configured workload sounds
    Demo,

    /// Replay workloads on a timer, mapping each snapshot as it arrives
    Watch {
        /// Stop after this many snapshots (0 = until Ctrl+C)
        #[arg(short = 'n', long, default_value_t = 0)]
        count: usize,

        /// Milliseconds between snapshots, overriding the config file
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// Validate a configuration file
    Check,

    /// Generate an example configuration file
    Init,
}
