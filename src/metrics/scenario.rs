//! Scripted workloads and a source that replays them
//!
//! Stands in for live telemetry: a fixed playlist of snapshots is emitted
//! on a timer, optionally looping, through the same broadcast channel a
//! real collector would use.

use super::{
    BatteryReading, BatteryState, ExtendedMetrics, GpuReading, LoadAverage, MetricsSource,
    ProcessReading, Snapshot, SwapUsage, SystemMetrics,
};
use crate::error::{SonicError, SonicResult};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const GIB: u64 = 1 << 30;
const CHANNEL_CAPACITY: usize = 16;

/// A labelled snapshot in a replay playlist
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    pub label: String,
    pub metrics: SystemMetrics,
    pub extended: ExtendedMetrics,
}

impl Workload {
    /// Workload with core readings only
    pub fn new(label: impl Into<String>, metrics: SystemMetrics) -> Self {
        Self {
            label: label.into(),
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

/// Built-in demonstration workloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Idle,
    WebBrowsing,
    VideoRendering,
    Gaming,
    Compiling,
}

impl Scenario {
    /// All scenarios, quietest first
    pub const ALL: [Scenario; 5] = [
        Scenario::Idle,
        Scenario::WebBrowsing,
        Scenario::VideoRendering,
        Scenario::Gaming,
        Scenario::Compiling,
    ];

    /// Display title
    pub fn title(self) -> &'static str {
        match self {
            Scenario::Idle => "Idle System",
            Scenario::WebBrowsing => "Web Browsing",
            Scenario::VideoRendering => "Video Rendering",
            Scenario::Gaming => "Gaming Session",
            Scenario::Compiling => "Compiling Large Project",
        }
    }

    /// Short name used on the command line
    pub fn slug(self) -> &'static str {
        match self {
            Scenario::Idle => "idle",
            Scenario::WebBrowsing => "browsing",
            Scenario::VideoRendering => "rendering",
            Scenario::Gaming => "gaming",
            Scenario::Compiling => "compiling",
        }
    }

    /// The readings for this workload
    pub fn metrics(self) -> SystemMetrics {
        let base = SystemMetrics::default();
        match self {
            Scenario::Idle => base
                .with_cpu(5.0)
                .with_memory(35.0)
                .with_disk(1024, 512)
                .with_network(2048, 1024)
                .with_temperature(40.0),
            Scenario::WebBrowsing => base
                .with_cpu(25.0)
                .with_memory(55.0)
                .with_disk(102_400, 51_200)
                .with_network(5_242_880, 524_288)
                .with_temperature(48.0),
            Scenario::VideoRendering => base
                .with_cpu(95.0)
                .with_memory(85.0)
                .with_disk(10_485_760, 20_971_520)
                .with_network(1024, 512)
                .with_temperature(72.0),
            Scenario::Gaming => base
                .with_cpu(65.0)
                .with_memory(70.0)
                .with_disk(5_242_880, 1_048_576)
                .with_network(2_097_152, 524_288)
                .with_temperature(68.0),
            Scenario::Compiling => base
                .with_cpu(100.0)
                .with_memory(90.0)
                .with_disk(31_457_280, 15_728_640)
                .with_network(512, 256)
                .with_temperature(78.0),
        }
    }

    /// Readings beyond the core snapshot, where the workload has them
    pub fn extended(self) -> ExtendedMetrics {
        let base = ExtendedMetrics::default();
        match self {
            Scenario::Idle => base,
            Scenario::WebBrowsing => ExtendedMetrics {
                battery: Some(BatteryReading {
                    charge_percent: 64.0,
                    state: BatteryState::Discharging,
                }),
                process_count: Some(260),
                ..base
            },
            Scenario::VideoRendering => ExtendedMetrics {
                gpu: Some(GpuReading {
                    utilization: 78.0,
                    temperature: 66.0,
                    memory_used_bytes: 9 * GIB,
                    memory_total_bytes: 12 * GIB,
                }),
                load_average: Some(LoadAverage {
                    one: 7.5,
                    five: 6.8,
                    fifteen: 5.2,
                }),
                fan_rpm: vec![1800, 1950],
                ..base
            },
            Scenario::Gaming => ExtendedMetrics {
                gpu: Some(GpuReading {
                    utilization: 92.0,
                    temperature: 71.0,
                    memory_used_bytes: 6 * GIB,
                    memory_total_bytes: 8 * GIB,
                }),
                process_count: Some(210),
                fan_rpm: vec![2200],
                ..base
            },
            Scenario::Compiling => ExtendedMetrics {
                load_average: Some(LoadAverage {
                    one: 14.0,
                    five: 9.5,
                    fifteen: 4.0,
                }),
                swap: Some(SwapUsage {
                    used_bytes: GIB,
                    total_bytes: 4 * GIB,
                }),
                per_core_usage: vec![100.0, 100.0, 98.0, 100.0, 97.0, 100.0, 99.0, 100.0],
                process_count: Some(420),
                top_processes: vec![
                    ProcessReading::new("rustc", 96.0),
                    ProcessReading::new("cc1plus", 71.0),
                    ProcessReading::new("ld", 18.0),
                ],
                fan_rpm: vec![2600, 2800],
                ..base
            },
        }
    }

    /// Title, core readings and extended readings together
    pub fn workload(self) -> Workload {
        Workload::new(self.title(), self.metrics()).with_extended(self.extended())
    }

    /// Every built-in scenario, quietest first
    pub fn playlist() -> Vec<Workload> {
        Self::ALL.iter().map(|s| s.workload()).collect()
    }
}

impl FromStr for Scenario {
    type Err = SonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.slug() == wanted)
            .ok_or_else(|| SonicError::UnknownScenario(s.to_string()))
    }
}

/// Source that replays a fixed playlist of snapshots
///
/// A one-shot replay closes its channel after the last entry, so
/// subscribers see `RecvError::Closed` once they have drained it.
pub struct ScenarioSource {
    name: String,
    playlist: Arc<Vec<Workload>>,
    interval: Duration,
    looping: bool,
    running: Arc<AtomicBool>,
    /// Cleared by the replay task when a one-shot pass ends
    sender: Arc<Mutex<Option<broadcast::Sender<Snapshot>>>>,
    task: Option<JoinHandle<()>>,
}

impl ScenarioSource {
    /// Create a new replay source
    pub fn new(
        name: impl Into<String>,
        playlist: Vec<Workload>,
        interval: Duration,
    ) -> SonicResult<Self> {
        let name = name.into();
        if playlist.is_empty() {
            return Err(SonicError::EmptyPlaylist(name));
        }

        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Ok(Self {
            name,
            playlist: Arc::new(playlist),
            interval,
            looping: true,
            running: Arc::new(AtomicBool::new(false)),
            sender: Arc::new(Mutex::new(Some(sender))),
            task: None,
        })
    }

    /// Set whether the playlist restarts after the last entry
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Number of entries in one pass of the playlist
    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    /// Always false; construction rejects empty playlists
    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }
}

impl MetricsSource for ScenarioSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self) -> anyhow::Result<()> {
        if self.is_running() {
            return Ok(());
        }

        self.running.store(true, Ordering::SeqCst);
        info!(source = %self.name, entries = self.playlist.len(), looping = self.looping, "starting scenario source");

        let name = self.name.clone();
        let playlist = Arc::clone(&self.playlist);
        let interval = self.interval;
        let looping = self.looping;
        let running = Arc::clone(&self.running);
        let slot = Arc::clone(&self.sender);
        // A finished one-shot replay left no channel behind; open a fresh one
        let sender = lock(&self.sender)
            .get_or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone();

        let task = tokio::spawn(async move {
            'replay: loop {
                for workload in playlist.iter() {
                    if !running.load(Ordering::SeqCst) {
                        break 'replay;
                    }

                    debug!(source = %name, label = %workload.label, "emitting snapshot");
                    let snapshot = Snapshot::new(&name, &workload.label, workload.metrics)
                        .with_extended(workload.extended.clone());
                    // No receivers is fine
                    let _ = sender.send(snapshot);

                    tokio::time::sleep(interval).await;
                }

                if !looping {
                    break;
                }
            }

            running.store(false, Ordering::SeqCst);
            if !looping {
                // The last sender goes with this task, closing the channel
                lock(&slot).take();
            }
            debug!(source = %name, "scenario replay finished");
        });

        self.task = Some(task);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
            info!(source = %self.name, "stopped scenario source");
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        match lock(&self.sender).as_ref() {
            Some(sender) => sender.subscribe(),
            // Replay already over: a receiver whose sender is gone reports Closed
            None => broadcast::channel(1).1,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Drop for ScenarioSource {
    fn drop(&mut self) {
        self.stop();
    }
}
