//! Extra voices for hosts that report more than the core readings
//!
//! | Reading        | Output                                          |
//! |----------------|-------------------------------------------------|
//! | GPU            | Dorian counter-melody, chorus, flanger, room    |
//! | Load average   | polyrhythm factor, harmonic voice count         |
//! | Swap           | bass distortion                                 |
//! | Battery        | volume multiplier, major/minor tonality bias    |
//! | Per-core CPU   | one 16-step pattern per core                    |
//! | Process count  | hi-hat density                                  |
//! | Top processes  | two-note phrase per process                     |
//! | Fans           | ambient noise level                             |
//!
//! A missing reading leaves its output neutral: no GPU voice, one harmonic
//! voice, no distortion, full volume, neutral tonality, silent hi-hats and
//! fans. As in the core engine, NaN reads as the bottom of its range.

use super::linear::LinearMapper;
use super::pattern::GRID_STEPS;
use super::scale::{Pitch, GPU_SCALE, PROCESS_SCALE};
use super::threshold::StepFunction;
use super::Mapper;
use crate::metrics::{BatteryReading, BatteryState, ExtendedMetrics, GpuReading, SwapUsage};
use serde::Serialize;

/// GPU utilization under which, with no VRAM in use, no GPU voice plays
const GPU_IDLE_PERCENT: f64 = 0.1;
/// Swap usage where light distortion turns heavy
const SWAP_KNEE_PERCENT: f64 = 20.0;

/// Harmonic voices by 5-minute load average
const HARMONY_TIERS: StepFunction<usize> =
    StepFunction::falling(&[(1.0, 1), (3.0, 2), (6.0, 3)], 4);

/// Tonality while discharging, by charge percent
const DISCHARGE_TONALITY: StepFunction<f64> = StepFunction::falling(&[(20.0, -0.7)], -0.3);

const CORE_TIERS: StepFunction<CoreActivity> = StepFunction::falling(
    &[
        (0.2, CoreActivity::Idle),
        (0.5, CoreActivity::Light),
        (0.8, CoreActivity::Busy),
    ],
    CoreActivity::Saturated,
);

/// How hard a single core is working
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreActivity {
    /// Under 20%: one hit per bar
    Idle,
    /// Under 50%: half notes
    Light,
    /// Under 80%: quarter notes
    Busy,
    /// Every other sixteenth
    Saturated,
}

impl CoreActivity {
    /// Sorted grid steps for this activity on the given core
    ///
    /// The core index shifts the downbeat so neighbouring cores interlock.
    pub fn hits(self, core: usize) -> Vec<usize> {
        let offset = core % 4;
        let first = offset * 4;
        let mut hits = match self {
            CoreActivity::Idle => vec![first],
            CoreActivity::Light => vec![first, (first + 8) % GRID_STEPS],
            CoreActivity::Busy => (0..4).map(|beat| (first + beat * 4) % GRID_STEPS).collect(),
            CoreActivity::Saturated => (0..GRID_STEPS).filter(|step| step % 2 == offset % 2).collect(),
        };
        hits.sort_unstable();
        hits
    }
}

/// Counter-melody and effects driven by the GPU
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuVoice {
    /// Four-note phrase from the Dorian scale
    pub notes: [Pitch; 4],
    /// Voice loudness (0-1)
    pub intensity: f64,
    /// Chorus depth (0-0.3)
    pub chorus_depth: f64,
    /// Flanger rate (0.5-3 Hz)
    pub flanger_rate_hz: f64,
    /// Reverb room size from VRAM use (0-1)
    pub room_size: f64,
}

/// Rhythm for one core
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorePattern {
    pub activity: CoreActivity,
    pub hits: Vec<usize>,
}

/// Short phrase for one busy process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMotif {
    pub name: String,
    pub notes: [Pitch; 2],
}

/// Outputs driven by `ExtendedMetrics`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedParameters {
    /// GPU voice; absent without an active GPU
    pub gpu: Option<GpuVoice>,
    /// How far short-term load runs ahead of the long-term trend (0-1)
    pub polyrhythm_factor: f64,
    /// Harmony voices on top of the melody (1-4)
    pub harmonic_voices: usize,
    /// Bass distortion from swapping (0-1)
    pub swap_distortion: f64,
    /// Master volume multiplier (0.5-1)
    pub volume_multiplier: f64,
    /// -1 (dark, minor) to 1 (bright, major)
    pub tonality: f64,
    pub core_patterns: Vec<CorePattern>,
    /// Hi-hat density (0-1)
    pub hihat_density: f64,
    pub process_motifs: Vec<ProcessMotif>,
    /// Ambient fan noise (0-1)
    pub fan_ambience: f64,
}

/// Maps `ExtendedMetrics` onto `ExtendedParameters`
#[derive(Debug, Clone)]
pub struct ExtendedMapper {
    gpu_degree: LinearMapper,
    gpu_intensity: LinearMapper,
    gpu_thermal: LinearMapper,
    chorus: LinearMapper,
    flanger: LinearMapper,
    load_trend: LinearMapper,
    swap_light: LinearMapper,
    swap_heavy: LinearMapper,
    charge_volume: LinearMapper,
    core_load: LinearMapper,
    hihat: LinearMapper,
    process_degree: LinearMapper,
    fan: LinearMapper,
}

impl ExtendedMapper {
    pub fn new() -> Self {
        let gpu_top = (GPU_SCALE.len() - 1) as f64;
        let process_top = (PROCESS_SCALE.len() - 1) as f64;
        Self {
            gpu_degree: LinearMapper::new("gpu_to_degree", 0.0, 100.0, 0.0, gpu_top),
            gpu_intensity: LinearMapper::unit("gpu_intensity", 0.0, 100.0),
            gpu_thermal: LinearMapper::unit("gpu_thermal", 40.0, 80.0),
            chorus: LinearMapper::new("chorus_depth", 0.0, 1.0, 0.0, 0.3),
            flanger: LinearMapper::new("flanger_rate", 0.0, 1.0, 0.5, 3.0),
            load_trend: LinearMapper::unit("load_trend", 0.0, 4.0),
            swap_light: LinearMapper::new("swap_light", 0.0, SWAP_KNEE_PERCENT, 0.0, 0.2),
            swap_heavy: LinearMapper::new("swap_heavy", SWAP_KNEE_PERCENT, 100.0, 0.2, 1.0),
            charge_volume: LinearMapper::new("charge_volume", 0.0, 100.0, 0.5, 1.0),
            core_load: LinearMapper::unit("core_load", 0.0, 100.0),
            hihat: LinearMapper::unit("process_count", 50.0, 300.0),
            process_degree: LinearMapper::new("process_to_degree", 0.0, 100.0, 0.0, process_top),
            fan: LinearMapper::unit("fan_rpm", 500.0, 3000.0),
        }
    }

    /// Map the optional readings
    pub fn map(&self, extras: &ExtendedMetrics) -> ExtendedParameters {
        let (polyrhythm_factor, harmonic_voices) = match extras.load_average {
            Some(load) => (
                self.load_trend.map(load.one - load.fifteen),
                HARMONY_TIERS.select(nan_as_zero(load.five)),
            ),
            None => (0.0, 1),
        };

        let (volume_multiplier, tonality) = match extras.battery {
            Some(battery) => (self.charge_volume.map(battery.charge_percent), tonality(&battery)),
            None => (1.0, 0.0),
        };

        ExtendedParameters {
            gpu: extras.gpu.as_ref().and_then(|gpu| self.gpu_voice(gpu)),
            polyrhythm_factor,
            harmonic_voices,
            swap_distortion: extras.swap.map_or(0.0, |swap| self.swap_distortion(&swap)),
            volume_multiplier,
            tonality,
            core_patterns: extras
                .per_core_usage
                .iter()
                .enumerate()
                .map(|(core, &usage)| {
                    let activity = CORE_TIERS.select(self.core_load.map(usage));
                    CorePattern {
                        activity,
                        hits: activity.hits(core),
                    }
                })
                .collect(),
            hihat_density: extras
                .process_count
                .map_or(0.0, |count| self.hihat.map(count as f64)),
            process_motifs: extras
                .top_processes
                .iter()
                .map(|process| {
                    let top = PROCESS_SCALE.len() - 1;
                    let degree = degree(&self.process_degree, process.cpu_usage, top);
                    ProcessMotif {
                        name: process.name.clone(),
                        notes: [PROCESS_SCALE[degree], PROCESS_SCALE[(degree + 2).min(top)]],
                    }
                })
                .collect(),
            fan_ambience: self.fan_ambience(&extras.fan_rpm),
        }
    }

    fn gpu_voice(&self, gpu: &GpuReading) -> Option<GpuVoice> {
        let active = gpu.utilization >= GPU_IDLE_PERCENT || gpu.memory_used_bytes > 0;
        if !active {
            return None;
        }

        let top = GPU_SCALE.len() - 1;
        let degree = degree(&self.gpu_degree, gpu.utilization, top);
        let heat = self.gpu_thermal.map(gpu.temperature);
        let room_size = if gpu.memory_total_bytes == 0 {
            0.0
        } else {
            (gpu.memory_used_bytes as f64 / gpu.memory_total_bytes as f64).min(1.0)
        };

        Some(GpuVoice {
            notes: [
                GPU_SCALE[degree],
                GPU_SCALE[(degree + 2).min(top)],
                GPU_SCALE[degree.saturating_sub(1)],
                GPU_SCALE[degree],
            ],
            intensity: self.gpu_intensity.map(gpu.utilization),
            chorus_depth: self.chorus.map(heat),
            flanger_rate_hz: self.flanger.map(heat),
            room_size,
        })
    }

    /// Gentle up to the knee, then steep
    fn swap_distortion(&self, swap: &SwapUsage) -> f64 {
        let percent = swap.percent();
        if percent < SWAP_KNEE_PERCENT {
            self.swap_light.map(percent)
        } else {
            self.swap_heavy.map(percent)
        }
    }

    fn fan_ambience(&self, rpm: &[u32]) -> f64 {
        if rpm.is_empty() {
            return 0.0;
        }
        let mean = rpm.iter().map(|&r| r as f64).sum::<f64>() / rpm.len() as f64;
        self.fan.map(mean)
    }
}

impl Default for ExtendedMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn tonality(battery: &BatteryReading) -> f64 {
    match battery.state {
        BatteryState::Charging => 0.3,
        BatteryState::Discharging => DISCHARGE_TONALITY.select(nan_as_zero(battery.charge_percent)),
        BatteryState::Full => 0.5,
        BatteryState::Empty => -1.0,
        BatteryState::Unknown => 0.0,
    }
}

/// Floor of a clamped scale position
fn degree(mapper: &LinearMapper, input: f64, top: usize) -> usize {
    (mapper.map(input).floor() as usize).min(top)
}

fn nan_as_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
