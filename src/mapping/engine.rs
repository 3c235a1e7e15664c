//! The metrics-to-music mapping engine
//!
//! Each metric drives one musical dimension, independently of the others:
//!
//! | Metric      | Output                                   |
//! |-------------|------------------------------------------|
//! | CPU         | melody pitch (pentatonic scale degree)   |
//! | Memory      | bass register, bass velocity             |
//! | Disk I/O    | rhythm density, drum grid                |
//! | Network     | tempo                                    |
//! | Temperature | filter cutoff, reverb mix, atmosphere    |
//!
//! Hosts that report `ExtendedMetrics` get the extra voices described in
//! the `extended` module on top; the core outputs never depend on them.
//!
//! Mapping is pure and total: every ratio is clamped to its range before use,
//! so any snapshot, however implausible, yields a bounded result.

use super::extended::ExtendedMapper;
use super::linear::LinearMapper;
use super::params::{Atmosphere, BassRegister, MusicalParameters, RhythmDensity};
use super::pattern::RhythmPattern;
use super::scale::{self, MELODY_SCALE, TOP_DEGREE};
use super::threshold::StepFunction;
use super::Mapper;
use crate::config::MappingConfig;
use crate::metrics::{ExtendedMetrics, SystemMetrics};

/// Tempo with no network traffic, unless configured otherwise
pub const TEMPO_MIN_BPM: f64 = 90.0;
/// Tempo gained between no traffic and the network reference
pub const TEMPO_SPAN_BPM: f64 = 40.0;
/// Tempo at or above the network reference, with the default base tempo
pub const TEMPO_MAX_BPM: f64 = TEMPO_MIN_BPM + TEMPO_SPAN_BPM;
/// Filter cutoff at or below `COOL_CELSIUS`
pub const CUTOFF_MIN_HZ: f64 = 400.0;
/// Filter cutoff at or above `HOT_CELSIUS`
pub const CUTOFF_MAX_HZ: f64 = 3000.0;
/// Reverb send at or above `HOT_CELSIUS`
pub const REVERB_MAX_PERCENT: f64 = 50.0;
/// Temperature that reads as fully cool
pub const COOL_CELSIUS: f64 = 30.0;
/// Temperature that reads as fully hot
pub const HOT_CELSIUS: f64 = 70.0;

const BASS_TIERS: StepFunction<BassRegister> = StepFunction::rising(
    &[(75.0, BassRegister::Ominous), (50.0, BassRegister::MidRange)],
    BassRegister::Light,
);

const RHYTHM_TIERS: StepFunction<RhythmDensity> = StepFunction::falling(
    &[(0.3, RhythmDensity::Sparse), (0.6, RhythmDensity::Moderate)],
    RhythmDensity::Dense,
);

const ATMOSPHERE_TIERS: StepFunction<Atmosphere> = StepFunction::falling(
    &[(0.3, Atmosphere::TightDry), (0.7, Atmosphere::ModerateSpace)],
    Atmosphere::SpaciousConcerning,
);

/// Stateless mapper from metrics snapshots to musical parameters
///
/// Holds only the fixed mapping curves; `map` borrows immutably, so a
/// single engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct MappingEngine {
    melody: LinearMapper,
    velocity: LinearMapper,
    disk: LinearMapper,
    network: LinearMapper,
    thermal: LinearMapper,
    tempo: LinearMapper,
    cutoff: LinearMapper,
    reverb: LinearMapper,
    extended: ExtendedMapper,
}

impl MappingEngine {
    /// Create an engine with the given references and base tempo
    ///
    /// The config is expected to be validated already; a zero reference
    /// degrades to a constant half-scale reading rather than failing.
    pub fn new(config: &MappingConfig) -> Self {
        Self {
            melody: LinearMapper::new("cpu_to_degree", 0.0, 100.0, 0.0, TOP_DEGREE as f64),
            velocity: LinearMapper::unit("memory_to_velocity", 0.0, 100.0),
            disk: LinearMapper::unit("disk_load", 0.0, config.disk_reference_bytes),
            network: LinearMapper::unit("network_load", 0.0, config.network_reference_bytes),
            thermal: LinearMapper::unit("thermal_load", COOL_CELSIUS, HOT_CELSIUS),
            tempo: LinearMapper::new(
                "tempo",
                0.0,
                1.0,
                config.base_tempo_bpm,
                config.base_tempo_bpm + TEMPO_SPAN_BPM,
            ),
            cutoff: LinearMapper::new("filter_cutoff", 0.0, 1.0, CUTOFF_MIN_HZ, CUTOFF_MAX_HZ),
            reverb: LinearMapper::new("reverb_mix", 0.0, 1.0, 0.0, REVERB_MAX_PERCENT),
            extended: ExtendedMapper::new(),
        }
    }

    /// Map one snapshot together with optional readings
    ///
    /// Empty extras leave `extended` unset, exactly as `map` does.
    pub fn map_with(&self, metrics: &SystemMetrics, extras: &ExtendedMetrics) -> MusicalParameters {
        let mut params = self.map(metrics);
        if !extras.is_empty() {
            params.extended = Some(self.extended.map(extras));
        }
        params
    }

    /// Map one snapshot
    pub fn map(&self, metrics: &SystemMetrics) -> MusicalParameters {
        let melody_index = self.melody_degree(metrics.cpu_usage);

        let bass = BASS_TIERS.select(metrics.memory_usage);

        let io_load = self.disk.map(metrics.disk_total_bytes() as f64);
        let network_load = self.network.map(metrics.network_total_bytes() as f64);
        let thermal_load = self.thermal.map(metrics.temperature);

        MusicalParameters {
            melody_note: MELODY_SCALE[melody_index],
            melody_index,
            melody_motif: scale::motif(melody_index),
            bass_note: bass.note(),
            bass_description: bass,
            bass_velocity: self.velocity.map(metrics.memory_usage),
            rhythm_density: RHYTHM_TIERS.select(io_load),
            rhythm: RhythmPattern::from_disk_activity(
                metrics.disk_read_bytes,
                metrics.disk_write_bytes,
                io_load,
            ),
            tempo_bpm: self.tempo.map(network_load),
            filter_cutoff_hz: self.cutoff.map(thermal_load),
            reverb_mix_percent: self.reverb.map(thermal_load),
            atmosphere: ATMOSPHERE_TIERS.select(thermal_load),
            io_load,
            network_load,
            thermal_load,
            extended: None,
        }
    }

    /// Scale degree for a CPU reading; 100% lands on the top degree
    fn melody_degree(&self, cpu_usage: f64) -> usize {
        // Saturating float-to-int cast; the mapper already clamps to 0..=12
        (self.melody.map(cpu_usage).floor() as usize).min(TOP_DEGREE)
    }
}

impl Default for MappingEngine {
    fn default() -> Self {
        Self::new(&MappingConfig::default())
    }
}
