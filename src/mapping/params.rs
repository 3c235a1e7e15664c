//! Musical parameters and their qualitative labels

use super::extended::ExtendedParameters;
use super::pattern::RhythmPattern;
use super::scale::Pitch;
use serde::Serialize;
use std::fmt;

/// Bass register selected by memory pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BassRegister {
    /// Memory above 75%
    Ominous,
    /// Memory above 50%
    MidRange,
    /// Memory at or below 50%
    Light,
}

impl BassRegister {
    /// The fixed note for this register
    pub fn note(self) -> Pitch {
        match self {
            BassRegister::Ominous => Pitch::A2,
            BassRegister::MidRange => Pitch::E2,
            BassRegister::Light => Pitch::E3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BassRegister::Ominous => "Deep, ominous",
            BassRegister::MidRange => "Mid-range",
            BassRegister::Light => "Light, comfortable",
        }
    }
}

/// Rhythmic complexity selected by disk I/O
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmDensity {
    Sparse,
    Moderate,
    Dense,
}

impl RhythmDensity {
    pub fn label(self) -> &'static str {
        match self {
            RhythmDensity::Sparse => "Sparse (4-on-floor)",
            RhythmDensity::Moderate => "Moderate (with fills)",
            RhythmDensity::Dense => "Dense (complex polyrhythms)",
        }
    }
}

/// Thermal severity, reported next to the filter and reverb settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Atmosphere {
    TightDry,
    ModerateSpace,
    SpaciousConcerning,
}

impl Atmosphere {
    pub fn label(self) -> &'static str {
        match self {
            Atmosphere::TightDry => "Tight, dry",
            Atmosphere::ModerateSpace => "Moderate space",
            Atmosphere::SpaciousConcerning => "Spacious, concerning",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_label!(BassRegister, RhythmDensity, Atmosphere);

/// Control parameters for one snapshot, ready for an audio renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicalParameters {
    /// Lead note, from the pentatonic melody scale
    pub melody_note: Pitch,
    /// Index of `melody_note` in the melody scale (0-12)
    pub melody_index: usize,
    /// Four-note phrase built around `melody_note`
    pub melody_motif: [Pitch; 4],

    /// Bass note, fixed per register
    pub bass_note: Pitch,
    /// Register that selected `bass_note`
    pub bass_description: BassRegister,
    /// Bass loudness (0-1)
    pub bass_velocity: f64,

    /// Rhythm tier
    pub rhythm_density: RhythmDensity,
    /// Drum grid for one bar
    pub rhythm: RhythmPattern,

    /// Global tempo (90-130 BPM)
    pub tempo_bpm: f64,

    /// Low-pass cutoff (400-3000 Hz)
    pub filter_cutoff_hz: f64,
    /// Reverb send (0-50 %)
    pub reverb_mix_percent: f64,
    /// Thermal severity label
    pub atmosphere: Atmosphere,

    /// Normalized disk load (0-1)
    pub io_load: f64,
    /// Normalized network load (0-1)
    pub network_load: f64,
    /// Normalized temperature (0-1)
    pub thermal_load: f64,

    /// Extra voices, present only when the host reported optional readings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<ExtendedParameters>,
}
