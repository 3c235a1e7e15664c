//! Mapping from system metrics to musical parameters
//!
//! `MappingEngine` composes a handful of linear curves and threshold
//! tables into one pure function from `SystemMetrics` to
//! `MusicalParameters`, with optional extra voices for `ExtendedMetrics`.

mod engine;
mod extended;
mod linear;
mod mapper;
mod params;
mod pattern;
mod scale;
mod threshold;

pub use engine::{
    MappingEngine, COOL_CELSIUS, CUTOFF_MAX_HZ, CUTOFF_MIN_HZ, HOT_CELSIUS, REVERB_MAX_PERCENT,
    TEMPO_MAX_BPM, TEMPO_MIN_BPM, TEMPO_SPAN_BPM,
};
pub use extended::{
    CoreActivity, CorePattern, ExtendedMapper, ExtendedParameters, GpuVoice, ProcessMotif,
};
pub use linear::LinearMapper;
pub use mapper::Mapper;
pub use params::{Atmosphere, BassRegister, MusicalParameters, RhythmDensity};
pub use pattern::{RhythmPattern, GRID_STEPS};
pub use scale::{motif, Pitch, GPU_SCALE, MELODY_SCALE, PROCESS_SCALE, TOP_DEGREE};
pub use threshold::StepFunction;
