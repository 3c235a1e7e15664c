//! Pitch table and the melody scale

use serde::Serialize;
use std::fmt;

/// Every symbolic pitch the engine can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pitch {
    E2,
    A2,
    E3,
    A3,
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
    D5,
    E5,
    F5,
    G5,
    A5,
    B5,
    C6,
    D6,
}

impl Pitch {
    /// MIDI note number
    pub fn midi(self) -> u8 {
        match self {
            Pitch::E2 => 40,
            Pitch::A2 => 45,
            Pitch::E3 => 52,
            Pitch::A3 => 57,
            Pitch::C4 => 60,
            Pitch::D4 => 62,
            Pitch::E4 => 64,
            Pitch::F4 => 65,
            Pitch::G4 => 67,
            Pitch::A4 => 69,
            Pitch::B4 => 71,
            Pitch::C5 => 72,
            Pitch::D5 => 74,
            Pitch::E5 => 76,
            Pitch::F5 => 77,
            Pitch::G5 => 79,
            Pitch::A5 => 81,
            Pitch::B5 => 83,
            Pitch::C6 => 84,
            Pitch::D6 => 86,
        }
    }

    /// Equal-tempered frequency in Hz (A4 = 440)
    pub fn frequency_hz(self) -> f64 {
        440.0 * 2.0_f64.powf((self.midi() as f64 - 69.0) / 12.0)
    }

    /// Scientific pitch name, e.g. "A3"
    pub fn name(self) -> &'static str {
        match self {
            Pitch::E2 => "E2",
            Pitch::A2 => "A2",
            Pitch::E3 => "E3",
            Pitch::A3 => "A3",
            Pitch::C4 => "C4",
            Pitch::D4 => "D4",
            Pitch::E4 => "E4",
            Pitch::F4 => "F4",
            Pitch::G4 => "G4",
            Pitch::A4 => "A4",
            Pitch::B4 => "B4",
            Pitch::C5 => "C5",
            Pitch::D5 => "D5",
            Pitch::E5 => "E5",
            Pitch::F5 => "F5",
            Pitch::G5 => "G5",
            Pitch::A5 => "A5",
            Pitch::B5 => "B5",
            Pitch::C6 => "C6",
            Pitch::D6 => "D6",
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A minor pentatonic (A, C, D, E, G) from A3 up to D6
pub const MELODY_SCALE: [Pitch; 13] = [
    Pitch::A3,
    Pitch::C4,
    Pitch::D4,
    Pitch::E4,
    Pitch::G4,
    Pitch::A4,
    Pitch::C5,
    Pitch::D5,
    Pitch::E5,
    Pitch::G5,
    Pitch::A5,
    Pitch::C6,
    Pitch::D6,
];

/// Highest valid index into [`MELODY_SCALE`]
pub const TOP_DEGREE: usize = MELODY_SCALE.len() - 1;

/// D Dorian from D4 up to F5, for the GPU voice
pub const GPU_SCALE: [Pitch; 10] = [
    Pitch::D4,
    Pitch::E4,
    Pitch::F4,
    Pitch::G4,
    Pitch::A4,
    Pitch::B4,
    Pitch::C5,
    Pitch::D5,
    Pitch::E5,
    Pitch::F5,
];

/// High register for per-process phrases
pub const PROCESS_SCALE: [Pitch; 5] = [Pitch::E5, Pitch::G5, Pitch::A5, Pitch::B5, Pitch::D6];

/// Four-note phrase around a scale degree: root, step down, leap up, root
pub fn motif(degree: usize) -> [Pitch; 4] {
    let degree = degree.min(TOP_DEGREE);
    [
        MELODY_SCALE[degree],
        MELODY_SCALE[degree.saturating_sub(1)],
        MELODY_SCALE[(degree + 2).min(TOP_DEGREE)],
        MELODY_SCALE[degree],
    ]
}
