//! Drum grid derived from disk activity
//!
//! A one-bar, sixteen-step kick/snare pattern. The base is four-on-the-floor
//! with a backbeat; busier I/O layers in extra hits, and the balance of reads
//! against writes decides whether the final sixteenth goes to the kick or the
//! snare.

use serde::Serialize;

/// Steps in one bar of the grid
pub const GRID_STEPS: usize = 16;

const BASE_KICKS: [usize; 4] = [0, 4, 8, 12];
const BASE_SNARES: [usize; 2] = [4, 12];

/// Kick and snare hit positions on a sixteen-step grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RhythmPattern {
    kicks: Vec<usize>,
    snares: Vec<usize>,
}

impl RhythmPattern {
    /// Build the pattern for a normalized I/O load and raw read/write rates
    pub fn from_disk_activity(read_bytes: u64, write_bytes: u64, io_load: f64) -> Self {
        let mut kicks = BASE_KICKS.to_vec();
        let mut snares = BASE_SNARES.to_vec();

        if io_load > 0.3 {
            kicks.extend([2, 10]);
        }
        if io_load > 0.6 {
            snares.extend([6, 14]);
        }
        if io_load > 0.8 {
            kicks.extend([1, 3, 9, 11]);
        }

        // Reads push the kick, writes push the snare
        if read_bytes > write_bytes {
            kicks.push(15);
        } else if write_bytes > read_bytes {
            snares.push(15);
        }

        kicks.sort_unstable();
        kicks.dedup();
        snares.sort_unstable();
        snares.dedup();

        Self { kicks, snares }
    }

    /// Kick positions, ascending
    pub fn kicks(&self) -> &[usize] {
        &self.kicks
    }

    /// Snare positions, ascending
    pub fn snares(&self) -> &[usize] {
        &self.snares
    }

    /// Total hits across both voices
    pub fn hit_count(&self) -> usize {
        self.kicks.len() + self.snares.len()
    }

    /// Render one voice as a step string, `x` for a hit and `.` for a rest
    pub fn lane(hits: &[usize]) -> String {
        (0..GRID_STEPS)
            .map(|step| if hits.contains(&step) { 'x' } else { '.' })
            .collect()
    }
}
