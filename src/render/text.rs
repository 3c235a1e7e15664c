//! Plain-text status report
//!
//! Prints the raw readings, their musical translation, and a row of bar
//! charts so a listener can match what they hear to what the machine is doing.

use super::AudioRenderer;
use crate::error::SonicResult;
use crate::mapping::{ExtendedParameters, MusicalParameters, RhythmPattern, COOL_CELSIUS};
use crate::metrics::SystemMetrics;
use std::io::Write;

/// Width of every bar chart, in cells
pub const BAR_WIDTH: usize = 20;

const RULE_WIDTH: usize = 60;
/// Disk throughput per bar cell, bytes/sec
const IO_BYTES_PER_CELL: f64 = 1_500_000.0;
/// Temperature per bar cell above `COOL_CELSIUS`
const DEGREES_PER_CELL: f64 = 2.5;

/// Human-readable renderer
pub struct TextRenderer<W: Write> {
    writer: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the renderer and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_metrics(&mut self, metrics: &SystemMetrics) -> SonicResult<()> {
        let w = &mut self.writer;
        writeln!(w, "SYSTEM METRICS:")?;
        writeln!(w, "  CPU Usage:      {:>6.1}%", metrics.cpu_usage)?;
        writeln!(w, "  Memory Usage:   {:>6.1}%", metrics.memory_usage)?;
        writeln!(w, "  Disk Read:      {:>6} KB/s", metrics.disk_read_bytes / 1024)?;
        writeln!(w, "  Disk Write:     {:>6} KB/s", metrics.disk_write_bytes / 1024)?;
        writeln!(w, "  Network RX:     {:>6} KB/s", metrics.network_rx_bytes / 1024)?;
        writeln!(w, "  Network TX:     {:>6} KB/s", metrics.network_tx_bytes / 1024)?;
        writeln!(w, "  Temperature:    {:>6.1}°C", metrics.temperature)?;
        Ok(())
    }

    fn write_translation(&mut self, params: &MusicalParameters) -> SonicResult<()> {
        let w = &mut self.writer;
        let motif: Vec<&str> = params.melody_motif.iter().map(|p| p.name()).collect();

        writeln!(w, "MUSICAL TRANSLATION:")?;
        writeln!(w, "  Melody:         {} (from A minor pentatonic)", params.melody_note)?;
        writeln!(w, "  Motif:          {}", motif.join(" "))?;
        writeln!(w, "  Bass:           {} - {}", params.bass_note, params.bass_description)?;
        writeln!(w, "                  Velocity: {:.0}%", params.bass_velocity * 100.0)?;
        writeln!(w, "  Rhythm:         {}", params.rhythm_density)?;
        writeln!(w, "    Kick:         {}", RhythmPattern::lane(params.rhythm.kicks()))?;
        writeln!(w, "    Snare:        {}", RhythmPattern::lane(params.rhythm.snares()))?;
        writeln!(w, "  Tempo:          {:.0} BPM", params.tempo_bpm)?;
        writeln!(w, "  Filter Cutoff:  {:.0} Hz", params.filter_cutoff_hz)?;
        writeln!(w, "  Reverb:         {:.0}%", params.reverb_mix_percent)?;
        writeln!(w, "  Atmosphere:     {}", params.atmosphere)?;
        Ok(())
    }

    fn write_extended(&mut self, extended: &ExtendedParameters) -> SonicResult<()> {
        let w = &mut self.writer;
        writeln!(w, "EXTENDED VOICES:")?;
        match &extended.gpu {
            Some(gpu) => {
                let notes: Vec<&str> = gpu.notes.iter().map(|p| p.name()).collect();
                writeln!(
                    w,
                    "  GPU Voice:      {} (D Dorian) at {:.0}%",
                    notes.join(" "),
                    gpu.intensity * 100.0
                )?;
                writeln!(
                    w,
                    "                  Chorus {:.0}%, flanger {:.1} Hz, room {:.0}%",
                    gpu.chorus_depth * 100.0,
                    gpu.flanger_rate_hz,
                    gpu.room_size * 100.0
                )?;
            }
            None => writeln!(w, "  GPU Voice:      silent")?,
        }
        writeln!(
            w,
            "  Harmony:        {} voices, polyrhythm {:.0}%",
            extended.harmonic_voices,
            extended.polyrhythm_factor * 100.0
        )?;
        writeln!(w, "  Distortion:     {:.0}%", extended.swap_distortion * 100.0)?;
        writeln!(
            w,
            "  Dynamics:       volume x{:.2}, tonality {:+.1}",
            extended.volume_multiplier, extended.tonality
        )?;
        writeln!(w, "  Hi-hats:        {:.0}%", extended.hihat_density * 100.0)?;
        writeln!(w, "  Fan Ambience:   {:.0}%", extended.fan_ambience * 100.0)?;
        for (core, pattern) in extended.core_patterns.iter().enumerate() {
            writeln!(w, "    Core {:<2}       {}", core, RhythmPattern::lane(&pattern.hits))?;
        }
        for motif in &extended.process_motifs {
            writeln!(w, "    {:<14}{} {}", motif.name, motif.notes[0], motif.notes[1])?;
        }
        Ok(())
    }

    fn write_bars(&mut self, metrics: &SystemMetrics) -> SonicResult<()> {
        let w = &mut self.writer;
        let io_cells = metrics.disk_total_bytes() as f64 / IO_BYTES_PER_CELL;
        let temp_cells = (metrics.temperature - COOL_CELSIUS) / DEGREES_PER_CELL;

        writeln!(w, "AUDIO CHARACTERISTICS:")?;
        writeln!(w, "  Pitch (CPU):    [{}]", bar(metrics.cpu_usage / 5.0))?;
        writeln!(w, "  Bass (Memory):  [{}]", bar(metrics.memory_usage / 5.0))?;
        writeln!(w, "  Rhythm (I/O):   [{}]", bar(io_cells))?;
        writeln!(w, "  Effects (Temp): [{}]", bar(temp_cells))?;
        Ok(())
    }
}

impl<W: Write> AudioRenderer for TextRenderer<W> {
    fn render(
        &mut self,
        label: &str,
        metrics: &SystemMetrics,
        params: &MusicalParameters,
    ) -> SonicResult<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.writer, "\n{rule}\n  {label}\n{rule}\n")?;

        self.write_metrics(metrics)?;
        writeln!(self.writer)?;
        self.write_translation(params)?;
        writeln!(self.writer)?;
        if let Some(extended) = &params.extended {
            self.write_extended(extended)?;
            writeln!(self.writer)?;
        }
        self.write_bars(metrics)?;

        self.writer.flush()?;
        Ok(())
    }
}

/// Fixed-width bar with `cells` filled, clamped to the bar width
pub fn bar(cells: f64) -> String {
    // Saturating cast: negatives and NaN become zero
    let filled = (cells.floor() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
