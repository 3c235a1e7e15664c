//! JSON lines renderer

use super::AudioRenderer;
use crate::error::SonicResult;
use crate::mapping::MusicalParameters;
use crate::metrics::SystemMetrics;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Report<'a> {
    label: &'a str,
    metrics: &'a SystemMetrics,
    params: &'a MusicalParameters,
}

/// Writes one JSON object per snapshot, newline separated
pub struct JsonRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the renderer and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AudioRenderer for JsonRenderer<W> {
    fn render(
        &mut self,
        label: &str,
        metrics: &SystemMetrics,
        params: &MusicalParameters,
    ) -> SonicResult<()> {
        let report = Report {
            label,
            metrics,
            params,
        };
        serde_json::to_writer(&mut self.writer, &report)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
