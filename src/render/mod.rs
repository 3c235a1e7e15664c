//! Renderers: consumers of mapped parameters
//!
//! An `AudioRenderer` receives every mapped snapshot. Synthesis backends
//! live outside this crate; the renderers here report the parameters as
//! text or JSON.

mod json;
mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::config::OutputFormat;
use crate::error::SonicResult;
use crate::mapping::MusicalParameters;
use crate::metrics::SystemMetrics;
use std::io::Write;

/// Trait for consumers of musical parameters
pub trait AudioRenderer {
    /// Handle one mapped snapshot
    fn render(
        &mut self,
        label: &str,
        metrics: &SystemMetrics,
        params: &MusicalParameters,
    ) -> SonicResult<()>;
}

/// Build the renderer for an output format
pub fn renderer_for<W: Write + 'static>(format: OutputFormat, writer: W) -> Box<dyn AudioRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new(writer)),
        OutputFormat::Json => Box::new(JsonRenderer::new(writer)),
    }
}
