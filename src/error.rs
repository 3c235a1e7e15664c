//! Error types for the source and renderer seams
//!
//! The mapping engine itself never fails; these cover the collaborators
//! around it.

use thiserror::Error;

/// Errors raised by metrics sources and renderers
#[derive(Debug, Error)]
pub enum SonicError {
    /// Scenario lookup by slug found nothing
    #[error("unknown scenario '{0}' (expected one of: idle, browsing, rendering, gaming, compiling)")]
    UnknownScenario(String),

    /// A replay source was given nothing to play
    #[error("scenario source '{0}' has an empty playlist")]
    EmptyPlaylist(String),

    /// Writing a report failed
    #[error("failed to write report")]
    Render(#[from] std::io::Error),

    /// Encoding a JSON report failed
    #[error("failed to encode report")]
    Encode(#[from] serde_json::Error),
}

/// Result alias for library operations that can fail
pub type SonicResult<T> = Result<T, SonicError>;
