//! Mapper trait

/// A named scalar transfer curve
pub trait Mapper: Send + Sync {
    /// Get the name of this mapper
    fn name(&self) -> &str;

    /// Map an input value to an output value
    fn map(&self, input: f64) -> f64;
}
