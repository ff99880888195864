/// Render job configuration.
pub mod config;
/// Deterministic scene sampling.
pub mod sampler;
