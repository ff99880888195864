/// CPU rasterizer over one reused RGBA8 buffer.
pub mod raster;
/// Frame capture loop.
pub mod sequencer;
