//! Encoding sinks.
//!
//! Sinks consume captured frames in index order and finalize a single
//! [`Artifact`](crate::encode::sink::Artifact). Two real backends exist behind the
//! same [`FrameSink`](crate::encode::sink::FrameSink) contract: an animated-GIF
//! palette encoder and an `ffmpeg` MP4 encoder.

/// `ffmpeg`-based sink (MP4 output via the system `ffmpeg` binary).
pub mod ffmpeg;
/// Palette-quantizing animated GIF sink.
pub mod gif;
/// PNG-per-frame debug dump sink.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
