//! Flipbook renders a deterministic procedural animation into raster frames and
//! assembles them into a single looping artifact (animated GIF by default, MP4 via
//! the system `ffmpeg` binary).
//!
//! # Pipeline overview
//!
//! 1. **Sample**: `SceneSampler + elapsed fraction -> VisualState` (pure, no clock reads)
//! 2. **Rasterize**: `VisualState -> FrameRGBA` (CPU rasterizer over one reused buffer)
//! 3. **Sequence**: drive the capture loop, hand out owned frame copies with delays
//! 4. **Encode**: stream frames in index order into a [`FrameSink`] and finalize the artifact
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: scene state is a pure function of the frame index,
//!   never of wall-clock time. Re-rendering the same [`RenderConfig`] yields byte-identical
//!   frames at every index.
//! - **Copy-before-reuse**: the rasterizer overwrites one backing buffer every frame;
//!   the sequencer clones each frame before it is handed downstream.
//! - **All-or-nothing output**: any capture or encode fault aborts the job; a partial
//!   artifact is never returned.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Encoding sinks (GIF, MP4, in-memory).
pub mod encode;
/// Monotonic progress relay.
pub mod progress;
/// CPU rasterizer and the frame capture loop.
pub mod render;
/// Scene configuration and deterministic scene sampling.
pub mod scene;
/// Job-oriented rendering API.
pub mod session;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgba8, Vec2};
pub use crate::foundation::error::{FlipbookError, FlipbookResult};

pub use crate::encode::ffmpeg::{FfmpegOpts, FfmpegSink, is_ffmpeg_on_path};
pub use crate::encode::gif::{EncodeThreading, GifOpts, GifSink};
pub use crate::encode::png::{PngDumpOpts, PngDumpSink};
pub use crate::encode::sink::{Artifact, FrameSink, InMemorySink, SinkConfig};
pub use crate::progress::ProgressReporter;
pub use crate::render::raster::{FrameRGBA, Rasterizer};
pub use crate::render::sequencer::{EncodedFrame, capture_frames, for_each_frame};
pub use crate::scene::config::{RenderConfig, SceneSpec};
pub use crate::scene::sampler::{BounceScene, SceneSampler, VisualState};
pub use crate::session::render_job::{
    EncoderBackend, JobPhase, RenderJob, render_to_gif, render_to_mp4,
};
