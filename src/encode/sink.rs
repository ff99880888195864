use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::render::sequencer::EncodedFrame;

/// MIME type of the GIF backend's artifact.
pub const MIME_GIF: &str = "image/gif";
/// MIME type of the ffmpeg backend's artifact.
pub const MIME_MP4: &str = "video/mp4";

/// The final encoded blob delivered to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// MIME type identifying the container format.
    pub mime: &'static str,
    /// Encoded container bytes.
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Byte length of the encoded container.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Return `true` when the artifact holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Configuration provided to a [`FrameSink`] at the start of an encode.
#[derive(Clone, Copy, Debug)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

impl SinkConfig {
    /// Check the constraints shared by all sinks.
    pub fn validate(&self) -> FlipbookResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FlipbookError::validation(
                "encode width/height must be non-zero",
            ));
        }
        self.fps.validate()
    }
}

/// Sink contract for consuming captured frames in display order.
///
/// Ordering contract: `push_frame` is called in strictly increasing
/// [`FrameIndex`] order; encoded frame `i` must correspond to pushed frame `i`
/// even when a sink parallelizes internally. `end` finalizes and returns the
/// artifact exactly once; any fault aborts the encode with no partial artifact.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> FlipbookResult<()>;
    /// Push one frame in strictly increasing index order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &EncodedFrame) -> FlipbookResult<()>;
    /// Called once after the last frame; finalizes the container.
    fn end(&mut self) -> FlipbookResult<Artifact>;
}

/// In-memory sink for tests and debugging.
///
/// Captures every pushed frame; its artifact is the raw RGBA bytes of all
/// frames concatenated in order, which makes byte-identity assertions across
/// renders trivial.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, EncodedFrame)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, EncodedFrame)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FlipbookResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &EncodedFrame) -> FlipbookResult<()> {
        if self.cfg.is_none() {
            return Err(FlipbookError::encode(
                "push_frame called before begin on in-memory sink",
            ));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> FlipbookResult<Artifact> {
        if self.cfg.take().is_none() {
            return Err(FlipbookError::encode(
                "end called before begin on in-memory sink",
            ));
        }
        let mut bytes = Vec::new();
        for (_, frame) in &self.frames {
            bytes.extend_from_slice(&frame.pixels.data);
        }
        Ok(Artifact {
            mime: "application/octet-stream",
            bytes,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
