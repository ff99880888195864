use rayon::prelude::*;

use crate::encode::sink::{Artifact, FrameSink, MIME_GIF, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::render::sequencer::EncodedFrame;

/// Threading/chunking configuration for the encode phase.
///
/// When `parallel` is set, palette quantization runs on a dedicated rayon pool
/// in chunks of `chunk_size` frames. Output frame order is preserved either way.
#[derive(Clone, Debug)]
pub struct EncodeThreading {
    /// Quantize frames on a worker pool instead of in push order.
    pub parallel: bool,
    /// Frames per parallel chunk.
    pub chunk_size: usize,
    /// Worker thread count; `None` uses the rayon default.
    pub threads: Option<usize>,
}

impl Default for EncodeThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifOpts {
    /// Quantizer speed in `1..=30`; lower is slower and higher quality.
    pub speed: i32,
    /// Encode-phase threading configuration.
    pub threading: EncodeThreading,
}

impl Default for GifOpts {
    fn default() -> Self {
        Self {
            speed: 10,
            threading: EncodeThreading::default(),
        }
    }
}

/// Animated-GIF sink.
///
/// Quantizes each frame's colors into a per-frame palette and finalizes a
/// loop-forever GIF container with per-frame delays in centiseconds. In the
/// default sequential mode quantization happens incrementally on each
/// `push_frame`; in parallel mode raw frames are held and quantized in ordered
/// chunks at `end`.
pub struct GifSink {
    opts: GifOpts,
    cfg: Option<SinkConfig>,
    quantized: Vec<gif::Frame<'static>>,
    raw: Vec<EncodedFrame>,
}

impl GifSink {
    /// Create a sink with the given options.
    pub fn new(opts: GifOpts) -> Self {
        Self {
            opts,
            cfg: None,
            quantized: Vec::new(),
            raw: Vec::new(),
        }
    }
}

/// GIF frame delay unit is centiseconds; delays below one tick round up to it.
pub(crate) fn delay_cs(delay_ms: u32) -> u16 {
    (((delay_ms + 5) / 10).max(1)).min(u32::from(u16::MAX)) as u16
}

fn quantize_frame(
    cfg: &SinkConfig,
    frame: &EncodedFrame,
    speed: i32,
) -> FlipbookResult<gif::Frame<'static>> {
    if frame.pixels.width != cfg.width || frame.pixels.height != cfg.height {
        return Err(FlipbookError::encode(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.pixels.width, frame.pixels.height, cfg.width, cfg.height
        )));
    }
    let expected = (cfg.width as usize) * (cfg.height as usize) * 4;
    if frame.pixels.data.len() != expected {
        return Err(FlipbookError::encode(
            "frame data size mismatch with width*height*4",
        ));
    }
    if frame.delay_ms == 0 {
        return Err(FlipbookError::encode("frame delay must be positive"));
    }

    // from_rgba_speed consumes the buffer in place, so quantize a copy.
    let mut rgba = frame.pixels.data.clone();
    let mut out =
        gif::Frame::from_rgba_speed(cfg.width as u16, cfg.height as u16, &mut rgba, speed);
    out.delay = delay_cs(frame.delay_ms);
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> FlipbookResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FlipbookError::encode(format!("failed to build quantizer thread pool: {e}")))
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> FlipbookResult<()> {
        cfg.validate()?;
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(FlipbookError::validation(
                "gif frame dimensions must fit in u16",
            ));
        }
        if !(1..=30).contains(&self.opts.speed) {
            return Err(FlipbookError::validation(
                "gif quantizer speed must be within 1..=30",
            ));
        }
        if self.opts.threading.chunk_size == 0 {
            return Err(FlipbookError::validation(
                "encode threading chunk_size must be >= 1",
            ));
        }
        if self.opts.threading.threads == Some(0) {
            return Err(FlipbookError::validation(
                "encode threading 'threads' must be >= 1 when set",
            ));
        }
        self.cfg = Some(cfg);
        self.quantized.clear();
        self.raw.clear();
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &EncodedFrame) -> FlipbookResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(FlipbookError::encode(
                "push_frame called before begin on gif sink",
            ));
        };
        if self.opts.threading.parallel {
            self.raw.push(frame.clone());
        } else {
            self.quantized
                .push(quantize_frame(&cfg, frame, self.opts.speed)?);
        }
        Ok(())
    }

    fn end(&mut self) -> FlipbookResult<Artifact> {
        let Some(cfg) = self.cfg.take() else {
            return Err(FlipbookError::encode(
                "end called before begin on gif sink",
            ));
        };

        if self.opts.threading.parallel {
            let pool = build_thread_pool(self.opts.threading.threads)?;
            let raw = std::mem::take(&mut self.raw);
            for chunk in raw.chunks(self.opts.threading.chunk_size) {
                // Ordered chunks + ordered par_iter keep output frame order
                // identical to push order.
                let mut q = pool.install(|| {
                    chunk
                        .par_iter()
                        .map(|f| quantize_frame(&cfg, f, self.opts.speed))
                        .collect::<FlipbookResult<Vec<_>>>()
                })?;
                self.quantized.append(&mut q);
            }
        }

        if self.quantized.is_empty() {
            return Err(FlipbookError::encode("gif encode requires at least one frame"));
        }

        let mut bytes = Vec::new();
        {
            let mut enc =
                gif::Encoder::new(&mut bytes, cfg.width as u16, cfg.height as u16, &[])
                    .map_err(|e| {
                        FlipbookError::encode(format!("failed to create gif encoder: {e}"))
                    })?;
            enc.set_repeat(gif::Repeat::Infinite)
                .map_err(|e| FlipbookError::encode(format!("failed to set gif repeat: {e}")))?;
            for frame in self.quantized.drain(..) {
                enc.write_frame(&frame)
                    .map_err(|e| FlipbookError::encode(format!("failed to write gif frame: {e}")))?;
            }
        }

        Ok(Artifact {
            mime: MIME_GIF,
            bytes,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
