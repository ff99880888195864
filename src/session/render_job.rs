use crate::encode::ffmpeg::{FfmpegOpts, FfmpegSink};
use crate::encode::gif::{GifOpts, GifSink};
use crate::encode::sink::{Artifact, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::progress::ProgressReporter;
use crate::render::raster::Rasterizer;
use crate::render::sequencer::capture_frames;
use crate::scene::config::RenderConfig;

/// Lifecycle phase of a [`RenderJob`].
///
/// `Done` and `Failed` are terminal; a finished job cannot be restarted, the
/// caller creates a fresh job instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobPhase {
    /// Created, not started. No buffers held.
    Idle,
    /// The capture loop is producing frames.
    Capturing,
    /// The sink is consuming the captured frame sequence.
    Encoding,
    /// Finished successfully with an artifact.
    Done,
    /// Aborted by a capture or encode fault.
    Failed,
}

/// Which encoder backend a job finalizes with.
#[derive(Clone, Debug)]
pub enum EncoderBackend {
    /// Looping animated GIF (palette encoder).
    Gif(GifOpts),
    /// MP4 via the system `ffmpeg` binary.
    Mp4(FfmpegOpts),
}

/// One render job: capture all frames, then encode them, reporting progress
/// throughout.
///
/// The two phases never overlap: capture fully completes before encoding
/// begins, which bounds peak concurrency to one active operation. Capture runs
/// strictly sequentially because the rasterizer mutates one shared surface; the
/// surface is exclusively owned by the job for its lifetime. Progress maps
/// capture into `[0, 0.5]` and encoding into `[0.5, 1.0]`, ending at exactly
/// `1.0` on success.
///
/// Abandoning a job is dropping it: the surface is released and no further
/// progress callbacks happen. There is no resume; start a new job.
pub struct RenderJob {
    config: RenderConfig,
    phase: JobPhase,
    total_frames: u64,
    frames_emitted: u64,
}

impl RenderJob {
    /// Create a job for a validated configuration.
    pub fn new(config: RenderConfig) -> FlipbookResult<Self> {
        config.validate()?;
        let total_frames = config.total_frames();
        Ok(Self {
            config,
            phase: JobPhase::Idle,
            total_frames,
            frames_emitted: 0,
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    /// Number of frames this job captures: `round(duration_sec * fps)`.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frames captured so far.
    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// The configuration this job was created with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Run the job against a backend selected by configuration.
    pub fn run<F: FnMut(f64)>(
        &mut self,
        backend: EncoderBackend,
        on_progress: F,
    ) -> FlipbookResult<Artifact> {
        match backend {
            EncoderBackend::Gif(opts) => {
                let mut sink = GifSink::new(opts);
                self.run_with_sink(&mut sink, on_progress)
            }
            EncoderBackend::Mp4(opts) => {
                let mut sink = FfmpegSink::new(opts);
                self.run_with_sink(&mut sink, on_progress)
            }
        }
    }

    /// Run the job against an arbitrary sink.
    ///
    /// Fails with [`FlipbookError::Surface`] when the drawing surface cannot be
    /// acquired, [`FlipbookError::Capture`] for faults in the sampling/raster
    /// loop, and [`FlipbookError::Encode`] for sink faults. Any failure leaves
    /// the job in [`JobPhase::Failed`] with no artifact.
    #[tracing::instrument(skip_all, fields(
        width = self.config.canvas.width,
        height = self.config.canvas.height,
        fps = self.config.fps.0,
    ))]
    pub fn run_with_sink<F: FnMut(f64)>(
        &mut self,
        sink: &mut dyn FrameSink,
        on_progress: F,
    ) -> FlipbookResult<Artifact> {
        if self.phase != JobPhase::Idle {
            return Err(FlipbookError::validation(
                "a render job can only be started once; create a new job",
            ));
        }

        let mut progress = ProgressReporter::new(on_progress);
        match self.run_inner(sink, &mut progress) {
            Ok(artifact) => {
                self.phase = JobPhase::Done;
                tracing::info!(bytes = artifact.len(), mime = artifact.mime, "render done");
                Ok(artifact)
            }
            Err(e) => {
                self.phase = JobPhase::Failed;
                tracing::debug!(error = %e, "render failed");
                Err(e)
            }
        }
    }

    fn run_inner<F: FnMut(f64)>(
        &mut self,
        sink: &mut dyn FrameSink,
        progress: &mut ProgressReporter<F>,
    ) -> FlipbookResult<Artifact> {
        self.phase = JobPhase::Capturing;
        tracing::debug!(total_frames = self.total_frames, "capture phase started");

        let sampler = self.config.scene.build_sampler(self.config.canvas);
        let mut raster = Rasterizer::new(self.config.canvas)?;
        let frames = capture_frames(&self.config, sampler.as_ref(), &mut raster, progress)?;
        self.frames_emitted = frames.len() as u64;
        drop(raster);

        self.phase = JobPhase::Encoding;
        tracing::debug!(frames = frames.len(), "encode phase started");

        sink.begin(SinkConfig {
            width: self.config.canvas.width,
            height: self.config.canvas.height,
            fps: self.config.fps,
        })?;
        let total = frames.len() as u64;
        for (i, frame) in frames.iter().enumerate() {
            sink.push_frame(FrameIndex(i as u64), frame)?;
            progress.encode_step(i as u64 + 1, total);
        }
        sink.end()
    }
}

/// Render `config` into a looping animated GIF artifact.
pub fn render_to_gif<F: FnMut(f64)>(
    config: &RenderConfig,
    opts: GifOpts,
    on_progress: F,
) -> FlipbookResult<Artifact> {
    RenderJob::new(config.clone())?.run(EncoderBackend::Gif(opts), on_progress)
}

/// Render `config` into an MP4 artifact via the system `ffmpeg` binary.
///
/// The encoded file is left at `opts.out_path` and also returned as the
/// artifact bytes.
pub fn render_to_mp4<F: FnMut(f64)>(
    config: &RenderConfig,
    opts: FfmpegOpts,
    on_progress: F,
) -> FlipbookResult<Artifact> {
    RenderJob::new(config.clone())?.run(EncoderBackend::Mp4(opts), on_progress)
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_job.rs"]
mod tests;
