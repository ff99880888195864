use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::encode::sink::{Artifact, FrameSink, MIME_MP4, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::render::sequencer::EncodedFrame;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegOpts {
    /// Where ffmpeg writes the MP4 container.
    pub out_path: PathBuf,
    /// Whether to overwrite `out_path` if it already exists.
    pub overwrite: bool,
}

impl FfmpegOpts {
    /// Options writing to `out_path`, overwriting an existing file.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Return `true` when a usable `ffmpeg` binary is on `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn ensure_parent_dir(path: &Path) -> FlipbookResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// MP4 sink streaming raw RGBA frames into the system `ffmpeg` binary.
///
/// `ffmpeg` must be installed and on `PATH`; `begin` checks for it up front and
/// fails with [`FlipbookError::Encode`] if it is missing. Frames are written to
/// the child's stdin in push order, and the finalized file is read back into the
/// returned artifact so both backends honor the same blob contract.
pub struct FfmpegSink {
    opts: FfmpegOpts,
    cfg: Option<SinkConfig>,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
}

impl FfmpegSink {
    /// Create a sink with the given options.
    pub fn new(opts: FfmpegOpts) -> Self {
        Self {
            opts,
            cfg: None,
            child: None,
            stdin: None,
        }
    }

    /// Validate a sink configuration against MP4 backend constraints.
    ///
    /// With the default settings the output targets yuv420p, which requires even
    /// frame dimensions.
    pub fn validate_config(cfg: &SinkConfig) -> FlipbookResult<()> {
        cfg.validate()?;
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(FlipbookError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // An error path can abandon the sink mid-encode with the child still
        // running; kill and reap it so no zombie outlives the sink.
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> FlipbookResult<()> {
        Self::validate_config(&cfg)?;
        ensure_parent_dir(&self.opts.out_path)?;

        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(FlipbookError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(FlipbookError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        // The system binary is used rather than linked FFmpeg libraries to avoid
        // native dev header/lib requirements.
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.0.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            FlipbookError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| FlipbookError::encode("failed to open ffmpeg stdin (unexpected)"))?;

        self.cfg = Some(cfg);
        self.child = Some(child);
        self.stdin = Some(stdin);
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &EncodedFrame) -> FlipbookResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(FlipbookError::encode(
                "push_frame called before begin on ffmpeg sink",
            ));
        };
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

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(FlipbookError::encode("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.pixels.data).map_err(|e| {
            FlipbookError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    fn end(&mut self) -> FlipbookResult<Artifact> {
        if self.cfg.take().is_none() {
            return Err(FlipbookError::encode(
                "end called before begin on ffmpeg sink",
            ));
        }
        drop(self.stdin.take());

        let Some(child) = self.child.take() else {
            return Err(FlipbookError::encode("ffmpeg encoder is already finalized"));
        };

        let output = child.wait_with_output().map_err(|e| {
            FlipbookError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FlipbookError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let bytes = std::fs::read(&self.opts.out_path).map_err(|e| {
            FlipbookError::encode(format!(
                "failed to read encoded output '{}': {e}",
                self.opts.out_path.display()
            ))
        })?;

        Ok(Artifact {
            mime: MIME_MP4,
            bytes,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
