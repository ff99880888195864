use std::io::BufWriter;
use std::path::PathBuf;

use image::ImageEncoder as _;

use crate::encode::sink::{Artifact, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::render::sequencer::EncodedFrame;

/// Options for [`PngDumpSink`].
#[derive(Clone, Debug)]
pub struct PngDumpOpts {
    /// Directory the numbered PNG files are written into.
    pub dir: PathBuf,
    /// File name prefix; frame `i` lands at `{prefix}_{i:05}.png`.
    pub prefix: String,
}

impl PngDumpOpts {
    /// Options writing `frame_{i:05}.png` files into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame".to_string(),
        }
    }
}

/// Debug sink writing every pushed frame as a numbered PNG file.
///
/// Useful for inspecting individual captured frames when an encoded animation
/// looks wrong. The artifact is a plain-text manifest of the written paths, one
/// per line; the PNGs themselves stay on disk.
pub struct PngDumpSink {
    opts: PngDumpOpts,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngDumpSink {
    /// Create a sink with the given options.
    pub fn new(opts: PngDumpOpts) -> Self {
        Self {
            opts,
            cfg: None,
            written: Vec::new(),
        }
    }

    /// Paths written so far, in push order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngDumpSink {
    fn begin(&mut self, cfg: SinkConfig) -> FlipbookResult<()> {
        cfg.validate()?;
        std::fs::create_dir_all(&self.opts.dir).map_err(|e| {
            FlipbookError::encode(format!(
                "failed to create dump directory '{}': {e}",
                self.opts.dir.display()
            ))
        })?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &EncodedFrame) -> FlipbookResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(FlipbookError::encode(
                "push_frame called before begin on png dump sink",
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

        let path = self
            .opts
            .dir
            .join(format!("{}_{:05}.png", self.opts.prefix, idx.0));
        let file = std::fs::File::create(&path).map_err(|e| {
            FlipbookError::encode(format!("failed to create '{}': {e}", path.display()))
        })?;
        let encoder = image::codecs::png::PngEncoder::new(BufWriter::new(file));
        encoder
            .write_image(
                &frame.pixels.data,
                cfg.width,
                cfg.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| {
                FlipbookError::encode(format!("failed to encode '{}': {e}", path.display()))
            })?;

        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> FlipbookResult<Artifact> {
        if self.cfg.take().is_none() {
            return Err(FlipbookError::encode(
                "end called before begin on png dump sink",
            ));
        }
        let mut manifest = String::new();
        for path in &self.written {
            manifest.push_str(&path.display().to_string());
            manifest.push('\n');
        }
        Ok(Artifact {
            mime: "text/plain",
            bytes: manifest.into_bytes(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
