use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::progress::ProgressReporter;
use crate::render::raster::{FrameRGBA, Rasterizer};
use crate::scene::config::RenderConfig;
use crate::scene::sampler::SceneSampler;

/// One captured frame with its display delay, owned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    /// Owned copy of the rasterized pixels.
    pub pixels: FrameRGBA,
    /// Intended display delay in milliseconds, constant across one job.
    pub delay_ms: u32,
}

/// Drive the capture loop over `index = 0..total_frames`.
///
/// For each frame: `elapsed_fraction = index / total_frames`, sample the scene,
/// rasterize, and call `emit` with a borrow of the live buffer plus the constant
/// frame delay. `emit` is called exactly `total_frames` times in strictly
/// increasing index order. The borrow is only valid during the call; retaining a
/// frame requires copying it (see [`capture_frames`]).
///
/// Sampler faults are reported as [`FlipbookError::Capture`].
pub fn for_each_frame<F>(
    config: &RenderConfig,
    sampler: &dyn SceneSampler,
    raster: &mut Rasterizer,
    mut emit: F,
) -> FlipbookResult<()>
where
    F: FnMut(FrameIndex, &FrameRGBA, u32) -> FlipbookResult<()>,
{
    config.validate()?;
    if raster.canvas() != config.canvas {
        return Err(FlipbookError::surface(format!(
            "drawing surface is {}x{} but config expects {}x{}",
            raster.canvas().width,
            raster.canvas().height,
            config.canvas.width,
            config.canvas.height
        )));
    }

    let total = config.total_frames();
    if total == 0 {
        return Err(FlipbookError::validation("capture range must be non-empty"));
    }
    let delay_ms = config.frame_delay_ms();

    for i in 0..total {
        let fraction = i as f64 / total as f64;
        let state = sampler
            .sample(fraction)
            .map_err(|e| FlipbookError::capture(format!("scene sample at frame {i}: {e}")))?;
        let frame = raster.draw(&state);
        emit(FrameIndex(i), frame, delay_ms)?;
    }

    Ok(())
}

/// Capture all frames of a job into owned [`EncodedFrame`]s.
///
/// This is the one place the copy-before-reuse rule is enforced: each emitted
/// borrow is cloned before the rasterizer overwrites its buffer on the next
/// iteration. Capture progress is reported into the first half of the job's
/// progress range after each frame.
pub fn capture_frames<F: FnMut(f64)>(
    config: &RenderConfig,
    sampler: &dyn SceneSampler,
    raster: &mut Rasterizer,
    progress: &mut ProgressReporter<F>,
) -> FlipbookResult<Vec<EncodedFrame>> {
    let total = config.total_frames();
    let mut out = Vec::with_capacity(total as usize);

    for_each_frame(config, sampler, raster, |idx, frame, delay_ms| {
        out.push(EncodedFrame {
            pixels: frame.clone(),
            delay_ms,
        });
        progress.capture_step(idx.0 + 1, total);
        Ok(())
    })?;

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequencer.rs"]
mod tests;
