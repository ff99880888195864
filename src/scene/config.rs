use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::scene::sampler::{BounceScene, SceneSampler};

/// Immutable configuration for one render job.
///
/// Produced by the host layer (UI, service, test harness); never mutated by the
/// pipeline. [`RenderConfig::validate`] is called once at job creation and the
/// accepted bounds match the host controls: canvas 100×100 up to 800×600, frame
/// rate 5..=30, duration 1..=10 seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Output canvas dimensions in pixels.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Clip duration in seconds.
    pub duration_sec: f64,
    /// Scene descriptor; opaque to the capture/encode stages.
    #[serde(default)]
    pub scene: SceneSpec,
}

impl RenderConfig {
    /// Smallest accepted canvas width in pixels.
    pub const MIN_WIDTH: u32 = 100;
    /// Largest accepted canvas width in pixels.
    pub const MAX_WIDTH: u32 = 800;
    /// Smallest accepted canvas height in pixels.
    pub const MIN_HEIGHT: u32 = 100;
    /// Largest accepted canvas height in pixels.
    pub const MAX_HEIGHT: u32 = 600;
    /// Shortest accepted clip duration in seconds.
    pub const MIN_DURATION_SEC: f64 = 1.0;
    /// Longest accepted clip duration in seconds.
    pub const MAX_DURATION_SEC: f64 = 10.0;

    /// Check all range constraints.
    pub fn validate(&self) -> FlipbookResult<()> {
        if self.canvas.width < Self::MIN_WIDTH || self.canvas.width > Self::MAX_WIDTH {
            return Err(FlipbookError::validation(format!(
                "canvas width must be within {}..={}, got {}",
                Self::MIN_WIDTH,
                Self::MAX_WIDTH,
                self.canvas.width
            )));
        }
        if self.canvas.height < Self::MIN_HEIGHT || self.canvas.height > Self::MAX_HEIGHT {
            return Err(FlipbookError::validation(format!(
                "canvas height must be within {}..={}, got {}",
                Self::MIN_HEIGHT,
                Self::MAX_HEIGHT,
                self.canvas.height
            )));
        }
        self.fps.validate()?;
        if !self.duration_sec.is_finite()
            || self.duration_sec < Self::MIN_DURATION_SEC
            || self.duration_sec > Self::MAX_DURATION_SEC
        {
            return Err(FlipbookError::validation(format!(
                "duration must be within {}..={} seconds, got {}",
                Self::MIN_DURATION_SEC,
                Self::MAX_DURATION_SEC,
                self.duration_sec
            )));
        }
        Ok(())
    }

    /// Number of frames captured for one job: `round(duration_sec * fps)`.
    pub fn total_frames(&self) -> u64 {
        (self.duration_sec * self.fps.as_f64()).round() as u64
    }

    /// Constant per-frame display delay in milliseconds: `round(1000 / fps)`.
    pub fn frame_delay_ms(&self) -> u32 {
        self.fps.frame_delay_ms()
    }

    /// Parse and validate a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> FlipbookResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| FlipbookError::serde(format!("invalid render config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Which procedural scene a job renders.
///
/// The capture loop only ever sees the [`SceneSampler`] built from this spec, so
/// hosts can also bypass it entirely and supply their own sampler through
/// [`for_each_frame`](crate::render::sequencer::for_each_frame).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneSpec {
    /// Bouncing circle over a gradient backdrop with a fading caption band.
    #[default]
    Bounce,
}

impl SceneSpec {
    /// Build the sampler for this scene on the given canvas.
    pub fn build_sampler(&self, canvas: Canvas) -> Box<dyn SceneSampler> {
        match self {
            Self::Bounce => Box::new(BounceScene::new(canvas)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
