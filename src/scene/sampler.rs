use std::f64::consts::TAU;

use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Everything the rasterizer needs to paint one frame.
///
/// A pure value: no ownership relations, recomputed fresh per frame from the
/// elapsed fraction alone.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualState {
    /// Backdrop gradient color at the canvas origin.
    pub bg_start: Rgba8,
    /// Backdrop gradient color at the opposite canvas corner.
    pub bg_end: Rgba8,
    /// Center of the foreground circle.
    pub circle_center: Point,
    /// Radius of the foreground circle in pixels.
    pub circle_radius: f64,
    /// Fill color of the foreground circle.
    pub circle_color: Rgba8,
    /// Drop shadow offset relative to the circle center.
    pub shadow_offset: Vec2,
    /// Width of the shadow's soft edge in pixels.
    pub shadow_blur: f64,
    /// Peak opacity of the drop shadow.
    pub shadow_alpha: f64,
    /// Center of the caption band.
    pub caption_center: Point,
    /// Opacity of the caption band.
    pub caption_alpha: f64,
}

/// Pure mapping from elapsed fraction to visual state.
///
/// Implementations must be deterministic and side-effect free: no wall-clock
/// reads, no hidden counters. Two calls with the same fraction must produce
/// identical state, so frame `k` of an `N`-frame render always equals frame `k`
/// of any re-render with the same config.
pub trait SceneSampler: Send + Sync {
    /// Sample the scene at `elapsed_fraction` within `[0, 1]`.
    fn sample(&self, elapsed_fraction: f64) -> FlipbookResult<VisualState>;
}

/// The built-in scene: a white circle bouncing over a fixed linear gradient,
/// with a caption band that fades in step with the bounce.
///
/// All curves are smooth periodic functions of `elapsed_fraction * 2π`;
/// amplitudes and phases are fixed constants, not configuration.
#[derive(Clone, Copy, Debug)]
pub struct BounceScene {
    canvas: Canvas,
}

/// Gradient color at the canvas origin (`#ff6b6b`).
const BG_START: Rgba8 = Rgba8::rgb(0xff, 0x6b, 0x6b);
/// Gradient color at the far corner (`#4ecdc4`).
const BG_END: Rgba8 = Rgba8::rgb(0x4e, 0xcd, 0xc4);

const BOUNCE_AMPLITUDE: f64 = 50.0;
const BASE_RADIUS: f64 = 50.0;
const RADIUS_SWELL: f64 = 5.0;
const CAPTION_DROP: f64 = 100.0;
const SHADOW_OFFSET_Y: f64 = 5.0;
const SHADOW_BLUR: f64 = 15.0;
const SHADOW_ALPHA: f64 = 0.3;

impl BounceScene {
    /// Create the scene for a given canvas.
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }
}

impl SceneSampler for BounceScene {
    fn sample(&self, elapsed_fraction: f64) -> FlipbookResult<VisualState> {
        if !(0.0..=1.0).contains(&elapsed_fraction) {
            return Err(FlipbookError::validation(format!(
                "elapsed fraction must be within [0, 1], got {elapsed_fraction}"
            )));
        }

        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let bounce = (elapsed_fraction * TAU).sin().abs();

        let circle_center = Point::new(w / 2.0, h / 2.0 - bounce * BOUNCE_AMPLITUDE);
        Ok(VisualState {
            bg_start: BG_START,
            bg_end: BG_END,
            circle_center,
            circle_radius: BASE_RADIUS + bounce * RADIUS_SWELL,
            circle_color: Rgba8::white(),
            shadow_offset: Vec2::new(0.0, SHADOW_OFFSET_Y),
            shadow_blur: SHADOW_BLUR,
            shadow_alpha: SHADOW_ALPHA,
            caption_center: Point::new(w / 2.0, circle_center.y + CAPTION_DROP),
            caption_alpha: 0.5 + bounce * 0.5,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sampler.rs"]
mod tests;
