use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::foundation::math::{lerp_u8, mul_div255_u16, smooth_falloff};
use crate::scene::sampler::VisualState;

/// One frame of straight-alpha RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Allocate a zeroed frame for a canvas.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; canvas.frame_bytes()],
        }
    }
}

/// Caption band half-extent along x, in pixels.
const CAPTION_HALF_W: f64 = 60.0;
/// Caption band half-extent along y; also the capsule corner radius.
const CAPTION_HALF_H: f64 = 14.0;

/// CPU rasterizer for a [`VisualState`].
///
/// Owns one backing [`FrameRGBA`] that is overwritten on every [`Rasterizer::draw`]
/// call. Consumers that need to retain a frame must copy it before the next draw;
/// the capture loop in [`capture_frames`](crate::render::sequencer::capture_frames)
/// does exactly that. Concurrent draws on one rasterizer are impossible by
/// construction (`draw` takes `&mut self`).
///
/// Output is deterministic: identical `(state, canvas)` produces identical bytes.
pub struct Rasterizer {
    canvas: Canvas,
    frame: FrameRGBA,
}

impl Rasterizer {
    /// Acquire a drawing surface for `canvas`.
    ///
    /// Fails with [`FlipbookError::Surface`] when the target is zero-sized.
    pub fn new(canvas: Canvas) -> FlipbookResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(FlipbookError::surface(format!(
                "drawing surface must be non-empty, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        Ok(Self {
            canvas,
            frame: FrameRGBA::new(canvas),
        })
    }

    /// Canvas this surface was acquired for.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Paint `state` into the backing buffer and return a borrow of it.
    ///
    /// The returned frame is only valid until the next `draw` call overwrites it.
    pub fn draw(&mut self, state: &VisualState) -> &FrameRGBA {
        self.fill_gradient(state);
        self.paint_shadow(state);
        self.paint_circle(state);
        self.paint_caption(state);
        &self.frame
    }

    /// Linear gradient from the canvas origin to the opposite corner.
    fn fill_gradient(&mut self, state: &VisualState) {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let denom = w * w + h * h;

        for y in 0..self.canvas.height {
            let py = f64::from(y) + 0.5;
            for x in 0..self.canvas.width {
                let px = f64::from(x) + 0.5;
                let t = ((px * w + py * h) / denom).clamp(0.0, 1.0);
                let i = self.px_offset(x, y);
                self.frame.data[i] = lerp_u8(state.bg_start.r, state.bg_end.r, t);
                self.frame.data[i + 1] = lerp_u8(state.bg_start.g, state.bg_end.g, t);
                self.frame.data[i + 2] = lerp_u8(state.bg_start.b, state.bg_end.b, t);
                self.frame.data[i + 3] = 255;
            }
        }
    }

    /// Soft disc shadow under the circle: full opacity out to the circle radius,
    /// hermite falloff over `shadow_blur` pixels beyond it.
    fn paint_shadow(&mut self, state: &VisualState) {
        let center = state.circle_center + state.shadow_offset;
        let reach = state.circle_radius + state.shadow_blur;
        let (x0, x1, y0, y1) = self.clip_rect(center, reach, reach);

        for y in y0..y1 {
            let py = f64::from(y) + 0.5;
            for x in x0..x1 {
                let px = f64::from(x) + 0.5;
                let d = center.distance(Point::new(px, py));
                let cov = smooth_falloff(state.circle_radius, reach, d) * state.shadow_alpha;
                if cov > 0.0 {
                    self.blend_px(x, y, Rgba8::rgb(0, 0, 0), cov);
                }
            }
        }
    }

    /// Antialiased filled disc.
    fn paint_circle(&mut self, state: &VisualState) {
        let r = state.circle_radius;
        let (x0, x1, y0, y1) = self.clip_rect(state.circle_center, r + 1.0, r + 1.0);

        for y in y0..y1 {
            let py = f64::from(y) + 0.5;
            for x in x0..x1 {
                let px = f64::from(x) + 0.5;
                let d = state.circle_center.distance(Point::new(px, py));
                let cov = (r + 0.5 - d).clamp(0.0, 1.0);
                if cov > 0.0 {
                    self.blend_px(x, y, state.circle_color, cov);
                }
            }
        }
    }

    /// Antialiased capsule standing in for the caption text of the source scene.
    fn paint_caption(&mut self, state: &VisualState) {
        if state.caption_alpha <= 0.0 {
            return;
        }
        let c = state.caption_center;
        let (x0, x1, y0, y1) = self.clip_rect(c, CAPTION_HALF_W + 1.0, CAPTION_HALF_H + 1.0);
        let seg_half = CAPTION_HALF_W - CAPTION_HALF_H;

        for y in y0..y1 {
            let py = f64::from(y) + 0.5;
            for x in x0..x1 {
                let px = f64::from(x) + 0.5;
                // Distance to the capsule's horizontal core segment.
                let dx = (px - c.x).abs() - seg_half;
                let d = (dx.max(0.0).powi(2) + (py - c.y).powi(2)).sqrt();
                let cov = (CAPTION_HALF_H + 0.5 - d).clamp(0.0, 1.0) * state.caption_alpha;
                if cov > 0.0 {
                    self.blend_px(x, y, Rgba8::white(), cov);
                }
            }
        }
    }

    fn px_offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4
    }

    /// Source-over blend with straight-alpha coverage onto the opaque backdrop.
    fn blend_px(&mut self, x: u32, y: u32, color: Rgba8, coverage: f64) {
        let a = (coverage.clamp(0.0, 1.0) * 255.0).round() as u16;
        if a == 0 {
            return;
        }
        let inv = 255 - a;
        let i = self.px_offset(x, y);
        let px = &mut self.frame.data[i..i + 4];
        for (ch, src) in [color.r, color.g, color.b].into_iter().enumerate() {
            let sum =
                mul_div255_u16(u16::from(src), a) + mul_div255_u16(u16::from(px[ch]), inv);
            px[ch] = sum.min(255) as u8;
        }
        px[3] = 255;
    }

    /// Clamped integer pixel bounds for a box around `center`.
    fn clip_rect(&self, center: Point, half_w: f64, half_h: f64) -> (u32, u32, u32, u32) {
        let clamp_dim = |v: f64, max: u32| -> u32 { v.max(0.0).min(f64::from(max)) as u32 };
        let x0 = clamp_dim((center.x - half_w).floor(), self.canvas.width);
        let x1 = clamp_dim((center.x + half_w).ceil(), self.canvas.width);
        let y0 = clamp_dim((center.y - half_h).floor(), self.canvas.height);
        let y1 = clamp_dim((center.y + half_h).ceil(), self.canvas.height);
        (x0, x1, y0, y1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
