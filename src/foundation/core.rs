use crate::foundation::error::{FlipbookError, FlipbookResult};

pub use kurbo::{Point, Vec2};

/// Absolute 0-based frame index in capture order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Integer frames-per-second.
///
/// The pipeline targets short looping clips, so the accepted range is
/// [`Fps::MIN`]`..=`[`Fps::MAX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps(pub u32);

impl Fps {
    /// Lowest accepted frame rate.
    pub const MIN: u32 = 5;
    /// Highest accepted frame rate.
    pub const MAX: u32 = 30;

    /// Create a validated FPS value.
    pub fn new(fps: u32) -> FlipbookResult<Self> {
        let v = Self(fps);
        v.validate()?;
        Ok(v)
    }

    /// Check the range constraint on an already-constructed value.
    pub fn validate(self) -> FlipbookResult<()> {
        if self.0 < Self::MIN || self.0 > Self::MAX {
            return Err(FlipbookError::validation(format!(
                "fps must be within {}..={}, got {}",
                Self::MIN,
                Self::MAX,
                self.0
            )));
        }
        Ok(())
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Display delay of one frame in milliseconds, rounded to the nearest integer.
    pub fn frame_delay_ms(self) -> u32 {
        (1000.0 / self.as_f64()).round() as u32
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas value.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Byte length of one RGBA8 frame for this canvas.
    pub fn frame_bytes(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully opaque white.
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
