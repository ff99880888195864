use super::*;
use crate::scene::sampler::{BounceScene, SceneSampler};

fn state_for(canvas: Canvas, fraction: f64) -> VisualState {
    BounceScene::new(canvas).sample(fraction).unwrap()
}

#[test]
fn zero_sized_surface_is_a_surface_error() {
    assert!(matches!(
        Rasterizer::new(Canvas::new(0, 100)),
        Err(FlipbookError::Surface(_))
    ));
    assert!(matches!(
        Rasterizer::new(Canvas::new(100, 0)),
        Err(FlipbookError::Surface(_))
    ));
}

#[test]
fn boundary_canvases_rasterize() {
    for canvas in [Canvas::new(100, 100), Canvas::new(800, 600)] {
        let mut raster = Rasterizer::new(canvas).unwrap();
        let frame = raster.draw(&state_for(canvas, 0.25));
        assert_eq!(frame.width, canvas.width);
        assert_eq!(frame.height, canvas.height);
        assert_eq!(frame.data.len(), canvas.frame_bytes());
    }
}

#[test]
fn output_is_fully_opaque() {
    let canvas = Canvas::new(100, 100);
    let mut raster = Rasterizer::new(canvas).unwrap();
    let frame = raster.draw(&state_for(canvas, 0.5));
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn identical_state_draws_identical_bytes() {
    let canvas = Canvas::new(200, 150);
    let state = state_for(canvas, 0.125);

    let mut raster = Rasterizer::new(canvas).unwrap();
    let a = raster.draw(&state).clone();
    let b = raster.draw(&state).clone();
    assert_eq!(a, b);

    // A fresh surface draws the same bytes too.
    let mut other = Rasterizer::new(canvas).unwrap();
    let c = other.draw(&state).clone();
    assert_eq!(a, c);
}

#[test]
fn differing_states_draw_differing_bytes() {
    let canvas = Canvas::new(200, 150);
    let mut raster = Rasterizer::new(canvas).unwrap();
    let a = raster.draw(&state_for(canvas, 0.0)).clone();
    let b = raster.draw(&state_for(canvas, 0.25)).clone();
    assert_ne!(a, b);
}

#[test]
fn corners_carry_the_gradient_endpoints() {
    let canvas = Canvas::new(400, 300);
    let mut raster = Rasterizer::new(canvas).unwrap();
    let frame = raster.draw(&state_for(canvas, 0.0)).clone();

    // Top-left is near #ff6b6b, bottom-right near #4ecdc4.
    let tl = &frame.data[0..4];
    assert!(tl[0] > 0xf0 && tl[1] < 0x80 && tl[2] < 0x80);

    let last = frame.data.len() - 4;
    let br = &frame.data[last..];
    assert!(br[0] < 0x60 && br[1] > 0xc0 && br[2] > 0xb0);
}

#[test]
fn circle_center_is_white() {
    let canvas = Canvas::new(400, 300);
    let state = state_for(canvas, 0.0);
    let mut raster = Rasterizer::new(canvas).unwrap();
    let frame = raster.draw(&state).clone();

    let x = state.circle_center.x as u32;
    let y = state.circle_center.y as u32;
    let i = ((y * canvas.width + x) * 4) as usize;
    assert_eq!(&frame.data[i..i + 4], &[255, 255, 255, 255]);
}
