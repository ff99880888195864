use flipbook::{Canvas, Fps, GifOpts, RenderConfig, SceneSpec, render_to_gif};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = RenderConfig {
        canvas: Canvas::new(400, 300),
        fps: Fps(10),
        duration_sec: 3.0,
        scene: SceneSpec::Bounce,
    };

    let artifact = render_to_gif(&config, GifOpts::default(), |fraction| {
        println!("progress {:>3.0}%", fraction * 100.0);
    })?;

    let out = "bounce.gif";
    std::fs::write(out, &artifact.bytes)?;
    println!("wrote {out} ({} bytes, {})", artifact.len(), artifact.mime);
    Ok(())
}
