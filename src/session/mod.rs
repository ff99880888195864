/// Render job lifecycle and convenience entry points.
pub mod render_job;
